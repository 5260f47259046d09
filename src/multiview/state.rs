// Top-level multiview state
//
// Owns the registry and the controllers; commands and loader tasks share it
// behind one async mutex and never hold the lock across network awaits.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::csv;
use super::dialog::StreamDialog;
use super::errors::MultiviewError;
use super::grid::GridController;
use super::lifecycle::LifecycleManager;
use super::models::{SlotId, StreamEntry};
use super::presets::PresetEntry;
use super::registry::SlotRegistry;
use super::surface::SurfaceSink;

pub type SharedMultiview = Arc<Mutex<Multiview>>;

#[derive(Debug, Default)]
pub struct Multiview {
    grid: GridController,
    registry: SlotRegistry,
    lifecycle: LifecycleManager,
    dialog: StreamDialog,
    /// Bumped by every resize and bulk load; staggered starts still in flight
    /// check it and drop themselves when superseded.
    generation: u64,
}

impl Multiview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn slot_count(&self) -> u8 {
        self.grid.slot_count()
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    /// Assign a stream to a slot given its raw 1-indexed number.
    pub fn start_stream(
        &mut self,
        surface: &dyn SurfaceSink,
        index: u8,
        url: &str,
        name: &str,
    ) -> Result<(), MultiviewError> {
        let slot = self.grid.resolve_slot(index)?;
        self.start_slot(surface, slot, url, name)
    }

    pub fn start_slot(
        &mut self,
        surface: &dyn SurfaceSink,
        slot: SlotId,
        url: &str,
        name: &str,
    ) -> Result<(), MultiviewError> {
        self.lifecycle
            .start(self.grid.size(), &mut self.registry, surface, slot, url, name)
    }

    pub fn stop_stream(
        &mut self,
        surface: &dyn SurfaceSink,
        index: u8,
    ) -> Result<(), MultiviewError> {
        let slot = self.grid.resolve_slot(index)?;
        self.lifecycle.stop(&mut self.registry, surface, slot);
        Ok(())
    }

    pub fn clear_all(&mut self, surface: &dyn SurfaceSink) {
        self.lifecycle.clear_all(&mut self.registry, surface);
    }

    /// Resize the grid. Cancels any staggered load still in flight.
    pub fn set_grid_layout(
        &mut self,
        surface: &dyn SurfaceSink,
        dimension: u8,
    ) -> Result<u8, MultiviewError> {
        self.bump_generation();
        let size = self
            .grid
            .set_layout(dimension, &mut self.lifecycle, &mut self.registry, surface)?;
        Ok(size.slot_count())
    }

    pub fn open_dialog(&mut self, index: u8) -> Result<(), MultiviewError> {
        let slot = self.grid.resolve_slot(index)?;
        self.dialog.open(slot);
        Ok(())
    }

    /// Submit the dialog: starts the bound slot and clears the binding.
    /// An empty URL leaves the dialog bound, mirroring the form's submit guard.
    pub fn submit_dialog(
        &mut self,
        surface: &dyn SurfaceSink,
        url: &str,
        name: &str,
    ) -> Result<(), MultiviewError> {
        let slot = self.dialog.target().ok_or(MultiviewError::NoDialogTarget)?;
        if url.trim().is_empty() {
            return Err(MultiviewError::EmptyUrl);
        }
        self.start_slot(surface, slot, url, name)?;
        self.dialog.close();
        Ok(())
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog.close();
    }

    pub fn dialog_target(&self) -> Option<SlotId> {
        self.dialog.target()
    }

    pub fn widget_api_ready(&mut self, surface: &dyn SurfaceSink) {
        self.lifecycle.widget_api_ready(&mut self.registry, surface);
    }

    pub fn handle_fault(
        &mut self,
        surface: &dyn SurfaceSink,
        index: u8,
        detail: &str,
        fatal: bool,
    ) -> Result<(), MultiviewError> {
        let slot = self.grid.resolve_slot(index)?;
        self.lifecycle
            .handle_fault(&mut self.registry, surface, slot, detail, fatal);
        Ok(())
    }

    /// Parse CSV text against the current grid capacity.
    pub fn parse_csv(&self, text: &str) -> Vec<StreamEntry> {
        csv::parse(text, self.grid.slot_count())
    }

    /// Serialize the populated slots as export CSV.
    pub fn export_csv(&self) -> Result<String, MultiviewError> {
        if self.registry.is_empty() {
            return Err(MultiviewError::NothingToExport);
        }
        Ok(csv::generate(&self.registry))
    }

    /// Snapshot the populated slots for preset save, in slot order.
    pub fn snapshot_preset(&self) -> Vec<PresetEntry> {
        self.registry
            .populated()
            .into_iter()
            .map(|(_, player)| PresetEntry {
                name: player.name().to_string(),
                url: player.url().to_string(),
            })
            .collect()
    }
}
