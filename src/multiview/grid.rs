// Grid controller - single dimension state, full teardown + rebuild on resize

use super::errors::MultiviewError;
use super::lifecycle::LifecycleManager;
use super::models::{GridSize, SlotId};
use super::registry::SlotRegistry;
use super::surface::{SurfaceEvent, SurfaceSink};

#[derive(Debug, Default)]
pub struct GridController {
    size: GridSize,
}

impl GridController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn slot_count(&self) -> u8 {
        self.size.slot_count()
    }

    /// Resolve a raw 1-indexed slot number against the current grid.
    pub fn resolve_slot(&self, index: u8) -> Result<SlotId, MultiviewError> {
        let slot = SlotId::new(index)?;
        if !self.size.contains(slot) {
            return Err(MultiviewError::InvalidSlot(slot.to_string()));
        }
        Ok(slot)
    }

    /// Resize the grid: stop every registered slot, then rebuild placeholders.
    ///
    /// Always a full teardown and rebuild; there is no incremental diff.
    pub fn set_layout(
        &mut self,
        dimension: u8,
        lifecycle: &mut LifecycleManager,
        registry: &mut SlotRegistry,
        surface: &dyn SurfaceSink,
    ) -> Result<GridSize, MultiviewError> {
        let size = GridSize::from_dimension(dimension)?;
        eprintln!("[Grid] Switching layout to {} ({} slots)", size, size.slot_count());

        lifecycle.clear_all(registry, surface);
        self.size = size;
        surface.emit(SurfaceEvent::RebuildGrid {
            size: size.dimension(),
        });
        Ok(size)
    }
}
