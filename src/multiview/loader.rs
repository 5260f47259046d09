// Staggered, cancellable bulk config application
//
// Starting many players at once overwhelms the playback backends, so starts
// are spaced 500 ms apart. Every apply (and every grid resize) bumps the load
// generation; a pending start whose generation is stale drops itself, so a
// superseding load or resize can never leave stray players behind.

use std::sync::Arc;
use std::time::Duration;

use super::models::{SlotId, StreamEntry, MAX_DIMENSION};
use super::presets::PresetEntry;
use super::state::SharedMultiview;
use super::surface::{SurfaceEvent, SurfaceSink};

/// Delay between successive starts within one apply call.
pub const STAGGER_MS: u64 = 500;

/// Convert positional preset entries into slot assignments.
///
/// Preset entries are positional: entry i maps to slot i+1. Entries with a
/// blank URL leave their slot empty; entries beyond capacity are dropped.
pub fn entries_from_preset(streams: Vec<PresetEntry>, capacity: u8) -> Vec<StreamEntry> {
    let capacity = capacity.min(MAX_DIMENSION * MAX_DIMENSION);
    streams
        .into_iter()
        .take(capacity as usize)
        .enumerate()
        .filter(|(_, entry)| !entry.url.trim().is_empty())
        .map(|(i, entry)| {
            let slot = SlotId::new(i as u8 + 1).expect("capacity within slot bounds");
            StreamEntry::new(slot, entry.url.trim(), entry.name)
        })
        .collect()
}

/// Stop every slot, then schedule one staggered start per entry.
///
/// Start invocations are issued in list order but complete interleaved; slots
/// without an entry stay stopped. Returns the number of scheduled starts.
pub async fn apply_entries(
    state: SharedMultiview,
    surface: Arc<dyn SurfaceSink>,
    entries: Vec<StreamEntry>,
) -> usize {
    let generation = {
        let mut mv = state.lock().await;
        let generation = mv.bump_generation();
        mv.clear_all(surface.as_ref());
        generation
    };

    let count = entries.len();
    eprintln!("[Loader] Applying {} entries (generation {})", count, generation);

    for (i, entry) in entries.into_iter().enumerate() {
        let state = state.clone();
        let surface = surface.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(STAGGER_MS * i as u64)).await;

            let mut mv = state.lock().await;
            if mv.generation() != generation {
                eprintln!(
                    "[Loader] Skipping stale start for {} (generation {} superseded)",
                    entry.index, generation
                );
                return;
            }
            if let Err(e) = mv.start_slot(surface.as_ref(), entry.index, &entry.url, &entry.name) {
                eprintln!("[Loader] Failed to start {}: {}", entry.index, e);
            }
        });
    }

    surface.emit(SurfaceEvent::notify(
        format!("Loaded {} stream(s)", count),
        false,
    ));
    count
}
