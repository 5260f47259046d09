// Multiview core - grid, registry, lifecycle and bulk config I/O

pub mod classifier;
pub mod csv;
pub mod dialog;
pub mod errors;
pub mod grid;
pub mod lifecycle;
pub mod loader;
pub mod models;
pub mod presets;
pub mod registry;
pub mod state;
pub mod surface;
pub mod utils;

pub use errors::{FaultKind, MultiviewError};
pub use models::{GridSize, PlayerInstance, SlotId, StreamEntry, SystemInfo};
pub use presets::{HttpPresetStore, PresetEntry, PresetStore};
pub use registry::SlotRegistry;
pub use state::{Multiview, SharedMultiview};
pub use surface::{SurfaceEvent, SurfaceSink, WebviewSurface};
