// Rendering surface seam between the core and the webview
//
// The core never touches the DOM; it emits typed events and the webview acts
// on them. Tests swap in a recording sink to assert on the emitted sequence.

use serde::Serialize;
use tauri::Emitter;

use super::models::SlotId;

/// Instruction for the webview surface.
///
/// Serialized untagged: each event is published on its own channel (see
/// [`SurfaceEvent::channel`]) and the payload carries only the variant fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SurfaceEvent {
    /// Tear down the whole grid and rebuild `size`² placeholders.
    RebuildGrid { size: u8 },
    /// Attach the adaptive-stream engine to a slot.
    MountHls {
        slot: SlotId,
        url: String,
        name: String,
    },
    /// Create an embedded-widget player in a slot (widget API is ready).
    MountWidget {
        slot: SlotId,
        #[serde(rename = "videoId")]
        video_id: String,
        name: String,
    },
    /// Inject the embedded-widget API script (requested at most once).
    LoadWidgetApi,
    /// Destroy whatever player a slot holds and reset it to placeholder state.
    Unmount { slot: SlotId },
    /// Ask the adaptive engine to reload its source (network-class fault).
    ReloadSource { slot: SlotId },
    /// Ask the adaptive engine to recover in place (media-class fault).
    RecoverMedia { slot: SlotId },
    /// Show a user notification.
    Notify {
        message: String,
        #[serde(rename = "isError")]
        is_error: bool,
    },
}

impl SurfaceEvent {
    pub fn channel(&self) -> &'static str {
        match self {
            Self::RebuildGrid { .. } => "rebuild-grid",
            Self::MountHls { .. } => "mount-hls",
            Self::MountWidget { .. } => "mount-widget",
            Self::LoadWidgetApi => "load-widget-api",
            Self::Unmount { .. } => "unmount",
            Self::ReloadSource { .. } => "reload-source",
            Self::RecoverMedia { .. } => "recover-media",
            Self::Notify { .. } => "notify",
        }
    }

    pub fn notify(message: impl Into<String>, is_error: bool) -> Self {
        Self::Notify {
            message: message.into(),
            is_error,
        }
    }
}

/// Sink for surface events.
pub trait SurfaceSink: Send + Sync {
    fn emit(&self, event: SurfaceEvent);
}

/// Production sink backed by the Tauri app handle.
pub struct WebviewSurface {
    app_handle: tauri::AppHandle,
}

impl WebviewSurface {
    pub fn new(app_handle: tauri::AppHandle) -> Self {
        Self { app_handle }
    }
}

impl SurfaceSink for WebviewSurface {
    fn emit(&self, event: SurfaceEvent) {
        let channel = event.channel();
        let _ = self.app_handle.emit(channel, event);
    }
}
