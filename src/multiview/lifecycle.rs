// Player lifecycle manager - at most one live player per slot
//
// Owns the embedded-widget readiness protocol: while the widget API script is
// loading, (video id, slot) pairs queue up and are drained once on readiness.

use std::collections::VecDeque;

use super::classifier::{self, StreamSource};
use super::errors::{FaultKind, MultiviewError};
use super::models::{GridSize, PlayerInstance, SlotId};
use super::registry::SlotRegistry;
use super::surface::{SurfaceEvent, SurfaceSink};

/// Embedded-widget API readiness state.
#[derive(Debug, Default)]
struct WidgetApiState {
    ready: bool,
    api_requested: bool,
    pending: VecDeque<(String, SlotId)>,
}

#[derive(Debug, Default)]
pub struct LifecycleManager {
    widget: WidgetApiState,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a stream to a slot, tearing down whatever player the slot held.
    ///
    /// The slot must resolve to a placeholder in the current grid and the URL
    /// must be non-empty. A YouTube URL becomes an embedded-widget instance
    /// (queued if the widget API is still loading); anything else is handed to
    /// the adaptive-stream engine.
    pub fn start(
        &mut self,
        grid: GridSize,
        registry: &mut SlotRegistry,
        surface: &dyn SurfaceSink,
        slot: SlotId,
        url: &str,
        name: &str,
    ) -> Result<(), MultiviewError> {
        if !grid.contains(slot) {
            return Err(MultiviewError::InvalidSlot(slot.to_string()));
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(MultiviewError::EmptyUrl);
        }

        // At-most-one-active: destroy the previous instance first.
        if let Some(prev) = registry.remove(slot) {
            eprintln!("[Lifecycle] Replacing {} player on {}", prev.kind(), slot);
            surface.emit(SurfaceEvent::Unmount { slot });
        }

        match classifier::classify(url) {
            StreamSource::EmbeddedVideo(video_id) => {
                let mounted = self.widget.ready;
                registry.insert(
                    slot,
                    PlayerInstance::EmbeddedWidget {
                        video_id: video_id.clone(),
                        url: url.to_string(),
                        name: name.to_string(),
                        mounted,
                    },
                );
                if mounted {
                    eprintln!("[Lifecycle] Mounting widget {} on {}", video_id, slot);
                    surface.emit(SurfaceEvent::MountWidget {
                        slot,
                        video_id,
                        name: name.to_string(),
                    });
                } else {
                    eprintln!("[Lifecycle] Widget API not ready, queueing {} for {}", video_id, slot);
                    self.widget.pending.push_back((video_id, slot));
                    if !self.widget.api_requested {
                        self.widget.api_requested = true;
                        surface.emit(SurfaceEvent::LoadWidgetApi);
                    }
                }
            }
            StreamSource::AdaptiveStream => {
                eprintln!("[Lifecycle] Mounting hls source on {}: {}", slot, url);
                registry.insert(
                    slot,
                    PlayerInstance::AdaptiveStream {
                        url: url.to_string(),
                        name: name.to_string(),
                    },
                );
                surface.emit(SurfaceEvent::MountHls {
                    slot,
                    url: url.to_string(),
                    name: name.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Tear down whatever player a slot holds. No-op on an empty slot.
    pub fn stop(&mut self, registry: &mut SlotRegistry, surface: &dyn SurfaceSink, slot: SlotId) {
        match registry.remove(slot) {
            Some(player) => {
                eprintln!("[Lifecycle] Stopping {} player on {}", player.kind(), slot);
                surface.emit(SurfaceEvent::Unmount { slot });
            }
            None => {
                eprintln!("[Lifecycle] Stop on empty {}, nothing to do", slot);
            }
        }
    }

    /// Tear down every registered player.
    pub fn clear_all(&mut self, registry: &mut SlotRegistry, surface: &dyn SurfaceSink) {
        for (slot, player) in registry.drain_all() {
            eprintln!("[Lifecycle] Stopping {} player on {}", player.kind(), slot);
            surface.emit(SurfaceEvent::Unmount { slot });
        }
    }

    /// Route a fault reported by a playback engine.
    ///
    /// Environment-unsupported empties the slot and degrades silently. Fatal
    /// network faults get a reload-source retry, fatal media faults an
    /// in-place recovery; any other fatal fault tears the slot down. Non-fatal
    /// faults are logged only.
    pub fn handle_fault(
        &mut self,
        registry: &mut SlotRegistry,
        surface: &dyn SurfaceSink,
        slot: SlotId,
        detail: &str,
        fatal: bool,
    ) {
        if !registry.contains(slot) {
            eprintln!("[Lifecycle] Fault for empty {}, ignoring: {}", slot, detail);
            return;
        }

        let kind = FaultKind::detect(detail);
        eprintln!(
            "[Lifecycle] Engine fault on {}: kind={} fatal={} detail={}",
            slot, kind, fatal, detail
        );

        if kind == FaultKind::Unsupported {
            // Adaptive engine unavailable here: leave the slot empty.
            registry.remove(slot);
            surface.emit(SurfaceEvent::Unmount { slot });
            return;
        }

        if !fatal {
            return;
        }

        match kind {
            FaultKind::Network => surface.emit(SurfaceEvent::ReloadSource { slot }),
            FaultKind::Media => surface.emit(SurfaceEvent::RecoverMedia { slot }),
            _ => self.stop(registry, surface, slot),
        }
    }

    /// Drain the pending widget queue once the widget API reports ready.
    ///
    /// Pairs whose slot has since been reassigned or emptied are discarded;
    /// duplicate readiness notifications are ignored.
    pub fn widget_api_ready(&mut self, registry: &mut SlotRegistry, surface: &dyn SurfaceSink) {
        if self.widget.ready {
            eprintln!("[Lifecycle] Duplicate widget API ready notification, ignoring");
            return;
        }
        self.widget.ready = true;

        while let Some((video_id, slot)) = self.widget.pending.pop_front() {
            match registry.get_mut(slot) {
                Some(PlayerInstance::EmbeddedWidget {
                    video_id: current,
                    name,
                    mounted,
                    ..
                }) if *current == video_id && !*mounted => {
                    *mounted = true;
                    let name = name.clone();
                    eprintln!("[Lifecycle] Mounting queued widget {} on {}", video_id, slot);
                    surface.emit(SurfaceEvent::MountWidget {
                        slot,
                        video_id,
                        name,
                    });
                }
                _ => {
                    eprintln!("[Lifecycle] Discarding stale widget {} for {}", video_id, slot);
                }
            }
        }
    }

    /// Whether the embedded-widget API has reported ready.
    pub fn widget_ready(&self) -> bool {
        self.widget.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiview::surface::testing::RecordingSurface;

    fn slot(i: u8) -> SlotId {
        SlotId::new(i).unwrap()
    }

    fn setup() -> (LifecycleManager, SlotRegistry, RecordingSurface) {
        (LifecycleManager::new(), SlotRegistry::new(), RecordingSurface::new())
    }

    #[test]
    fn test_start_hls_registers_and_mounts() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "http://a.m3u8", "Alice")
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            surface.events(),
            vec![SurfaceEvent::MountHls {
                slot: slot(1),
                url: "http://a.m3u8".into(),
                name: "Alice".into(),
            }]
        );
    }

    #[test]
    fn test_start_twice_keeps_one_instance() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "http://a.m3u8", "")
            .unwrap();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "http://b.m3u8", "")
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(slot(1)).unwrap().url(), "http://b.m3u8");
        assert_eq!(surface.channels(), vec!["mount-hls", "unmount", "mount-hls"]);
    }

    #[test]
    fn test_start_outside_grid_rejected() {
        let (mut lifecycle, mut registry, surface) = setup();
        let err = lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(5), "http://a.m3u8", "")
            .unwrap_err();
        assert!(matches!(err, MultiviewError::InvalidSlot(_)));
        assert!(registry.is_empty());
        assert!(surface.events().is_empty());
    }

    #[test]
    fn test_start_empty_url_rejected() {
        let (mut lifecycle, mut registry, surface) = setup();
        let err = lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "  ", "")
            .unwrap_err();
        assert!(matches!(err, MultiviewError::EmptyUrl));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(2), "http://a.m3u8", "")
            .unwrap();

        lifecycle.stop(&mut registry, &surface, slot(2));
        assert!(registry.is_empty());
        assert_eq!(surface.channels(), vec!["mount-hls", "unmount"]);

        // Second stop is a no-op.
        lifecycle.stop(&mut registry, &surface, slot(2));
        assert_eq!(surface.channels(), vec!["mount-hls", "unmount"]);
    }

    #[test]
    fn test_widget_queued_until_api_ready() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "https://youtu.be/abc123", "Cam")
            .unwrap();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(2), "https://youtu.be/def456", "")
            .unwrap();

        // API script requested once, nothing mounted yet.
        assert_eq!(surface.channels(), vec!["load-widget-api"]);

        lifecycle.widget_api_ready(&mut registry, &surface);
        assert_eq!(
            surface.channels(),
            vec!["load-widget-api", "mount-widget", "mount-widget"]
        );
    }

    #[test]
    fn test_widget_mounts_directly_once_ready() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle.widget_api_ready(&mut registry, &surface);
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "https://youtu.be/abc123", "")
            .unwrap();
        assert_eq!(surface.channels(), vec!["mount-widget"]);
    }

    #[test]
    fn test_stale_widget_pair_discarded() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "https://youtu.be/abc123", "")
            .unwrap();
        // Slot reassigned to an hls source before the API came up.
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "http://a.m3u8", "")
            .unwrap();

        lifecycle.widget_api_ready(&mut registry, &surface);
        let channels = surface.channels();
        assert!(!channels.contains(&"mount-widget"));
    }

    #[test]
    fn test_duplicate_ready_drains_once() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "https://youtu.be/abc123", "")
            .unwrap();
        lifecycle.widget_api_ready(&mut registry, &surface);
        lifecycle.widget_api_ready(&mut registry, &surface);
        let mounts = surface
            .channels()
            .iter()
            .filter(|c| **c == "mount-widget")
            .count();
        assert_eq!(mounts, 1);
    }

    #[test]
    fn test_fault_routing() {
        let (mut lifecycle, mut registry, surface) = setup();
        for i in 1..=3 {
            lifecycle
                .start(GridSize::Two, &mut registry, &surface, slot(i), "http://a.m3u8", "")
                .unwrap();
        }
        surface.take();

        lifecycle.handle_fault(&mut registry, &surface, slot(1), "networkError", true);
        lifecycle.handle_fault(&mut registry, &surface, slot(2), "mediaError", true);
        lifecycle.handle_fault(&mut registry, &surface, slot(3), "keySystemError", true);

        assert_eq!(
            surface.channels(),
            vec!["reload-source", "recover-media", "unmount"]
        );
        // Retried slots stay registered; the fatal-other slot is gone.
        assert!(registry.contains(slot(1)));
        assert!(registry.contains(slot(2)));
        assert!(!registry.contains(slot(3)));
    }

    #[test]
    fn test_fault_routing_with_composed_details() {
        // The webview reports "<type> <details>"; a media fault whose detail
        // mentions the manifest must still get in-place recovery.
        let (mut lifecycle, mut registry, surface) = setup();
        for i in 1..=2 {
            lifecycle
                .start(GridSize::Two, &mut registry, &surface, slot(i), "http://a.m3u8", "")
                .unwrap();
        }
        surface.take();

        lifecycle.handle_fault(
            &mut registry,
            &surface,
            slot(1),
            "mediaError manifestIncompatibleCodecsError",
            true,
        );
        lifecycle.handle_fault(
            &mut registry,
            &surface,
            slot(2),
            "networkError manifestLoadError",
            true,
        );

        assert_eq!(surface.channels(), vec!["recover-media", "reload-source"]);
        assert!(registry.contains(slot(1)));
        assert!(registry.contains(slot(2)));
    }

    #[test]
    fn test_unsupported_empties_slot() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "http://a.m3u8", "")
            .unwrap();
        surface.take();

        lifecycle.handle_fault(
            &mut registry,
            &surface,
            slot(1),
            "HLS is not supported in this browser",
            false,
        );
        assert!(!registry.contains(slot(1)));
        assert_eq!(surface.channels(), vec!["unmount"]);
    }

    #[test]
    fn test_non_fatal_fault_logged_only() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle
            .start(GridSize::Two, &mut registry, &surface, slot(1), "http://a.m3u8", "")
            .unwrap();
        surface.take();

        lifecycle.handle_fault(&mut registry, &surface, slot(1), "bufferStalledError", false);
        assert!(surface.events().is_empty());
        assert!(registry.contains(slot(1)));
    }

    #[test]
    fn test_fault_on_empty_slot_ignored() {
        let (mut lifecycle, mut registry, surface) = setup();
        lifecycle.handle_fault(&mut registry, &surface, slot(1), "networkError", true);
        assert!(surface.events().is_empty());
    }
}
