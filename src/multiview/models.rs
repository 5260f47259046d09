// Common data models for the multiview grid

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::MultiviewError;

/// Largest supported grid dimension (4x4).
pub const MAX_DIMENSION: u8 = 4;

/// Identifier of one grid cell, 1-indexed.
///
/// Renders as `stream<N>` in the webview; the matching container element is
/// `stream<N>-container`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(u8);

impl SlotId {
    pub fn new(index: u8) -> Result<Self, MultiviewError> {
        if index == 0 || index > MAX_DIMENSION * MAX_DIMENSION {
            return Err(MultiviewError::InvalidSlot(format!("stream{}", index)));
        }
        Ok(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// DOM id of the slot's video element (`stream<N>`).
    pub fn element_id(self) -> String {
        format!("stream{}", self.0)
    }

    /// DOM id of the slot's placeholder container (`stream<N>-container`).
    pub fn container_id(self) -> String {
        format!("stream{}-container", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream{}", self.0)
    }
}

/// Grid dimension; slot count is the dimension squared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridSize {
    Two,
    Three,
    #[default]
    Four,
}

impl GridSize {
    pub fn from_dimension(n: u8) -> Result<Self, MultiviewError> {
        match n {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(MultiviewError::InvalidGridSize(other)),
        }
    }

    pub fn dimension(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    pub fn slot_count(self) -> u8 {
        self.dimension() * self.dimension()
    }

    pub fn contains(self, slot: SlotId) -> bool {
        slot.index() <= self.slot_count()
    }

    /// All slots of the grid in display order (stream1 first).
    pub fn slots(self) -> impl Iterator<Item = SlotId> {
        (1..=self.slot_count()).map(SlotId)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.dimension())
    }
}

/// A live playback backend bound to one slot.
///
/// Exactly one variant per slot at any time; teardown is dispatched explicitly
/// on the variant rather than duck-typed on the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInstance {
    /// hls.js engine playing a network manifest in the webview.
    AdaptiveStream { url: String, name: String },
    /// YouTube IFrame player. `mounted` is false while the widget API is still
    /// loading and the (video, slot) pair sits in the pending queue.
    EmbeddedWidget {
        video_id: String,
        url: String,
        name: String,
        mounted: bool,
    },
}

impl PlayerInstance {
    pub fn url(&self) -> &str {
        match self {
            Self::AdaptiveStream { url, .. } | Self::EmbeddedWidget { url, .. } => url,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::AdaptiveStream { name, .. } | Self::EmbeddedWidget { name, .. } => name,
        }
    }

    /// Backend label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AdaptiveStream { .. } => "hls",
            Self::EmbeddedWidget { .. } => "widget",
        }
    }
}

/// One stream assignment, the interchange unit for CSV rows and preset JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub index: SlotId,
    pub url: String,
    #[serde(default)]
    pub name: String,
}

impl StreamEntry {
    pub fn new(index: SlotId, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
            name: name.into(),
        }
    }
}

/// Host information for UI display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub ip_addresses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_bounds() {
        assert!(SlotId::new(0).is_err());
        assert!(SlotId::new(1).is_ok());
        assert!(SlotId::new(16).is_ok());
        assert!(SlotId::new(17).is_err());
    }

    #[test]
    fn test_slot_id_dom_ids() {
        let slot = SlotId::new(3).unwrap();
        assert_eq!(slot.element_id(), "stream3");
        assert_eq!(slot.container_id(), "stream3-container");
        assert_eq!(slot.to_string(), "stream3");
    }

    #[test]
    fn test_grid_size_slot_count() {
        assert_eq!(GridSize::from_dimension(2).unwrap().slot_count(), 4);
        assert_eq!(GridSize::from_dimension(3).unwrap().slot_count(), 9);
        assert_eq!(GridSize::from_dimension(4).unwrap().slot_count(), 16);
        assert!(GridSize::from_dimension(5).is_err());
        assert!(GridSize::from_dimension(1).is_err());
    }

    #[test]
    fn test_grid_contains() {
        let grid = GridSize::Two;
        assert!(grid.contains(SlotId::new(4).unwrap()));
        assert!(!grid.contains(SlotId::new(5).unwrap()));
        assert_eq!(grid.slots().count(), 4);
    }

    #[test]
    fn test_player_instance_accessors() {
        let hls = PlayerInstance::AdaptiveStream {
            url: "http://a.m3u8".into(),
            name: "Cam".into(),
        };
        assert_eq!(hls.url(), "http://a.m3u8");
        assert_eq!(hls.name(), "Cam");
        assert_eq!(hls.kind(), "hls");
    }
}
