// Error types for the multiview core

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub enum MultiviewError {
    /// Slot id does not resolve to a placeholder in the current grid
    InvalidSlot(String),

    /// Grid dimension outside the supported 2..=4 range
    InvalidGridSize(u8),

    /// Start requested with an empty URL
    EmptyUrl,

    /// Dialog submitted without a bound target slot
    NoDialogTarget,

    /// Nothing to export (no populated slots)
    NothingToExport,

    /// Preset endpoint returned a non-success status or transport error
    PresetHttp(String),

    /// Preset body did not match the expected JSON shape
    PresetDecode(String),

    /// Local file I/O failed (CSV export)
    Io(String),

    /// Unknown error with details
    Unknown(String),
}

impl fmt::Display for MultiviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlot(slot) => write!(f, "No such slot: {}", slot),
            Self::InvalidGridSize(n) => {
                write!(f, "Unsupported grid size {0}x{0} (expected 2, 3 or 4)", n)
            }
            Self::EmptyUrl => write!(f, "Stream URL must not be empty"),
            Self::NoDialogTarget => write!(f, "Stream dialog is not bound to a slot"),
            Self::NothingToExport => write!(f, "No streams configured to save"),
            Self::PresetHttp(msg) => write!(f, "Preset request failed: {}", msg),
            Self::PresetDecode(msg) => write!(f, "Invalid preset data: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for MultiviewError {}

/// Category of a fault reported by a playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultKind {
    /// The adaptive engine is unavailable in this environment
    Unsupported,
    /// Network-class engine error; the source can be reloaded
    Network,
    /// Media/decode-class engine error; the engine can recover in place
    Media,
    /// Anything else fatal; the slot is torn down
    Other,
}

impl FaultKind {
    /// Categorize raw engine-reported error text.
    ///
    /// hls.js reports `networkError` / `mediaError` type strings plus free-form
    /// detail; the widget reports numeric codes stringified by the frontend.
    pub fn detect(detail: &str) -> Self {
        let lower = detail.to_lowercase();

        if lower.contains("unsupported") || lower.contains("not supported") {
            return Self::Unsupported;
        }

        // The engine's own type token takes priority: hls.js details such as
        // manifestIncompatibleCodecsError can arrive behind a mediaError type.
        if lower.contains("networkerror") {
            return Self::Network;
        }
        if lower.contains("mediaerror") {
            return Self::Media;
        }

        if lower.contains("network") || lower.contains("timeout") || lower.contains("manifest") {
            return Self::Network;
        }

        if lower.contains("media") || lower.contains("decode") || lower.contains("buffer") {
            return Self::Media;
        }

        Self::Other
    }

    /// Whether the engine itself can be asked to recover.
    pub fn is_recoverable(self) -> bool {
        matches!(self, Self::Network | Self::Media)
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "unsupported"),
            Self::Network => write!(f, "network"),
            Self::Media => write!(f, "media"),
            Self::Other => write!(f, "other"),
        }
    }
}
