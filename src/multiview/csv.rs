// CSV import/export for bulk stream configuration
//
// Import format: `name,url` rows, optional header, `#` comments. Export
// format: `slotIndex,url` rows with no header and no name column — the
// asymmetry is inherited behavior (see DESIGN.md) and deliberately kept.

use std::path::PathBuf;

use super::models::{SlotId, StreamEntry, MAX_DIMENSION};
use super::registry::SlotRegistry;

/// File name used for exported configurations.
pub const EXPORT_FILENAME: &str = "multiview_config.csv";

/// A line that looks like a column header rather than data.
///
/// Any line mentioning "link" counts, matching the inherited import behavior.
/// This over-matches: a data row whose URL contains "link" (for example
/// `Cam,http://host/link.m3u8`) is swallowed as a header too. Deliberately
/// kept (see DESIGN.md).
fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.starts_with("name,") || lower.contains("link")
}

/// Parse CSV text into stream entries, numbered sequentially from slot 1.
///
/// Blank lines, `#` comments and header lines are skipped; rows without a URL
/// are skipped; rows beyond `capacity` are silently dropped.
pub fn parse(text: &str, capacity: u8) -> Vec<StreamEntry> {
    let capacity = capacity.min(MAX_DIMENSION * MAX_DIMENSION);
    let mut entries = Vec::new();
    let mut next_index: u8 = 1;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if is_header(line) {
            continue;
        }

        let mut fields = line.split(',');
        let name = fields.next().map(str::trim).unwrap_or("");
        let url = fields.next().map(str::trim).unwrap_or("");
        if url.is_empty() {
            eprintln!("[Csv] Skipping row without URL: {}", line);
            continue;
        }

        if next_index > capacity {
            eprintln!("[Csv] Dropping row beyond grid capacity: {}", line);
            continue;
        }

        // next_index stays within SlotId bounds because capacity does.
        let slot = SlotId::new(next_index).expect("capacity within slot bounds");
        entries.push(StreamEntry::new(slot, url, name));
        next_index += 1;
    }

    entries
}

/// Serialize the populated slots as `slotIndex,url` lines.
pub fn generate(registry: &SlotRegistry) -> String {
    let mut out = String::new();
    for (slot, player) in registry.populated() {
        out.push_str(&format!("{},{}\n", slot.index(), player.url()));
    }
    out
}

/// Default location for exported configurations: the user's download
/// directory, falling back to the working directory.
pub fn default_export_path() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(EXPORT_FILENAME)
}
