// Stream configuration dialog binding
//
// One dialog, reused across slots: closed -> open (bound to a slot) -> closed.
// The actual modal lives in the webview; the core tracks the target binding so
// a submit always lands on the slot the dialog was opened for.

use super::models::SlotId;

#[derive(Debug, Default)]
pub struct StreamDialog {
    target: Option<SlotId>,
}

impl StreamDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the dialog to a slot. Re-opening simply rebinds.
    pub fn open(&mut self, slot: SlotId) {
        eprintln!("[Dialog] Open for {}", slot);
        self.target = Some(slot);
    }

    pub fn target(&self) -> Option<SlotId> {
        self.target
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Clear the binding, returning the slot it was bound to.
    pub fn close(&mut self) -> Option<SlotId> {
        self.target.take()
    }
}
