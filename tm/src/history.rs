//! Read-only view over the audit history

use crate::state::HistoryEntry;

/// The most recent `n` entries, newest first.
///
/// The log itself is never pruned; this only shapes it for display.
pub fn recent(history: &[HistoryEntry], n: usize) -> Vec<&HistoryEntry> {
    history.iter().rev().take(n).collect()
}
