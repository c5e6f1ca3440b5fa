use shared_types::{LegalCase, TimelineEntry};

/// Annotate a case's history for display, oldest first.
///
/// Entries are never reordered or dropped; only the final entry is marked
/// latest.
pub fn build_timeline(case: &LegalCase) -> Vec<TimelineEntry> {
    let last = case.history.len().saturating_sub(1);
    case.history
        .iter()
        .enumerate()
        .map(|(i, entry)| TimelineEntry {
            has_order: entry.order.is_some(),
            is_latest: i == last,
            entry: entry.clone(),
        })
        .collect()
}
