use crate::automation::request::TurnInCandidate;
use crate::client::VisibleEntry;
use std::cmp::Ordering;

/// Turns the delivery list into candidates, applying the active bonus
/// multiplier. Rounding is half-away-from-zero, matching the client's own
/// displayed values.
pub fn build_candidates(entries: &[VisibleEntry], multiplier: f64) -> Vec<TurnInCandidate> {
    entries
        .iter()
        .map(|entry| TurnInCandidate {
            item_id: entry.item_id,
            name: entry.name.clone(),
            value_with_bonus: (f64::from(entry.raw_value) * multiplier).round() as u32,
            value_without_bonus: entry.raw_value,
            ui_category: entry.ui_category,
        })
        .collect()
}

/// Total order over candidates: best value first, then UI category, then
/// item id. Deterministic for any input multiset, idempotent under
/// re-sorting.
pub fn ranked(mut candidates: Vec<TurnInCandidate>) -> Vec<TurnInCandidate> {
    candidates.sort_by(compare);
    candidates
}

fn compare(a: &TurnInCandidate, b: &TurnInCandidate) -> Ordering {
    b.value_with_bonus
        .cmp(&a.value_with_bonus)
        .then_with(|| a.ui_category.cmp(&b.ui_category))
        .then_with(|| a.item_id.cmp(&b.item_id))
}
