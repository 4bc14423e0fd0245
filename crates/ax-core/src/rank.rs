use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::candidate::Candidate;
use crate::overlay::RelevanceOverlay;

/// Display ordering for the merged candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum SortMode {
    #[strum(serialize = "Relevance")]
    ByRelevance,
    #[default]
    #[strum(serialize = "Date")]
    ByRecency,
}

/// Ranking merge: orders the filtered candidates by the requested mode.
///
/// `ByRelevance` with an overlay sorts descending by `score or 0`; ties
/// (including the common "both unscored" case) fall through to the recency
/// comparator so the order stays deterministic. `ByRecency` sorts ascending
/// by normalized age in days. Both paths are stable: candidates with equal
/// keys keep their relative input order. Selecting `ByRelevance` before any
/// overlay exists degrades to the recency ordering.
///
/// Pure: identical inputs produce identical output order and the input
/// sequence is never mutated. `today` anchors absolute-date ages.
pub fn rank<C: Candidate>(
    candidates: &[C],
    overlay: Option<&RelevanceOverlay>,
    mode: SortMode,
    today: NaiveDate,
) -> Vec<C> {
    let mut ordered: Vec<C> = candidates.to_vec();

    // Vec::sort_by is stable; the determinism guarantee relies on it.
    ordered.sort_by(|a, b| {
        if mode == SortMode::ByRelevance {
            if let Some(overlay) = overlay {
                let score_a = overlay.score_for(a.id());
                let score_b = overlay.score_for(b.id());
                match score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
        }

        let age_a = a.recency().age_in_days(today);
        let age_b = b.recency().age_in_days(today);
        age_a.cmp(&age_b)
    });

    ordered
}
