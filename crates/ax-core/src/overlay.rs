use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One relevance score for one candidate, as returned by the AI collaborator.
///
/// Score and reason are opaque external signals: they are carried verbatim,
/// used only as a sort key and explanatory text, and never combined
/// arithmetically with any other signal. The id aliases accept the wire
/// shapes of all three matching features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevanceEntry {
    #[serde(alias = "id", alias = "jobId", alias = "eventId", alias = "mentorId")]
    pub candidate_id: String,
    #[serde(alias = "matchScore")]
    pub score: f64,
    pub reason: String,
    /// Mentor matches carry conversation starters; empty elsewhere.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_topics: Vec<String>,
}

/// The most recent AI relevance snapshot, keyed by candidate id.
///
/// Either entirely absent (no AI pass yet) or a wholesale replacement from
/// the latest successful request; never patched incrementally. A candidate
/// missing from the mapping has "no score" — ranking treats that as 0 for
/// tie-breaking only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelevanceOverlay {
    entries: HashMap<String, RelevanceEntry>,
}

impl RelevanceOverlay {
    pub fn from_entries(entries: Vec<RelevanceEntry>) -> Self {
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            // First entry per id wins, matching lookup-by-first-match display.
            map.entry(entry.candidate_id.clone()).or_insert(entry);
        }
        Self { entries: map }
    }

    pub fn get(&self, candidate_id: &str) -> Option<&RelevanceEntry> {
        self.entries.get(candidate_id)
    }

    /// Sort key for ranking: the entry score, or 0 when the candidate has no
    /// entry.
    pub fn score_for(&self, candidate_id: &str) -> f64 {
        self.get(candidate_id).map(|entry| entry.score).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelevanceEntry> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, score: f64) -> RelevanceEntry {
        RelevanceEntry {
            candidate_id: id.into(),
            score,
            reason: format!("reason for {id}"),
            suggested_topics: Vec::new(),
        }
    }

    #[test]
    fn missing_candidates_score_zero() {
        let overlay = RelevanceOverlay::from_entries(vec![entry("j1", 90.0)]);
        assert_eq!(overlay.score_for("j1"), 90.0);
        assert_eq!(overlay.score_for("j2"), 0.0);
        assert!(overlay.get("j2").is_none());
    }

    #[test]
    fn first_entry_wins_on_duplicate_ids() {
        let overlay = RelevanceOverlay::from_entries(vec![entry("j1", 90.0), entry("j1", 10.0)]);
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.score_for("j1"), 90.0);
    }

    #[test]
    fn wire_aliases_deserialize_to_candidate_id() {
        let job: RelevanceEntry =
            serde_json::from_str(r#"{"jobId":"j9","matchScore":73,"reason":"skills overlap"}"#)
                .unwrap();
        assert_eq!(job.candidate_id, "j9");
        assert_eq!(job.score, 73.0);

        let mentor: RelevanceEntry = serde_json::from_str(
            r#"{"mentorId":"a2","matchScore":88,"reason":"shared focus","suggestedTopics":["Interview prep"]}"#,
        )
        .unwrap();
        assert_eq!(mentor.candidate_id, "a2");
        assert_eq!(mentor.suggested_topics, vec!["Interview prep".to_string()]);
    }
}
