use std::time::Duration;

use thiserror::Error;

use crate::overlay::RelevanceEntry;

#[derive(Debug, Error)]
pub enum RelevanceError {
    #[error("relevance service is disabled")]
    Disabled,
    #[error("relevance api key is missing")]
    MissingApiKey,
    #[error("relevance request failed: {0}")]
    Transport(String),
    #[error("relevance request timed out after {0:?}")]
    Timeout(Duration),
    #[error("relevance response failed validation: {0}")]
    InvalidResponse(String),
    #[error("relevance response contained no entries")]
    EmptyResponse,
}

/// Strip markdown code fences that occasionally leak into model output.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Validate a raw model response against the expected score-array shape.
///
/// The collaborator is untrusted input: the response must parse to an array
/// of `{id-reference, score, reason}` objects, every id must be non-empty and
/// every score a finite number in [0, 100]. Any mismatch is a hard failure
/// and nothing from the response is consumed.
pub fn validate_entries(raw: &str) -> Result<Vec<RelevanceEntry>, RelevanceError> {
    let entries: Vec<RelevanceEntry> = serde_json::from_str(strip_code_fences(raw))
        .map_err(|err| RelevanceError::InvalidResponse(err.to_string()))?;

    for entry in &entries {
        if entry.candidate_id.trim().is_empty() {
            return Err(RelevanceError::InvalidResponse(
                "entry with empty candidate id".into(),
            ));
        }
        if !entry.score.is_finite() || !(0.0..=100.0).contains(&entry.score) {
            return Err(RelevanceError::InvalidResponse(format!(
                "score out of range for {}: {}",
                entry.candidate_id, entry.score
            )));
        }
    }

    Ok(entries)
}

/// Gemini response schema for the candidate-scoring features.
pub fn score_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "candidateId": { "type": "STRING" },
                "matchScore": { "type": "NUMBER", "description": "Score from 0 to 100" },
                "reason": { "type": "STRING" },
                "suggestedTopics": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["candidateId", "matchScore", "reason"]
        }
    })
}
