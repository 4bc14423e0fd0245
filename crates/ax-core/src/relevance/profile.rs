use serde::{Deserialize, Serialize};
use serde_json::json;

use super::client::GeminiClient;
use super::schema::{strip_code_fences, RelevanceError};
use crate::UserProfile;

/// One actionable improvement suggestion with the skills it relates to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSuggestion {
    pub text: String,
    #[serde(default)]
    pub related_skills: Vec<String>,
}

/// Profile-completeness analysis returned by the AI collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub completeness: f64,
    #[serde(default)]
    pub suggestions: Vec<ProfileSuggestion>,
    #[serde(default)]
    pub missing_fields: Vec<String>,
}

impl ProfileAnalysis {
    /// Degraded fallback shown when analysis is unavailable.
    pub fn degraded() -> Self {
        Self {
            completeness: 50.0,
            suggestions: vec![ProfileSuggestion {
                text: "Could not analyze profile at this time.".into(),
                related_skills: Vec::new(),
            }],
            missing_fields: Vec::new(),
        }
    }
}

/// Fourth AI feature: profile-completeness scoring, under the same
/// validation and failure discipline as candidate scoring.
pub trait ProfileAnalyzer {
    fn analyze(
        &self,
        user: &UserProfile,
    ) -> impl std::future::Future<Output = Result<ProfileAnalysis, RelevanceError>> + Send;
}

pub fn validate_analysis(raw: &str) -> Result<ProfileAnalysis, RelevanceError> {
    let analysis: ProfileAnalysis = serde_json::from_str(strip_code_fences(raw))
        .map_err(|err| RelevanceError::InvalidResponse(err.to_string()))?;

    if !analysis.completeness.is_finite() || !(0.0..=100.0).contains(&analysis.completeness) {
        return Err(RelevanceError::InvalidResponse(format!(
            "completeness out of range: {}",
            analysis.completeness
        )));
    }

    Ok(analysis)
}

fn analysis_prompt(user: &UserProfile) -> String {
    format!(
        "Analyze this user profile for completeness and attractiveness to \
         recruiters and mentors.\n\nProfile: {}\n\nReturn a completeness score \
         from 0-100, specific actionable suggestions each with related \
         single-word skills, and a list of critical missing or under-utilized \
         fields.",
        serde_json::to_value(user).unwrap_or_default()
    )
}

fn analysis_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "completeness": { "type": "NUMBER" },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "relatedSkills": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["text", "relatedSkills"]
                }
            },
            "missingFields": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["completeness", "suggestions", "missingFields"]
    })
}

impl ProfileAnalyzer for GeminiClient {
    async fn analyze(&self, user: &UserProfile) -> Result<ProfileAnalysis, RelevanceError> {
        let raw = self
            .generate_json(&analysis_prompt(user), analysis_response_schema())
            .await?;
        validate_analysis(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_analysis_parses() {
        let raw = r#"{
            "completeness": 72,
            "suggestions": [{"text": "Add projects", "relatedSkills": ["React"]}],
            "missingFields": ["certifications"]
        }"#;

        let analysis = validate_analysis(raw).unwrap();
        assert_eq!(analysis.completeness, 72.0);
        assert_eq!(analysis.suggestions.len(), 1);
        assert_eq!(analysis.missing_fields, vec!["certifications".to_string()]);
    }

    #[test]
    fn out_of_range_completeness_is_rejected() {
        let raw = r#"{"completeness": 140, "suggestions": [], "missingFields": []}"#;
        assert!(matches!(
            validate_analysis(raw),
            Err(RelevanceError::InvalidResponse(_))
        ));
    }

    #[test]
    fn degraded_fallback_matches_the_original_shape() {
        let fallback = ProfileAnalysis::degraded();
        assert_eq!(fallback.completeness, 50.0);
        assert_eq!(fallback.suggestions.len(), 1);
        assert!(fallback.missing_fields.is_empty());
    }

    #[test]
    fn prompt_serializes_the_whole_profile() {
        let user = UserProfile {
            id: "S-1".into(),
            name: "Sam".into(),
            skills: vec!["Rust".into()],
            ..UserProfile::default()
        };
        let prompt = analysis_prompt(&user);
        assert!(prompt.contains("\"name\":\"Sam\""));
        assert!(prompt.contains("\"skills\":[\"Rust\"]"));
    }
}
