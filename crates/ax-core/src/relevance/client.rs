use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::prompts::ScoreRequest;
use super::schema::{self, RelevanceError};
use crate::overlay::RelevanceEntry;

/// The §6 collaborator contract: one at-most-once scoring call. Failures are
/// caller-visible; there is no retry policy.
pub trait RelevanceClient {
    fn score(
        &self,
        request: &ScoreRequest,
    ) -> impl std::future::Future<Output = Result<Vec<RelevanceEntry>, RelevanceError>> + Send;
}

/// Runtime configuration for the AI collaborator, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceRuntimeConfig {
    pub enabled: bool,
    pub model: String,
    pub endpoint: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

fn default_endpoint(model: &str) -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent")
}

impl Default for RelevanceRuntimeConfig {
    fn default() -> Self {
        let model = "gemini-2.5-flash".to_string();
        Self {
            enabled: true,
            endpoint: default_endpoint(&model),
            model,
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl RelevanceRuntimeConfig {
    pub fn from_env() -> Self {
        fn parse_bool(key: &str, default: bool) -> bool {
            match std::env::var(key) {
                Ok(val) => matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
                Err(_) => default,
            }
        }

        fn parse_u64(key: &str, default: u64) -> u64 {
            std::env::var(key)
                .ok()
                .and_then(|raw| raw.parse::<u64>().ok())
                .unwrap_or(default)
        }

        let model =
            std::env::var("AX_AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
        let endpoint =
            std::env::var("AX_AI_ENDPOINT").unwrap_or_else(|_| default_endpoint(&model));
        let api_key = std::env::var("AX_AI_API_KEY")
            .ok()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .unwrap_or_default();

        Self {
            enabled: parse_bool("AX_AI_ENABLED", true),
            model,
            endpoint,
            api_key,
            timeout_secs: parse_u64("AX_AI_TIMEOUT_SECONDS", 30),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP client for the Gemini `generateContent` endpoint with structured
/// JSON output.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: RelevanceRuntimeConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
    }
}

impl GeminiClient {
    pub fn new(config: RelevanceRuntimeConfig) -> Result<Self, RelevanceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| RelevanceError::Transport(err.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, RelevanceError> {
        Self::new(RelevanceRuntimeConfig::from_env())
    }

    pub fn config(&self) -> &RelevanceRuntimeConfig {
        &self.config
    }

    /// One structured-output call; returns the model's JSON text verbatim.
    pub(crate) async fn generate_json(
        &self,
        prompt: &str,
        response_schema: Value,
    ) -> Result<String, RelevanceError> {
        if !self.config.enabled {
            return Err(RelevanceError::Disabled);
        }
        if self.config.api_key.is_empty() {
            return Err(RelevanceError::MissingApiKey);
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            },
        });

        debug!(model = %self.config.model, "sending relevance request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| RelevanceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelevanceError::Transport(format!(
                "relevance endpoint returned {status}"
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| RelevanceError::InvalidResponse(err.to_string()))?;

        payload
            .first_text()
            .ok_or_else(|| RelevanceError::InvalidResponse("response carried no text part".into()))
    }
}

impl RelevanceClient for GeminiClient {
    async fn score(
        &self,
        request: &ScoreRequest,
    ) -> Result<Vec<RelevanceEntry>, RelevanceError> {
        let raw = self
            .generate_json(&request.prompt(), schema::score_response_schema())
            .await?;
        schema::validate_entries(&raw)
    }
}
