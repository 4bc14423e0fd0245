pub mod client;
pub mod profile;
pub mod prompts;
pub mod schema;
pub mod session;

pub use client::{GeminiClient, RelevanceClient, RelevanceRuntimeConfig};
pub use profile::{ProfileAnalysis, ProfileAnalyzer, ProfileSuggestion};
pub use prompts::{
    event_request, job_match_request, mentorship_request, JobPreferences, MentorshipPreferences,
    ScoreRequest,
};
pub use schema::RelevanceError;
pub use session::{RefreshOutcome, RelevanceSession, DEFAULT_REFRESH_TIMEOUT};
