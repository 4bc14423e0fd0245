pub mod api;
pub mod candidate;
pub mod date;
pub mod debounce;
pub mod draft;
pub mod filter;
pub mod logging;
pub mod overlay;
pub mod rank;
pub mod relevance;
pub mod saved;
pub mod store;
pub mod sync;

use serde::{Deserialize, Serialize};

// Commonly used data models shared by the filter/rank pipeline, the
// relevance context builders and the HTTP API.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum UserRole {
    #[serde(rename = "STUDENT")]
    #[strum(serialize = "STUDENT")]
    Student,
    #[serde(rename = "ALUMNI")]
    #[strum(serialize = "ALUMNI")]
    Alumni,
    #[serde(rename = "ADMIN")]
    #[strum(serialize = "ADMIN")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    #[strum(serialize = "Full-time")]
    FullTime,
    #[serde(rename = "Internship")]
    #[strum(serialize = "Internship")]
    Internship,
    #[serde(rename = "Part-time")]
    #[strum(serialize = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    #[strum(serialize = "Contract")]
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
pub enum EventType {
    #[default]
    Webinar,
    Reunion,
    Workshop,
    Networking,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// Relative-age string such as "2 days ago" or "Just now".
    pub posted_date: String,
    pub description: String,
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by_alumni_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    /// Absolute date string such as "Dec 10, 2024".
    pub date: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    #[serde(default)]
    pub attendee_ids: Vec<String>,
}

impl EventRecord {
    /// RSVP toggle: registering twice returns the attendee list to its
    /// original state.
    pub fn toggle_attendee(&mut self, user_id: &str) -> bool {
        if let Some(pos) = self.attendee_ids.iter().position(|id| id == user_id) {
            self.attendee_ids.remove(pos);
            self.attendees = self.attendees.saturating_sub(1);
            false
        } else {
            self.attendee_ids.push(user_id.to_string());
            self.attendees += 1;
            true
        }
    }

    pub fn is_registered(&self, user_id: &str) -> bool {
        self.attendee_ids.iter().any(|id| id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentorship_topics: Option<Vec<String>>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            role: UserRole::Student,
            email: String::new(),
            avatar: None,
            graduation_year: None,
            department: None,
            company: None,
            job_title: None,
            location: None,
            skills: Vec::new(),
            interests: Vec::new(),
            certifications: None,
            bio: String::new(),
            mentorship_topics: None,
        }
    }
}
