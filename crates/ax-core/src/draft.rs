use thiserror::Error;

use crate::{EventRecord, EventType, Job, JobType};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DraftError::MissingField(field));
    }
    Ok(trimmed)
}

/// Comma-separated form input split into cleaned list entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form payload for posting a job. Validation is synchronous and happens
/// before any state mutation: a rejected draft leaves no partial changes.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub description: String,
    /// Comma separated, as typed into the form.
    pub requirements: String,
    pub application_url: Option<String>,
    pub company_logo: Option<String>,
}

impl JobDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        require(&self.title, "title")?;
        require(&self.company, "company")?;
        require(&self.location, "location")?;
        require(&self.description, "description")?;
        Ok(())
    }

    /// Build the job under the given fresh id. New posts are stamped
    /// "Just now" so they normalize to age 0.
    pub fn build(self, id: String, posted_by: Option<String>) -> Result<Job, DraftError> {
        self.validate()?;
        Ok(Job {
            id,
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            company_logo: self.company_logo.filter(|url| !url.trim().is_empty()),
            location: self.location.trim().to_string(),
            job_type: self.job_type,
            posted_date: "Just now".to_string(),
            description: self.description.trim().to_string(),
            requirements: split_list(&self.requirements),
            posted_by_alumni_id: posted_by,
            application_url: self.application_url.filter(|url| !url.trim().is_empty()),
            is_ai_generated: false,
        })
    }
}

/// Form payload for creating an event.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub location: String,
    pub event_type: EventType,
    pub description: String,
    pub image: Option<String>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        require(&self.title, "title")?;
        require(&self.date, "date")?;
        require(&self.location, "location")?;
        require(&self.description, "description")?;
        Ok(())
    }

    pub fn build(self, id: String) -> Result<EventRecord, DraftError> {
        self.validate()?;
        Ok(EventRecord {
            id,
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            location: self.location.trim().to_string(),
            event_type: self.event_type,
            attendees: 0,
            image: self.image.filter(|url| !url.trim().is_empty()),
            description: self.description.trim().to_string(),
            attendee_ids: Vec::new(),
        })
    }
}
