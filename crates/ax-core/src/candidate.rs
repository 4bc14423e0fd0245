use chrono::NaiveDate;

use crate::date::{age_in_days, normalize_age, parse_event_date};
use crate::{EventRecord, Job, UserProfile};

/// Searchable attribute groups a free-text predicate can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Organization,
    Description,
    Skills,
    Location,
}

/// When a candidate was posted or occurs, for the recency comparator.
#[derive(Debug, Clone, PartialEq)]
pub enum Recency {
    /// Relative-age string ("2 days ago"), normalized via the fixed
    /// vocabulary in [`crate::date::normalize_age`].
    Relative(String),
    Absolute(NaiveDate),
    Unknown,
}

impl Recency {
    /// Comparable age in days. `today` is threaded in explicitly so callers
    /// stay pure; unknown recency sorts worst.
    pub fn age_in_days(&self, today: NaiveDate) -> i64 {
        match self {
            Recency::Relative(raw) => normalize_age(raw),
            Recency::Absolute(date) => age_in_days(*date, today),
            Recency::Unknown => crate::date::AGE_SENTINEL_DAYS,
        }
    }
}

/// The seam the filter and ranking stages work through. A candidate is any
/// domain entity subject to filtering/ranking: a job, an event, or a mentor.
pub trait Candidate: Clone {
    /// Stable unique identifier; the sole join key to relevance data.
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    /// Text values behind one searchable field group. List fields yield one
    /// entry per element so a term matches within elements, not across them.
    fn search_text(&self, field: SearchField) -> Vec<&str>;

    /// Designated classification field for the categorical predicate, if the
    /// entity has one.
    fn classification(&self) -> Option<&str>;

    fn recency(&self) -> Recency;
}

impl crate::JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            crate::JobType::FullTime => "Full-time",
            crate::JobType::Internship => "Internship",
            crate::JobType::PartTime => "Part-time",
            crate::JobType::Contract => "Contract",
        }
    }
}

impl crate::EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            crate::EventType::Webinar => "Webinar",
            crate::EventType::Reunion => "Reunion",
            crate::EventType::Workshop => "Workshop",
            crate::EventType::Networking => "Networking",
        }
    }
}

impl Candidate for Job {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn search_text(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title => vec![self.title.as_str()],
            SearchField::Organization => vec![self.company.as_str()],
            SearchField::Description => vec![self.description.as_str()],
            SearchField::Skills => self.requirements.iter().map(String::as_str).collect(),
            SearchField::Location => vec![self.location.as_str()],
        }
    }

    fn classification(&self) -> Option<&str> {
        Some(self.job_type.as_str())
    }

    fn recency(&self) -> Recency {
        Recency::Relative(self.posted_date.clone())
    }
}

impl Candidate for EventRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn search_text(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title => vec![self.title.as_str()],
            SearchField::Organization => Vec::new(),
            SearchField::Description => vec![self.description.as_str()],
            SearchField::Skills => Vec::new(),
            SearchField::Location => vec![self.location.as_str()],
        }
    }

    fn classification(&self) -> Option<&str> {
        Some(self.event_type.as_str())
    }

    fn recency(&self) -> Recency {
        match parse_event_date(&self.date) {
            Some(date) => Recency::Absolute(date),
            None => Recency::Unknown,
        }
    }
}

/// Alumni profiles double as mentor candidates.
impl Candidate for UserProfile {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        self.job_title.as_deref().unwrap_or(&self.name)
    }

    fn search_text(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title => vec![self.title()],
            SearchField::Organization => self.company.as_deref().into_iter().collect(),
            SearchField::Description => vec![self.bio.as_str()],
            SearchField::Skills => self
                .skills
                .iter()
                .chain(self.interests.iter())
                .chain(self.mentorship_topics.iter().flatten())
                .map(String::as_str)
                .collect(),
            SearchField::Location => self.location.as_deref().into_iter().collect(),
        }
    }

    fn classification(&self) -> Option<&str> {
        self.department.as_deref()
    }

    fn recency(&self) -> Recency {
        Recency::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job {
            id: "j1".into(),
            title: "Frontend Intern".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: crate::JobType::Internship,
            posted_date: "2 days ago".into(),
            description: "Build UI".into(),
            requirements: vec!["React".into(), "TypeScript".into()],
            ..Job::default()
        }
    }

    #[test]
    fn job_skill_fields_yield_one_entry_per_requirement() {
        let job = job();
        assert_eq!(job.search_text(SearchField::Skills), vec!["React", "TypeScript"]);
        assert_eq!(job.classification(), Some("Internship"));
    }

    #[test]
    fn job_recency_uses_relative_age() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(job().recency().age_in_days(today), 2);
    }

    #[test]
    fn event_recency_parses_absolute_dates() {
        let event = EventRecord {
            id: "e1".into(),
            title: "Reunion".into(),
            date: "Nov 28, 2024".into(),
            ..EventRecord::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(event.recency().age_in_days(today), 3);

        let unknown = EventRecord {
            date: "TBD".into(),
            ..event
        };
        assert_eq!(unknown.recency().age_in_days(today), crate::date::AGE_SENTINEL_DAYS);
    }

    #[test]
    fn mentor_candidates_search_skills_and_topics() {
        let mentor = UserProfile {
            id: "a1".into(),
            name: "Dana".into(),
            role: crate::UserRole::Alumni,
            skills: vec!["Rust".into()],
            interests: vec!["Compilers".into()],
            mentorship_topics: Some(vec!["Career switching".into()]),
            ..UserProfile::default()
        };

        assert_eq!(
            mentor.search_text(SearchField::Skills),
            vec!["Rust", "Compilers", "Career switching"]
        );
    }
}
