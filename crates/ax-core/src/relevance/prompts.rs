use serde_json::{json, Map, Value};

use crate::{EventRecord, Job, UserProfile};

/// One relevance request: a feature-specific instruction, a serialized
/// subject profile, a serialized candidate list and free-form preferences.
/// Only the fields below are sent to the collaborator; everything else on
/// the records stays local.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    pub instruction: String,
    pub subject: Value,
    pub candidates: Vec<Value>,
    pub preferences: Map<String, Value>,
}

impl ScoreRequest {
    /// Final prompt text sent alongside the structured response schema.
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "{}\n\nSubject: {}\nCandidates: {}\n",
            self.instruction.trim(),
            self.subject,
            Value::Array(self.candidates.clone()),
        );

        if !self.preferences.is_empty() {
            prompt.push_str(&format!(
                "Preferences: {}\n",
                Value::Object(self.preferences.clone())
            ));
        }

        prompt.push_str(
            "\nReturn a JSON array where each element references a candidate by its \
             exact id in candidateId, with matchScore (0-100) and a concise reason.",
        );
        prompt
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPreferences {
    pub job_type: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorshipPreferences {
    pub focus_area: Option<String>,
    pub communication: Option<String>,
    pub availability: Option<String>,
}

fn or_any(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.trim().is_empty()).unwrap_or("Any")
}

fn or_flexible(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("Flexible")
}

/// Job matching: recruiter framing, preferences for type and location.
pub fn job_match_request(
    student: &UserProfile,
    jobs: &[Job],
    prefs: &JobPreferences,
) -> ScoreRequest {
    let candidates = jobs
        .iter()
        .map(|j| {
            json!({
                "id": j.id,
                "title": j.title,
                "company": j.company,
                "description": j.description,
                "requirements": j.requirements,
                "type": j.job_type,
                "location": j.location,
            })
        })
        .collect();

    let subject = json!({
        "skills": student.skills,
        "interests": student.interests,
        "major": student.department,
        "bio": student.bio,
    });

    let mut preferences = Map::new();
    preferences.insert("preferredJobType".into(), or_any(&prefs.job_type).into());
    preferences.insert("preferredLocation".into(), or_any(&prefs.location).into());

    ScoreRequest {
        instruction: "Act as a recruiter matching candidates to jobs. Evaluate the \
                      student profile against the available jobs, prioritizing jobs \
                      that match the preferred job type and location. Return the top \
                      suitable jobs with a match score, and a reason explicitly \
                      listing which of the student's skills matched the job \
                      requirements."
            .into(),
        subject,
        candidates,
        preferences,
    }
}

/// Mentor matching: career-advisor framing, skill complementarity emphasis,
/// communication/availability preferences.
pub fn mentorship_request(
    student: &UserProfile,
    alumni: &[UserProfile],
    prefs: &MentorshipPreferences,
) -> ScoreRequest {
    let candidates = alumni
        .iter()
        .map(|a| {
            json!({
                "id": a.id,
                "name": a.name,
                "job": a.job_title,
                "company": a.company,
                "skills": a.skills,
                "interests": a.interests,
                "mentorshipTopics": a.mentorship_topics,
                "bio": a.bio,
                "location": a.location,
            })
        })
        .collect();

    let focus = prefs
        .focus_area
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or("General Career Advice");

    let subject = json!({
        "name": student.name,
        "major": student.department,
        "skills": student.skills,
        "interests": student.interests,
        "bio": student.bio,
        "requestedFocus": focus,
    });

    let mut preferences = Map::new();
    preferences.insert(
        "communicationStyle".into(),
        or_flexible(&prefs.communication).into(),
    );
    preferences.insert(
        "availability".into(),
        or_flexible(&prefs.availability).into(),
    );

    ScoreRequest {
        instruction: format!(
            "Act as an expert academic career advisor. Analyze the student profile \
             and the list of alumni. The student is specifically looking for help \
             with: \"{focus}\". Prioritize alumni whose skills directly complement \
             the student's current skills, and consider whether each alumnus's \
             location or job context fits the communication and availability \
             preferences. Identify the top 3 best mentorship matches, each with \
             three suggested discussion topics."
        ),
        subject,
        candidates,
        preferences,
    }
}

/// Event recommendations: interests/major/location relevance.
pub fn event_request(user: &UserProfile, events: &[EventRecord]) -> ScoreRequest {
    let candidates = events
        .iter()
        .map(|e| {
            json!({
                "id": e.id,
                "title": e.title,
                "type": e.event_type,
                "description": e.description,
                "location": e.location,
                "date": e.date,
            })
        })
        .collect();

    let subject = json!({
        "interests": user.interests,
        "major": user.department,
        "bio": user.bio,
        "location": user.location,
    });

    ScoreRequest {
        instruction: "Act as an event coordinator. Recommend relevant upcoming events \
                      to the user based on their interests, major, and location, with \
                      a match score indicating how relevant each event is."
            .into(),
        subject,
        candidates,
        preferences: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JobType, UserRole};

    fn student() -> UserProfile {
        UserProfile {
            id: "S-1".into(),
            name: "Sam".into(),
            role: UserRole::Student,
            department: Some("Computer Science".into()),
            skills: vec!["Rust".into()],
            interests: vec!["Systems".into()],
            bio: "Final-year student".into(),
            ..UserProfile::default()
        }
    }

    #[test]
    fn job_requests_carry_only_the_matching_fields() {
        let jobs = vec![Job {
            id: "j1".into(),
            title: "Backend Intern".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: JobType::Internship,
            posted_date: "Just now".into(),
            description: "Build APIs".into(),
            requirements: vec!["Rust".into()],
            posted_by_alumni_id: Some("A-1".into()),
            ..Job::default()
        }];

        let request = job_match_request(&student(), &jobs, &JobPreferences::default());

        assert_eq!(request.candidates.len(), 1);
        let candidate = &request.candidates[0];
        assert_eq!(candidate["id"], "j1");
        assert_eq!(candidate["type"], "Internship");
        // Display-only metadata stays local.
        assert!(candidate.get("postedByAlumniId").is_none());

        assert_eq!(request.preferences["preferredJobType"], "Any");
        assert_eq!(request.preferences["preferredLocation"], "Any");
    }

    #[test]
    fn absent_preferences_fall_back_to_sentinel_defaults() {
        let prefs = MentorshipPreferences {
            focus_area: Some("  ".into()),
            ..MentorshipPreferences::default()
        };
        let request = mentorship_request(&student(), &[], &prefs);

        assert_eq!(request.subject["requestedFocus"], "General Career Advice");
        assert_eq!(request.preferences["communicationStyle"], "Flexible");
        assert_eq!(request.preferences["availability"], "Flexible");
    }

    #[test]
    fn prompt_embeds_subject_candidates_and_preferences() {
        let jobs = vec![Job {
            id: "j1".into(),
            title: "Backend Intern".into(),
            ..Job::default()
        }];
        let prefs = JobPreferences {
            job_type: Some("Internship".into()),
            location: None,
        };

        let prompt = job_match_request(&student(), &jobs, &prefs).prompt();

        assert!(prompt.contains("Subject:"));
        assert!(prompt.contains("\"j1\""));
        assert!(prompt.contains("\"preferredJobType\":\"Internship\""));
        assert!(prompt.contains("candidateId"));
    }

    #[test]
    fn event_requests_have_no_preference_object() {
        let request = event_request(&student(), &[]);
        assert!(request.preferences.is_empty());
        assert!(!request.prompt().contains("Preferences:"));
    }
}
