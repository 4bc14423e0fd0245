use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

use crate::{UserProfile, UserRole};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),
    #[error("this email is already registered")]
    DuplicateEmail,
    #[error("students must register with a .edu email address")]
    StudentEmailNotEdu,
}

/// Registration payload for `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl RegisterRequest {
    /// Synchronous input validation, before any state mutation.
    pub fn validate<'a>(
        &self,
        existing_emails: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(RegistrationError::MissingField("email"));
        }

        let email = self.email.trim();
        if existing_emails
            .into_iter()
            .any(|existing| existing.eq_ignore_ascii_case(email))
        {
            return Err(RegistrationError::DuplicateEmail);
        }

        if self.role == UserRole::Student && !email.to_lowercase().ends_with(".edu") {
            return Err(RegistrationError::StudentEmailNotEdu);
        }

        Ok(())
    }

    /// Build the stored profile with a freshly minted, role-prefixed id.
    pub fn into_profile(self, graduation_year: i32) -> UserProfile {
        let prefix = match self.role {
            UserRole::Student => "S",
            UserRole::Alumni => "A",
            UserRole::Admin => "ADM",
        };

        UserProfile {
            id: format!("{prefix}-{}", Ulid::new()),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            bio: "I am new here! excited to connect.".to_string(),
            graduation_year: Some(graduation_year),
            department: Some("General".to_string()),
            ..UserProfile::default()
        }
    }
}

/// Write acknowledgement echoed by the persistence API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAck {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: UserRole, email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Sam".into(),
            email: email.into(),
            role,
        }
    }

    #[test]
    fn students_must_register_with_edu_addresses() {
        let err = request(UserRole::Student, "sam@gmail.com")
            .validate([])
            .unwrap_err();
        assert_eq!(err, RegistrationError::StudentEmailNotEdu);

        request(UserRole::Student, "sam@state.edu")
            .validate([])
            .unwrap();
        request(UserRole::Alumni, "sam@gmail.com")
            .validate([])
            .unwrap();
    }

    #[test]
    fn duplicate_emails_are_rejected_case_insensitively() {
        let err = request(UserRole::Alumni, "Sam@Globex.com")
            .validate(["sam@globex.com"])
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateEmail);
    }

    #[test]
    fn empty_fields_are_rejected_before_anything_else() {
        let err = request(UserRole::Alumni, "  ").validate([]).unwrap_err();
        assert_eq!(err, RegistrationError::MissingField("email"));
    }

    #[test]
    fn minted_ids_carry_the_role_prefix() {
        let student = request(UserRole::Student, "sam@state.edu").into_profile(2025);
        assert!(student.id.starts_with("S-"));
        assert_eq!(student.graduation_year, Some(2025));
        assert_eq!(student.department.as_deref(), Some("General"));

        let admin = request(UserRole::Admin, "ops@school.org").into_profile(2025);
        assert!(admin.id.starts_with("ADM-"));
    }
}
