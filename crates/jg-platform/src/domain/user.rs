//! User Entity
//!
//! Accounts with a role. Students apply to jobs; recruiters own companies
//! and manage the applications against their jobs. Users are never
//! hard-deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Recruiter,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Recruiter => "RECRUITER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(Self::Student),
            "RECRUITER" => Ok(Self::Recruiter),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Profile data shown on a user's page and to recruiters reviewing
/// applicants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    /// Durable URL on the media host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,

    /// File name the resume was uploaded with, shown as the link text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_original_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    pub full_name: String,

    /// Unique login identifier.
    pub email: String,

    pub phone_number: String,

    /// Argon2 hash. Persisted, never exposed through the API layer.
    pub password_hash: String,

    pub role: UserRole,

    #[serde(default)]
    pub profile: Profile,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. Only supplied fields change; absent fields keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.bio.is_none()
            && self.skills.is_none()
    }
}

impl User {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            full_name: full_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            password_hash: password_hash.into(),
            role,
            profile: Profile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.profile.avatar_url = Some(url.into());
        self
    }

    pub fn is_recruiter(&self) -> bool {
        self.role == UserRole::Recruiter
    }

    /// Apply a partial update. Supplied fields win, absent fields survive.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(bio) = patch.bio {
            self.profile.bio = Some(bio);
        }
        if let Some(skills) = patch.skills {
            self.profile.skills = skills;
        }
        self.updated_at = Utc::now();
    }

    pub fn set_resume(&mut self, url: impl Into<String>, original_name: impl Into<String>) {
        self.profile.resume_url = Some(url.into());
        self.profile.resume_original_name = Some(original_name.into());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> User {
        User::new("Asha Rao", "asha@example.com", "9999999999", "hash", UserRole::Student)
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("student".parse::<UserRole>().unwrap(), UserRole::Student);
        assert_eq!("RECRUITER".parse::<UserRole>().unwrap(), UserRole::Recruiter);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Student).unwrap(), "\"STUDENT\"");
        assert_eq!(serde_json::to_string(&UserRole::Recruiter).unwrap(), "\"RECRUITER\"");
    }

    #[test]
    fn test_patch_supplied_fields_win() {
        let mut user = student();
        user.profile.bio = Some("old bio".to_string());

        user.apply_patch(UserPatch {
            full_name: Some("Asha R.".to_string()),
            bio: Some("new bio".to_string()),
            ..Default::default()
        });

        assert_eq!(user.full_name, "Asha R.");
        assert_eq!(user.profile.bio.as_deref(), Some("new bio"));
        // absent fields survive
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.phone_number, "9999999999");
    }

    #[test]
    fn test_empty_patch_detection() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch { bio: Some("hi".to_string()), ..Default::default() }.is_empty());
    }

    #[test]
    fn test_set_resume() {
        let mut user = student();
        user.set_resume("https://media.example.com/r.pdf", "resume.pdf");
        assert_eq!(user.profile.resume_url.as_deref(), Some("https://media.example.com/r.pdf"));
        assert_eq!(user.profile.resume_original_name.as_deref(), Some("resume.pdf"));
    }
}
