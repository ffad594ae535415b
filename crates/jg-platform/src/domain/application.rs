//! Application Entity
//!
//! The join between one applicant and one job. Unique per
//! (applicant, job) pair, enforced by a unique compound index at the
//! storage layer. Status starts Pending and is changed only by the
//! recruiter owning the job's company; any status may move to any other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown application status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    pub job_id: String,

    pub applicant_id: String,

    #[serde(default)]
    pub status: ApplicationStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(job_id: impl Into<String>, applicant_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            job_id: job_id.into(),
            applicant_id: applicant_id.into(),
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the status. Any state may move to any other; there is no
    /// terminal state in the current product design.
    pub fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_is_pending() {
        let application = Application::new("job-1", "user-1");
        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("pending".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Pending);
        assert_eq!("Accepted".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Accepted);
        assert_eq!("REJECTED".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Rejected);
        assert!("withdrawn".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Accepted).unwrap(),
            "\"ACCEPTED\""
        );
    }

    #[test]
    fn test_any_status_reaches_any_other() {
        let mut application = Application::new("job-1", "user-1");

        application.set_status(ApplicationStatus::Accepted);
        assert_eq!(application.status, ApplicationStatus::Accepted);

        // accepted is not terminal
        application.set_status(ApplicationStatus::Rejected);
        assert_eq!(application.status, ApplicationStatus::Rejected);

        application.set_status(ApplicationStatus::Pending);
        assert_eq!(application.status, ApplicationStatus::Pending);
    }
}
