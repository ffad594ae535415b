//! Job Entity
//!
//! A posting that belongs to exactly one company. Carries the collection of
//! application IDs filed against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    pub description: String,

    #[serde(default)]
    pub requirements: Vec<String>,

    /// Annual salary.
    pub salary: u64,

    /// Required experience in years.
    pub experience_level: u32,

    pub location: String,

    /// e.g. "Full Time", "Part Time", "Internship".
    pub job_type: String,

    /// Number of open positions.
    pub position_count: u32,

    pub company_id: String,

    /// Recruiter who posted the job.
    pub posted_by: String,

    /// Applications filed against this job, newest last.
    #[serde(default)]
    pub application_ids: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        salary: u64,
        experience_level: u32,
        location: impl Into<String>,
        job_type: impl Into<String>,
        position_count: u32,
        company_id: impl Into<String>,
        posted_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            title: title.into(),
            description: description.into(),
            requirements: Vec::new(),
            salary,
            experience_level,
            location: location.into(),
            job_type: job_type.into(),
            position_count,
            company_id: company_id.into(),
            posted_by: posted_by.into(),
            application_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_requirements(mut self, requirements: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.requirements = requirements.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_posted_by(&self, user_id: &str) -> bool {
        self.posted_by == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_has_no_applications() {
        let job = Job::new(
            "Backend Dev",
            "Build APIs",
            900_000,
            2,
            "Pune",
            "Full Time",
            3,
            "company-1",
            "recruiter-1",
        );
        assert!(job.application_ids.is_empty());
        assert!(job.is_posted_by("recruiter-1"));
        assert!(!job.is_posted_by("recruiter-2"));
    }

    #[test]
    fn test_with_requirements() {
        let job = Job::new(
            "Backend Dev",
            "Build APIs",
            900_000,
            2,
            "Pune",
            "Full Time",
            3,
            "company-1",
            "recruiter-1",
        )
        .with_requirements(["Rust", "MongoDB"]);
        assert_eq!(job.requirements, vec!["Rust", "MongoDB"]);
    }
}
