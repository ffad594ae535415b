//! Application Lifecycle Service
//!
//! Implements the apply / review workflow: students file one application
//! per job; the recruiter owning the job's company moves it between
//! Pending, Accepted, and Rejected.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Application, ApplicationStatus, Company, Job, User};
use crate::error::{PlatformError, Result};
use crate::repository::{
    map_duplicate, ApplicationRepository, CompanyRepository, JobRepository, UserRepository,
};
use crate::service::{checks, Identity};

/// An application resolved with its job and company for display.
pub struct AppliedJob {
    pub application: Application,
    pub job: Job,
    pub company: Option<Company>,
}

/// One applicant row in a recruiter's review view.
pub struct JobApplicant {
    pub application: Application,
    pub applicant: Option<User>,
}

/// All applications against one job, with per-status counts for the UI.
pub struct JobApplicants {
    pub job: Job,
    pub applicants: Vec<JobApplicant>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl JobApplicants {
    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for entry in &self.applicants {
            match entry.application.status {
                ApplicationStatus::Pending => summary.pending += 1,
                ApplicationStatus::Accepted => summary.accepted += 1,
                ApplicationStatus::Rejected => summary.rejected += 1,
            }
        }
        summary
    }
}

pub struct ApplicationService {
    application_repo: Arc<ApplicationRepository>,
    job_repo: Arc<JobRepository>,
    company_repo: Arc<CompanyRepository>,
    user_repo: Arc<UserRepository>,
}

impl ApplicationService {
    pub fn new(
        application_repo: Arc<ApplicationRepository>,
        job_repo: Arc<JobRepository>,
        company_repo: Arc<CompanyRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            application_repo,
            job_repo,
            company_repo,
            user_repo,
        }
    }

    /// File an application. A retried apply on an existing (applicant, job)
    /// pair is rejected with a conflict, not silently absorbed; the unique
    /// index is the arbiter under concurrent requests.
    pub async fn apply(&self, identity: &Identity, job_id: &str) -> Result<Application> {
        checks::require_student(identity)?;

        let mut job = self
            .job_repo
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Job", job_id))?;

        if self
            .application_repo
            .exists_for(&identity.user_id, job_id)
            .await?
        {
            return Err(PlatformError::duplicate("Application", "jobId", job_id));
        }

        let application = Application::new(job_id, &identity.user_id);
        self.application_repo
            .insert(&application)
            .await
            .map_err(|e| map_duplicate(e, "Application", "jobId", job_id))?;

        job.application_ids.push(application.id.clone());
        job.updated_at = chrono::Utc::now();
        self.job_repo.update(&job).await?;

        info!(application_id = %application.id, job_id = %job_id, "application filed");
        Ok(application)
    }

    /// Overwrite an application's status. Only the recruiter owning the
    /// company that owns the job may do this; any status may move to any
    /// other.
    pub async fn set_status(
        &self,
        application_id: &str,
        status: ApplicationStatus,
        identity: &Identity,
    ) -> Result<Application> {
        let mut application = self
            .application_repo
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Application", application_id))?;

        self.require_job_owner(&application.job_id, identity).await?;

        application.set_status(status);
        self.application_repo.update(&application).await?;

        info!(
            application_id = %application.id,
            status = %application.status,
            "application status updated"
        );
        Ok(application)
    }

    /// A user's own applications, most recent first, resolved with job and
    /// company for display.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<AppliedJob>> {
        let applications = self.application_repo.find_by_applicant(user_id).await?;

        let mut applied = Vec::with_capacity(applications.len());
        for application in applications {
            // skip rows whose job has since been removed
            let Some(job) = self.job_repo.find_by_id(&application.job_id).await? else {
                continue;
            };
            let company = self.company_repo.find_by_id(&job.company_id).await?;
            applied.push(AppliedJob {
                application,
                job,
                company,
            });
        }
        Ok(applied)
    }

    /// All applications against a job, for the owning recruiter's review
    /// view.
    pub async fn list_for_job(&self, job_id: &str, identity: &Identity) -> Result<JobApplicants> {
        let job = self.require_job_owner(job_id, identity).await?;

        let applications = self.application_repo.find_by_job(job_id).await?;
        let mut applicants = Vec::with_capacity(applications.len());
        for application in applications {
            let applicant = self.user_repo.find_by_id(&application.applicant_id).await?;
            applicants.push(JobApplicant {
                application,
                applicant,
            });
        }

        Ok(JobApplicants { job, applicants })
    }

    /// Resolve job -> company -> owner and require the requester to be the
    /// owner. Authorization failures do not reveal whether other entities
    /// exist beyond the job itself.
    async fn require_job_owner(&self, job_id: &str, identity: &Identity) -> Result<Job> {
        let job = self
            .job_repo
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Job", job_id))?;

        let company = self
            .company_repo
            .find_by_id(&job.company_id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Company", &job.company_id))?;

        if !company.is_owned_by(&identity.user_id) {
            return Err(PlatformError::forbidden(
                "Not authorized to manage applications for this job",
            ));
        }

        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application_with_status(status: ApplicationStatus) -> Application {
        let mut application = Application::new("job-1", "user-1");
        application.set_status(status);
        application
    }

    #[test]
    fn test_status_summary_counts() {
        let job = Job::new(
            "Backend Dev",
            "Build APIs",
            900_000,
            2,
            "Pune",
            "Full Time",
            1,
            "company-1",
            "recruiter-1",
        );
        let applicants = vec![
            JobApplicant {
                application: application_with_status(ApplicationStatus::Pending),
                applicant: None,
            },
            JobApplicant {
                application: application_with_status(ApplicationStatus::Accepted),
                applicant: None,
            },
            JobApplicant {
                application: application_with_status(ApplicationStatus::Pending),
                applicant: None,
            },
        ];
        let review = JobApplicants { job, applicants };

        let summary = review.summary();
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 0);
    }
}
