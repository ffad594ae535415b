//! Job API Endpoints
//!
//! - POST /post - Post a job against an owned company (recruiter only)
//! - GET /get - Browse jobs with free-text query and facet filters
//! - GET /get/:id - Job by ID
//! - GET /getadminjobs - Jobs posted by the caller

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::api::companies::CompanyResponse;
use crate::api::middleware::Authenticated;
use crate::domain::{Company, Job};
use crate::error::PlatformError;
use crate::repository::{CompanyRepository, JobRepository};
use crate::search::{filter_jobs, JobFilter, SalaryBand};
use crate::service::checks;

/// Post job request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostJobRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Annual salary
    pub salary: u64,
    /// Required experience in years
    pub experience_level: u32,
    pub location: String,
    /// e.g. "Full Time", "Part Time", "Internship"
    pub job_type: String,
    /// Number of open positions
    pub position_count: u32,
    pub company_id: String,
}

/// Job response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: u64,
    pub experience_level: u32,
    pub location: String,
    pub job_type: String,
    pub position_count: u32,
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyResponse>,
    pub application_ids: Vec<String>,
    pub created_at: String,
}

impl JobResponse {
    pub(crate) fn from_job(job: Job, company: Option<Company>) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            requirements: job.requirements,
            salary: job.salary,
            experience_level: job.experience_level,
            location: job.location,
            job_type: job.job_type,
            position_count: job.position_count,
            company_id: job.company_id,
            company: company.map(Into::into),
            application_ids: job.application_ids,
            created_at: job.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for the job browse endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct JobsQuery {
    /// Free-text query matched against title, description, and location
    pub keyword: Option<String>,

    /// Exact location facet
    pub location: Option<String>,

    /// Exact industry facet
    pub industry: Option<String>,

    /// Salary band facet: "0-40k", "40k-1lakh", or "1lakh-5lakh"
    pub salary: Option<String>,
}

impl JobsQuery {
    fn into_filter(self) -> Result<JobFilter, PlatformError> {
        let salary_band = self
            .salary
            .as_deref()
            .map(str::parse::<SalaryBand>)
            .transpose()
            .map_err(PlatformError::validation)?;

        Ok(JobFilter {
            query: self.keyword,
            location: self.location,
            industry: self.industry,
            salary_band,
        })
    }
}

/// Jobs service state
#[derive(Clone)]
pub struct JobsState {
    pub job_repo: Arc<JobRepository>,
    pub company_repo: Arc<CompanyRepository>,
}

impl JobsState {
    /// Resolve companies for a job list without refetching duplicates.
    async fn resolve_companies(
        &self,
        jobs: &[Job],
    ) -> Result<HashMap<String, Company>, PlatformError> {
        let mut companies = HashMap::new();
        for job in jobs {
            if companies.contains_key(&job.company_id) {
                continue;
            }
            if let Some(company) = self.company_repo.find_by_id(&job.company_id).await? {
                companies.insert(job.company_id.clone(), company);
            }
        }
        Ok(companies)
    }
}

/// Post a job
#[utoipa::path(
    post,
    path = "/post",
    tag = "jobs",
    request_body = PostJobRequest,
    responses(
        (status = 200, description = "Job posted", body = JobResponse),
        (status = 400, description = "Missing required field"),
        (status = 403, description = "Caller does not own the company"),
        (status = 404, description = "Company not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn post_job(
    State(state): State<JobsState>,
    auth: Authenticated,
    Json(req): Json<PostJobRequest>,
) -> Result<Json<JobResponse>, PlatformError> {
    checks::require_recruiter(&auth.0)?;

    for (value, name) in [
        (&req.title, "title"),
        (&req.description, "description"),
        (&req.location, "location"),
        (&req.job_type, "jobType"),
    ] {
        if value.trim().is_empty() {
            return Err(PlatformError::validation(format!("{} is required", name)));
        }
    }
    if req.position_count == 0 {
        return Err(PlatformError::validation("positionCount must be at least 1"));
    }

    let company = state
        .company_repo
        .find_by_id(&req.company_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Company", &req.company_id))?;

    if !company.is_owned_by(&auth.0.user_id) {
        return Err(PlatformError::forbidden("Not authorized to post jobs for this company"));
    }

    let job = Job::new(
        req.title,
        req.description,
        req.salary,
        req.experience_level,
        req.location,
        req.job_type,
        req.position_count,
        req.company_id,
        &auth.0.user_id,
    )
    .with_requirements(req.requirements);

    state.job_repo.insert(&job).await?;

    Ok(Json(JobResponse::from_job(job, Some(company))))
}

/// Browse jobs
///
/// Fetches the job list newest-first and applies the search predicate:
/// free-text keyword plus exact facet matches. No parameters returns the
/// full list unchanged.
#[utoipa::path(
    get,
    path = "/get",
    tag = "jobs",
    params(JobsQuery),
    responses(
        (status = 200, description = "Matching jobs", body = Vec<JobResponse>),
        (status = 400, description = "Unknown salary band")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_jobs(
    State(state): State<JobsState>,
    _auth: Authenticated,
    Query(query): Query<JobsQuery>,
) -> Result<Json<Vec<JobResponse>>, PlatformError> {
    let filter = query.into_filter()?;
    let jobs = filter_jobs(state.job_repo.find_all().await?, &filter);

    let companies = state.resolve_companies(&jobs).await?;
    let response = jobs
        .into_iter()
        .map(|job| {
            let company = companies.get(&job.company_id).cloned();
            JobResponse::from_job(job, company)
        })
        .collect();

    Ok(Json(response))
}

/// Job by ID
#[utoipa::path(
    get,
    path = "/get/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 404, description = "Job not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_job(
    State(state): State<JobsState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<JobResponse>, PlatformError> {
    let job = state
        .job_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Job", &id))?;

    let company = state.company_repo.find_by_id(&job.company_id).await?;
    Ok(Json(JobResponse::from_job(job, company)))
}

/// Jobs posted by the caller
#[utoipa::path(
    get,
    path = "/getadminjobs",
    tag = "jobs",
    responses(
        (status = 200, description = "Posted jobs", body = Vec<JobResponse>),
        (status = 403, description = "Caller is not a recruiter")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin_jobs(
    State(state): State<JobsState>,
    auth: Authenticated,
) -> Result<Json<Vec<JobResponse>>, PlatformError> {
    checks::require_recruiter(&auth.0)?;

    let jobs = state.job_repo.find_by_poster(&auth.0.user_id).await?;
    let companies = state.resolve_companies(&jobs).await?;

    let response = jobs
        .into_iter()
        .map(|job| {
            let company = companies.get(&job.company_id).cloned();
            JobResponse::from_job(job, company)
        })
        .collect();

    Ok(Json(response))
}

/// Create the jobs router
pub fn jobs_router(state: JobsState) -> Router {
    Router::new()
        .route("/post", post(post_job))
        .route("/get", get(get_jobs))
        .route("/get/:id", get(get_job))
        .route("/getadminjobs", get(get_admin_jobs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_job_request_deserialization() {
        let json = r#"{
            "title": "Backend Dev",
            "description": "Build APIs",
            "requirements": ["Rust"],
            "salary": 900000,
            "experienceLevel": 2,
            "location": "Pune",
            "jobType": "Full Time",
            "positionCount": 3,
            "companyId": "company-1"
        }"#;
        let req: PostJobRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "Backend Dev");
        assert_eq!(req.position_count, 3);
        assert_eq!(req.requirements, vec!["Rust"]);
    }

    #[test]
    fn test_requirements_default_to_empty() {
        let json = r#"{
            "title": "Backend Dev",
            "description": "Build APIs",
            "salary": 900000,
            "experienceLevel": 2,
            "location": "Pune",
            "jobType": "Full Time",
            "positionCount": 1,
            "companyId": "company-1"
        }"#;
        let req: PostJobRequest = serde_json::from_str(json).unwrap();
        assert!(req.requirements.is_empty());
    }

    #[test]
    fn test_jobs_query_into_filter() {
        let query = JobsQuery {
            keyword: Some("frontend".to_string()),
            salary: Some("0-40k".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.query.as_deref(), Some("frontend"));
        assert_eq!(filter.salary_band, Some(SalaryBand::UpTo40k));

        let bad = JobsQuery {
            salary: Some("9lakh".to_string()),
            ..Default::default()
        };
        assert!(bad.into_filter().is_err());
    }
}
