//! Application API Endpoints
//!
//! The apply / review workflow surface.
//! - GET /apply/:jobId - File an application (student only)
//! - GET /get - The caller's applications, newest first
//! - GET /:jobId/applicants - Applicants for a job (owning recruiter only)
//! - POST /status/:id/update - Overwrite an application's status

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::common::CreatedResponse;
use crate::api::jobs::JobResponse;
use crate::api::middleware::Authenticated;
use crate::api::users::UserResponse;
use crate::domain::{Application, ApplicationStatus};
use crate::error::PlatformError;
use crate::service::{ApplicationService, StatusSummary};

/// Application response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub job_id: String,
    pub applicant_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(a: Application) -> Self {
        Self {
            id: a.id,
            job_id: a.job_id,
            applicant_id: a.applicant_id,
            status: a.status.to_string(),
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

/// One of the caller's applications, resolved with its job and company.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobResponse {
    pub id: String,
    pub status: String,
    pub created_at: String,
    pub job: JobResponse,
}

/// One applicant row in the recruiter review view.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    pub application: ApplicationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<UserResponse>,
}

/// Per-status counts for grouping in the UI.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummaryResponse {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl From<StatusSummary> for StatusSummaryResponse {
    fn from(s: StatusSummary) -> Self {
        Self {
            pending: s.pending,
            accepted: s.accepted,
            rejected: s.rejected,
        }
    }
}

/// Applicants for one job, with per-status counts.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicantsResponse {
    pub job_id: String,
    pub job_title: String,
    pub applicants: Vec<ApplicantResponse>,
    pub summary: StatusSummaryResponse,
}

/// Status update request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    /// New status: PENDING, ACCEPTED, or REJECTED
    pub status: String,
}

/// Applications service state
#[derive(Clone)]
pub struct ApplicationsState {
    pub application_service: Arc<ApplicationService>,
}

/// Apply to a job
#[utoipa::path(
    get,
    path = "/apply/{jobId}",
    tag = "applications",
    params(("jobId" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Application filed", body = CreatedResponse),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied to this job")
    ),
    security(("bearer_auth" = []))
)]
pub async fn apply(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
    Path(job_id): Path<String>,
) -> Result<Json<CreatedResponse>, PlatformError> {
    let application = state.application_service.apply(&auth.0, &job_id).await?;
    Ok(Json(CreatedResponse::new(application.id)))
}

/// The caller's applications, newest first
#[utoipa::path(
    get,
    path = "/get",
    tag = "applications",
    responses(
        (status = 200, description = "Applications with jobs", body = Vec<AppliedJobResponse>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_applied_jobs(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
) -> Result<Json<Vec<AppliedJobResponse>>, PlatformError> {
    let applied = state
        .application_service
        .list_for_user(&auth.0.user_id)
        .await?;

    let response = applied
        .into_iter()
        .map(|entry| AppliedJobResponse {
            id: entry.application.id,
            status: entry.application.status.to_string(),
            created_at: entry.application.created_at.to_rfc3339(),
            job: JobResponse::from_job(entry.job, entry.company),
        })
        .collect();

    Ok(Json(response))
}

/// Applicants for a job
#[utoipa::path(
    get,
    path = "/{jobId}/applicants",
    tag = "applications",
    params(("jobId" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Applicants grouped by status", body = JobApplicantsResponse),
        (status = 403, description = "Caller does not own the company"),
        (status = 404, description = "Job not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_applicants(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
    Path(job_id): Path<String>,
) -> Result<Json<JobApplicantsResponse>, PlatformError> {
    let review = state
        .application_service
        .list_for_job(&job_id, &auth.0)
        .await?;

    let summary = review.summary().into();
    let applicants = review
        .applicants
        .into_iter()
        .map(|entry| ApplicantResponse {
            application: entry.application.into(),
            applicant: entry.applicant.map(Into::into),
        })
        .collect();

    Ok(Json(JobApplicantsResponse {
        job_id: review.job.id,
        job_title: review.job.title,
        applicants,
        summary,
    }))
}

/// Update an application's status
#[utoipa::path(
    post,
    path = "/status/{id}/update",
    tag = "applications",
    params(("id" = String, Path, description = "Application ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = ApplicationResponse),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Caller does not own the company"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_status(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationResponse>, PlatformError> {
    let status: ApplicationStatus = req
        .status
        .parse()
        .map_err(|e: String| PlatformError::validation(e))?;

    let application = state
        .application_service
        .set_status(&id, status, &auth.0)
        .await?;

    Ok(Json(application.into()))
}

/// Create the applications router
pub fn applications_router(state: ApplicationsState) -> Router {
    Router::new()
        .route("/apply/:job_id", get(apply))
        .route("/get", get(get_applied_jobs))
        .route("/:job_id/applicants", get(get_applicants))
        .route("/status/:id/update", post(update_status))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_update_request_deserialization() {
        let json = r#"{"status":"ACCEPTED"}"#;
        let req: StatusUpdateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, "ACCEPTED");
    }

    #[test]
    fn test_application_response_serialization() {
        let application = Application::new("job-1", "user-1");
        let response: ApplicationResponse = application.into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"PENDING\""));
        assert!(json.contains("jobId"));
        assert!(json.contains("applicantId"));
    }

    #[test]
    fn test_summary_response_from_service_summary() {
        let summary = StatusSummary {
            pending: 2,
            accepted: 1,
            rejected: 0,
        };
        let response: StatusSummaryResponse = summary.into();
        assert_eq!(response.pending, 2);
        assert_eq!(response.accepted, 1);
        assert_eq!(response.rejected, 0);
    }
}
