//! OpenAPI Documentation
//!
//! Aggregated API document served through Swagger UI by the server binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::{applications, common, companies, jobs, monitoring, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::logout,
        users::update_profile,
        companies::register_company,
        companies::get_companies,
        companies::get_company,
        companies::update_company,
        jobs::post_job,
        jobs::get_jobs,
        jobs::get_job,
        jobs::get_admin_jobs,
        applications::apply,
        applications::get_applied_jobs,
        applications::get_applicants,
        applications::update_status,
        monitoring::health,
        monitoring::ready,
    ),
    components(schemas(
        common::ApiError,
        common::SuccessResponse,
        common::CreatedResponse,
        users::LoginRequest,
        users::LoginResponse,
        users::UserResponse,
        users::ProfileResponse,
        companies::RegisterCompanyRequest,
        companies::CompanyResponse,
        jobs::PostJobRequest,
        jobs::JobResponse,
        applications::ApplicationResponse,
        applications::AppliedJobResponse,
        applications::ApplicantResponse,
        applications::JobApplicantsResponse,
        applications::StatusSummaryResponse,
        applications::StatusUpdateRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Accounts, login, and profiles"),
        (name = "companies", description = "Recruiter-owned companies"),
        (name = "jobs", description = "Job postings and browse"),
        (name = "applications", description = "Apply and review workflow"),
        (name = "monitoring", description = "Health probes"),
    )
)]
pub struct PlatformApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builds() {
        let doc = PlatformApiDoc::openapi();
        let json = doc.to_json().unwrap();
        assert!(json.contains("/login"));
        assert!(json.contains("bearer_auth"));
    }
}
