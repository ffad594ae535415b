//! Company API Endpoints
//!
//! Recruiters register and manage the companies their jobs belong to.
//! - POST /register - Register a company (unique name)
//! - GET /get - Companies owned by the caller
//! - GET /get/:id - Company by ID
//! - PUT /update/:id - Partial update (multipart, optional logo upload)

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use jg_media::MediaStore;

use crate::api::form::FormData;
use crate::api::middleware::Authenticated;
use crate::domain::{Company, CompanyPatch};
use crate::error::PlatformError;
use crate::repository::{map_duplicate, CompanyRepository};
use crate::service::checks;

/// Register company request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyRequest {
    /// Unique company name
    pub company_name: String,
}

/// Company response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo_url: Option<String>,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            website: c.website,
            location: c.location,
            logo_url: c.logo_url,
            owner_id: c.owner_id,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Companies service state
#[derive(Clone)]
pub struct CompaniesState {
    pub company_repo: Arc<CompanyRepository>,
    pub media_store: Arc<dyn MediaStore>,
}

/// Register a company
#[utoipa::path(
    post,
    path = "/register",
    tag = "companies",
    request_body = RegisterCompanyRequest,
    responses(
        (status = 200, description = "Company registered", body = CompanyResponse),
        (status = 400, description = "Company name missing"),
        (status = 403, description = "Caller is not a recruiter"),
        (status = 409, description = "Company name already registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn register_company(
    State(state): State<CompaniesState>,
    auth: Authenticated,
    Json(req): Json<RegisterCompanyRequest>,
) -> Result<Json<CompanyResponse>, PlatformError> {
    checks::require_recruiter(&auth.0)?;

    let name = req.company_name.trim();
    if name.is_empty() {
        return Err(PlatformError::validation("Company name is required"));
    }

    if state.company_repo.find_by_name(name).await?.is_some() {
        return Err(PlatformError::duplicate("Company", "name", name));
    }

    let company = Company::new(name, &auth.0.user_id);
    state
        .company_repo
        .insert(&company)
        .await
        .map_err(|e| map_duplicate(e, "Company", "name", name))?;

    Ok(Json(company.into()))
}

/// Companies owned by the caller
#[utoipa::path(
    get,
    path = "/get",
    tag = "companies",
    responses(
        (status = 200, description = "Owned companies", body = Vec<CompanyResponse>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_companies(
    State(state): State<CompaniesState>,
    auth: Authenticated,
) -> Result<Json<Vec<CompanyResponse>>, PlatformError> {
    let companies = state.company_repo.find_by_owner(&auth.0.user_id).await?;
    Ok(Json(companies.into_iter().map(Into::into).collect()))
}

/// Company by ID
#[utoipa::path(
    get,
    path = "/get/{id}",
    tag = "companies",
    params(("id" = String, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company found", body = CompanyResponse),
        (status = 404, description = "Company not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_company(
    State(state): State<CompaniesState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<CompanyResponse>, PlatformError> {
    let company = state
        .company_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Company", &id))?;
    Ok(Json(company.into()))
}

/// Update a company
///
/// Multipart form: any of name, description, website, location, plus an
/// optional `logo` file uploaded to the media host. Owner only.
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "companies",
    params(("id" = String, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "No fields to update"),
        (status = 403, description = "Caller does not own the company"),
        (status = 404, description = "Company not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_company(
    State(state): State<CompaniesState>,
    auth: Authenticated,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<CompanyResponse>, PlatformError> {
    let form = FormData::from_multipart(multipart).await?;

    let mut company = state
        .company_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Company", &id))?;

    if !company.is_owned_by(&auth.0.user_id) {
        return Err(PlatformError::forbidden("Not authorized to update this company"));
    }

    let mut patch = CompanyPatch {
        name: form.text("name").map(String::from),
        description: form.text("description").map(String::from),
        website: form.text("website").map(String::from),
        location: form.text("location").map(String::from),
        logo_url: None,
    };

    if patch.is_empty() && form.file("logo").is_none() {
        return Err(PlatformError::validation("No fields to update"));
    }

    // Upload before the entity write; a failed write leaves the asset
    // orphaned on the host, which is logged for reconciliation.
    let mut uploaded_url = None;
    if let Some(logo) = form.file("logo") {
        let stored = state.media_store.upload(logo.clone()).await?;
        uploaded_url = Some(stored.url.clone());
        patch.logo_url = Some(stored.url);
    }

    let name_for_conflict = patch.name.clone().unwrap_or_else(|| company.name.clone());
    company.apply_patch(patch);

    if let Err(err) = state.company_repo.update(&company).await {
        if let Some(url) = &uploaded_url {
            tracing::warn!(asset_url = %url, "company update failed after logo upload; asset orphaned pending reconciliation");
        }
        return Err(map_duplicate(err, "Company", "name", &name_for_conflict));
    }

    Ok(Json(company.into()))
}

/// Create the companies router
pub fn companies_router(state: CompaniesState) -> Router {
    Router::new()
        .route("/register", post(register_company))
        .route("/get", get(get_companies))
        .route("/get/:id", get(get_company))
        .route("/update/:id", put(update_company))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{"companyName":"Acme"}"#;
        let req: RegisterCompanyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.company_name, "Acme");
    }

    #[test]
    fn test_company_response_serialization() {
        let company = Company::new("Acme", "recruiter-1");
        let response: CompanyResponse = company.into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("ownerId"));
        assert!(json.contains("createdAt"));
    }
}
