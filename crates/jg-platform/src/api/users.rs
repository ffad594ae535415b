//! User API Endpoints
//!
//! Account registration, login, logout, and profile updates.
//! - POST /register - Create an account (multipart, optional avatar photo)
//! - POST /login - Password login, returns a bearer token
//! - GET /logout - Stateless logout
//! - POST /profile/update - Partial profile update (multipart, optional resume)

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use jg_media::MediaStore;

use crate::api::form::FormData;
use crate::api::middleware::Authenticated;
use crate::api::common::SuccessResponse;
use crate::domain::{Profile, User, UserPatch, UserRole};
use crate::error::PlatformError;
use crate::repository::{map_duplicate, UserRepository};
use crate::service::{AuthService, PasswordService};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,

    /// Role the client is logging in as (STUDENT or RECRUITER)
    pub role: String,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Access token
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Expiration time in seconds
    pub expires_in: i64,

    /// The authenticated account
    pub user: UserResponse,
}

/// Profile response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub resume_url: Option<String>,
    pub resume_original_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            bio: p.bio,
            skills: p.skills,
            resume_url: p.resume_url,
            resume_original_name: p.resume_original_name,
            avatar_url: p.avatar_url,
        }
    }
}

/// User response DTO. Never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub profile: ProfileResponse,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            phone_number: u.phone_number,
            role: u.role.to_string(),
            profile: u.profile.into(),
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Users service state
#[derive(Clone)]
pub struct UsersState {
    pub user_repo: Arc<UserRepository>,
    pub auth_service: Arc<AuthService>,
    pub password_service: Arc<PasswordService>,
    pub media_store: Arc<dyn MediaStore>,
}

/// Register a new account
///
/// Multipart form: fullName, email, phoneNumber, password, role, and an
/// optional `photo` file stored on the media host as the avatar.
#[utoipa::path(
    post,
    path = "/register",
    tag = "users",
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<UsersState>,
    multipart: Multipart,
) -> Result<Json<UserResponse>, PlatformError> {
    let form = FormData::from_multipart(multipart).await?;

    let full_name = form.require_text("fullName")?;
    let email = form.require_text("email")?;
    let phone_number = form.require_text("phoneNumber")?;
    let password = form.require_text("password")?;
    let role: UserRole = form
        .require_text("role")?
        .parse()
        .map_err(|e: String| PlatformError::validation(e))?;

    if state.user_repo.find_by_email(email).await?.is_some() {
        return Err(PlatformError::duplicate("User", "email", email));
    }

    let password_hash = state.password_service.hash_password(password)?;
    let mut user = User::new(full_name, email, phone_number, password_hash, role);

    // Upload before the entity write; a failed write leaves the asset
    // orphaned on the host, which is logged for reconciliation.
    let mut uploaded_url = None;
    if let Some(photo) = form.file("photo") {
        let stored = state.media_store.upload(photo.clone()).await?;
        uploaded_url = Some(stored.url.clone());
        user = user.with_avatar_url(stored.url);
    }

    if let Err(err) = state.user_repo.insert(&user).await {
        if let Some(url) = &uploaded_url {
            tracing::warn!(asset_url = %url, "user insert failed after avatar upload; asset orphaned pending reconciliation");
        }
        return Err(map_duplicate(err, "User", "email", email));
    }

    Ok(Json(user.into()))
}

/// Login with email, password, and role
///
/// The account must exist with the requested role; mismatches are
/// indistinguishable from wrong credentials.
#[utoipa::path(
    post,
    path = "/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<UsersState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, PlatformError> {
    let role: UserRole = req
        .role
        .parse()
        .map_err(|e: String| PlatformError::validation(e))?;

    let user = state
        .user_repo
        .find_by_email(&req.email)
        .await?
        .ok_or(PlatformError::InvalidCredentials)?;

    if !state
        .password_service
        .verify_password(&req.password, &user.password_hash)?
    {
        return Err(PlatformError::InvalidCredentials);
    }

    if user.role != role {
        return Err(PlatformError::InvalidCredentials);
    }

    let access_token = state.auth_service.generate_token(&user)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth_service.token_ttl_secs(),
        user: user.into(),
    }))
}

/// Logout
///
/// For stateless bearer tokens this is a no-op server-side; the client
/// discards its token.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "users",
    responses(
        (status = 200, description = "Logout successful", body = SuccessResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout(auth: Authenticated) -> Json<SuccessResponse> {
    let _identity = &auth.0;
    Json(SuccessResponse::with_message("Logged out"))
}

/// Update the caller's profile
///
/// Multipart form: any of fullName, email, phoneNumber, bio, skills
/// (comma-separated), plus an optional `resume` file.
#[utoipa::path(
    post,
    path = "/profile/update",
    tag = "users",
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "No fields to update"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<UsersState>,
    auth: Authenticated,
    multipart: Multipart,
) -> Result<Json<UserResponse>, PlatformError> {
    let identity = auth.0;
    let form = FormData::from_multipart(multipart).await?;

    let patch = UserPatch {
        full_name: form.text("fullName").map(String::from),
        email: form.text("email").map(String::from),
        phone_number: form.text("phoneNumber").map(String::from),
        bio: form.text("bio").map(String::from),
        skills: form.text("skills").map(parse_skills),
    };

    if patch.is_empty() && form.file("resume").is_none() {
        return Err(PlatformError::validation("No fields to update"));
    }

    let mut user = state
        .user_repo
        .find_by_id(&identity.user_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("User", &identity.user_id))?;

    let email_for_conflict = patch.email.clone().unwrap_or_else(|| user.email.clone());

    let mut uploaded_url = None;
    if let Some(resume) = form.file("resume") {
        let stored = state.media_store.upload(resume.clone()).await?;
        uploaded_url = Some(stored.url.clone());
        user.set_resume(stored.url, stored.original_name);
    }

    user.apply_patch(patch);

    if let Err(err) = state.user_repo.update(&user).await {
        if let Some(url) = &uploaded_url {
            tracing::warn!(asset_url = %url, "profile update failed after resume upload; asset orphaned pending reconciliation");
        }
        return Err(map_duplicate(err, "User", "email", &email_for_conflict));
    }

    Ok(Json(user.into()))
}

/// Split a comma-separated skills field into trimmed entries.
fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Create the users router
pub fn users_router(state: UsersState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/profile/update", post(update_profile))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{"email":"asha@example.com","password":"hunter2!","role":"STUDENT"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "asha@example.com");
        assert_eq!(req.role, "STUDENT");
    }

    #[test]
    fn test_user_response_omits_password_hash() {
        let user = User::new("Asha Rao", "asha@example.com", "9999999999", "secret-hash", UserRole::Student);
        let response: UserResponse = user.into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("fullName"));
        assert!(json.contains("phoneNumber"));
    }

    #[test]
    fn test_parse_skills() {
        assert_eq!(parse_skills("rust, mongodb ,axum"), vec!["rust", "mongodb", "axum"]);
        assert_eq!(parse_skills(" , ,"), Vec::<String>::new());
    }
}
