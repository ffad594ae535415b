//! Platform Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::common::ApiError;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Duplicate entity: {entity_type} with {field}={value}")]
    Duplicate { entity_type: String, field: String, value: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not authenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Media host error: {0}")]
    Media(#[from] jg_media::MediaError),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(entity_type: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// HTTP status this error maps to at the handler boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Duplicate { .. } => StatusCode::CONFLICT,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Media(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Duplicate { .. } => "CONFLICT",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unauthenticated { .. } | Self::InvalidCredentials => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Media(_) => "UPSTREAM_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

/// Centralized error responder: every handler error becomes a JSON response
/// with a taxonomy code. Unexpected failures are logged here and surfaced as
/// a generic server fault without internal detail.
impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::Media(e) => {
                tracing::error!(error = %e, "media host failure");
                "Media upload failed".to_string()
            }
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "unhandled server error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ApiError {
            error: self.error_code().to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PlatformError::not_found("Job", "1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PlatformError::duplicate("Company", "name", "Acme").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PlatformError::validation("title is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlatformError::unauthenticated("missing token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PlatformError::forbidden("not the owner").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(PlatformError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            PlatformError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = PlatformError::duplicate("Company", "name", "Acme");
        let msg = err.to_string();
        assert!(msg.contains("Company"));
        assert!(msg.contains("name"));
        assert!(msg.contains("Acme"));
    }
}
