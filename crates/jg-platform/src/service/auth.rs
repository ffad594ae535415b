//! Authentication Service
//!
//! Issues and validates HS256 access tokens against a shared secret. The
//! gate is a pure function of (token, secret, clock): no storage access,
//! no mutable state beyond the secret's process lifetime.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserRole};
use crate::error::{PlatformError, Result};

/// Auth configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret.
    pub secret_key: String,
    /// Issuer claim, checked on validation.
    pub issuer: String,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: i64,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID.
    pub sub: String,
    /// Account role at issue time.
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity attached to a request after the gate has validated its token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub role: UserRole,
}

impl Identity {
    /// Build an identity from validated claims. A well-signed token with an
    /// unusable role claim is still rejected as unauthenticated.
    pub fn from_claims(claims: &AccessTokenClaims) -> Result<Self> {
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|_| PlatformError::unauthenticated("Invalid token claims"))?;
        Ok(Self {
            user_id: claims.sub.clone(),
            role,
        })
    }
}

pub struct AuthService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue an access token for a user.
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: user.id.clone(),
            role: user.role.to_string(),
            iss: self.config.issuer.clone(),
            iat: now,
            exp: now + self.config.token_ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| PlatformError::internal(format!("token encoding failed: {}", e)))
    }

    /// Validate a token. Malformed, expired, or wrongly signed tokens are
    /// all rejected as unauthenticated, never as a server fault.
    pub fn validate_token(&self, token: &str) -> Result<AccessTokenClaims> {
        decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| PlatformError::unauthenticated("Invalid or expired token"))
    }

    pub fn token_ttl_secs(&self) -> i64 {
        self.config.token_ttl_secs
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_secret(secret: &str) -> AuthService {
        AuthService::new(AuthConfig {
            secret_key: secret.to_string(),
            issuer: "jobgrid".to_string(),
            token_ttl_secs: 3600,
        })
    }

    fn test_user() -> User {
        User::new("Asha Rao", "asha@example.com", "9999999999", "hash", UserRole::Student)
    }

    #[test]
    fn test_token_round_trip() {
        let service = service_with_secret("test-secret");
        let user = test_user();

        let token = service.generate_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, "STUDENT");
        assert_eq!(claims.iss, "jobgrid");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuing = service_with_secret("secret-a");
        let validating = service_with_secret("secret-b");

        let token = issuing.generate_token(&test_user()).unwrap();
        let err = validating.validate_token(&token).unwrap_err();
        assert!(matches!(err, PlatformError::Unauthenticated { .. }));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = AuthService::new(AuthConfig {
            secret_key: "test-secret".to_string(),
            issuer: "jobgrid".to_string(),
            // beyond the default validation leeway
            token_ttl_secs: -3600,
        });

        let token = service.generate_token(&test_user()).unwrap();
        let err = service.validate_token(&token).unwrap_err();
        assert!(matches!(err, PlatformError::Unauthenticated { .. }));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = service_with_secret("test-secret");
        for garbage in ["", "not-a-jwt", "a.b", "a.b.c.d"] {
            let err = service.validate_token(garbage).unwrap_err();
            assert!(matches!(err, PlatformError::Unauthenticated { .. }));
        }
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuing = AuthService::new(AuthConfig {
            secret_key: "test-secret".to_string(),
            issuer: "someone-else".to_string(),
            token_ttl_secs: 3600,
        });
        let validating = service_with_secret("test-secret");

        let token = issuing.generate_token(&test_user()).unwrap();
        assert!(validating.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token("abc123"), None);
    }

    #[test]
    fn test_identity_from_claims() {
        let claims = AccessTokenClaims {
            sub: "user-1".to_string(),
            role: "RECRUITER".to_string(),
            iss: "jobgrid".to_string(),
            iat: 0,
            exp: 0,
        };
        let identity = Identity::from_claims(&claims).unwrap();
        assert_eq!(identity.user_id, "user-1");
        assert_eq!(identity.role, UserRole::Recruiter);

        let bad = AccessTokenClaims { role: "ADMIN".to_string(), ..claims };
        assert!(Identity::from_claims(&bad).is_err());
    }
}
