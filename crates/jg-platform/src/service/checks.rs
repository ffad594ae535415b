//! Authorization Checks
//!
//! Role gates used by handlers before touching protected entities. Entity
//! ownership checks live with the services that resolve the entities.

use crate::domain::UserRole;
use crate::error::{PlatformError, Result};
use crate::service::Identity;

/// Only recruiters may create companies and jobs or manage applicants.
pub fn require_recruiter(identity: &Identity) -> Result<()> {
    if identity.role != UserRole::Recruiter {
        return Err(PlatformError::forbidden("Recruiter role required"));
    }
    Ok(())
}

/// Only students may apply to jobs.
pub fn require_student(identity: &Identity) -> Result<()> {
    if identity.role != UserRole::Student {
        return Err(PlatformError::forbidden("Student role required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: UserRole) -> Identity {
        Identity {
            user_id: "user-1".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_recruiter() {
        assert!(require_recruiter(&identity(UserRole::Recruiter)).is_ok());
        assert!(matches!(
            require_recruiter(&identity(UserRole::Student)).unwrap_err(),
            PlatformError::Forbidden { .. }
        ));
    }

    #[test]
    fn test_require_student() {
        assert!(require_student(&identity(UserRole::Student)).is_ok());
        assert!(matches!(
            require_student(&identity(UserRole::Recruiter)).unwrap_err(),
            PlatformError::Forbidden { .. }
        ));
    }
}
