//! Repository Layer
//!
//! MongoDB repositories for all domain entities. Each repository is
//! constructed from an explicitly passed database handle; there is no
//! global store access.

pub mod application;
pub mod company;
pub mod indexes;
pub mod job;
pub mod user;

pub use application::ApplicationRepository;
pub use company::CompanyRepository;
pub use indexes::ensure_indexes;
pub use job::JobRepository;
pub use user::UserRepository;

/// True when a write failed because a unique index was violated. The
/// storage layer is the arbiter of uniqueness invariants; callers convert
/// this into a Conflict for the API.
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

/// Rewrite a unique-index violation into the Conflict the API surfaces;
/// any other error passes through.
pub fn map_duplicate(
    err: crate::error::PlatformError,
    entity_type: &str,
    field: &str,
    value: &str,
) -> crate::error::PlatformError {
    match err {
        crate::error::PlatformError::Database(ref e) if is_duplicate_key_error(e) => {
            crate::error::PlatformError::duplicate(entity_type, field, value)
        }
        other => other,
    }
}
