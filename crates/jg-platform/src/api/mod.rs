//! API Layer
//!
//! REST API endpoints for the job board.

pub mod common;
pub mod form;
pub mod middleware;
pub mod openapi;

pub mod applications;
pub mod companies;
pub mod jobs;
pub mod monitoring;
pub mod users;

pub use common::*;
pub use middleware::{AppState, Authenticated};
pub use openapi::PlatformApiDoc;

pub use applications::{applications_router, ApplicationsState};
pub use companies::{companies_router, CompaniesState};
pub use jobs::{jobs_router, JobsState};
pub use monitoring::monitoring_router;
pub use users::{users_router, UsersState};
