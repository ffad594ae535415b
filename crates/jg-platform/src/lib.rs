//! JobGrid Platform
//!
//! Core platform providing:
//! - Account registration, login, and token-gated request authorization
//! - Company and job registry for recruiters
//! - Application lifecycle (apply, review, status updates)
//! - Pure search/filter predicate over the job list

pub mod api;
pub mod domain;
pub mod error;
pub mod repository;
pub mod search;
pub mod service;
pub mod tsid;

pub use domain::*;
pub use error::PlatformError;
pub use tsid::TsidGenerator;
