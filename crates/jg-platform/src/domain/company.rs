//! Company Entity
//!
//! Owned by exactly one recruiter. The name is unique across the platform,
//! enforced by a unique index at the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Unique company name.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Externally hosted logo asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Recruiter who registered the company.
    pub owner_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a company. All fields optional; only supplied fields
/// change when applied.
#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.website.is_none()
            && self.location.is_none()
            && self.logo_url.is_none()
    }
}

impl Company {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            name: name.into(),
            description: None,
            website: None,
            location: None,
            logo_url: None,
            owner_id: owner_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Apply a partial update. Precedence: a field supplied in the patch
    /// wins; absent fields keep the current value.
    pub fn apply_patch(&mut self, patch: CompanyPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(website) = patch.website {
            self.website = Some(website);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(logo_url) = patch.logo_url {
            self.logo_url = Some(logo_url);
        }
        self.updated_at = Utc::now();
    }
}
