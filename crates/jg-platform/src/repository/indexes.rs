//! Index Bootstrap
//!
//! Creates the unique indexes the platform's invariants rely on. Runs at
//! startup; MongoDB treats existing identical indexes as a no-op.
//!
//! - `users.email` — one account per email
//! - `companies.name` — a company name can be registered once
//! - `applications.(applicantId, jobId)` — one application per applicant
//!   per job, the apply-once arbiter under concurrent requests

use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Database, IndexModel,
};

use crate::error::Result;

pub async fn ensure_indexes(db: &Database) -> Result<()> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<Document>("users")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique.clone())
                .build(),
            None,
        )
        .await?;

    db.collection::<Document>("companies")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(unique.clone())
                .build(),
            None,
        )
        .await?;

    db.collection::<Document>("applications")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "applicantId": 1, "jobId": 1 })
                .options(unique)
                .build(),
            None,
        )
        .await?;

    Ok(())
}
