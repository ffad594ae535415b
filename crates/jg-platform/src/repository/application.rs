//! Application Repository

use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection, Database};

use crate::domain::Application;
use crate::error::Result;

pub struct ApplicationRepository {
    collection: Collection<Application>,
}

impl ApplicationRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("applications"),
        }
    }

    pub async fn insert(&self, application: &Application) -> Result<()> {
        self.collection.insert_one(application, None).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Application>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    /// A user's applications, most recent first.
    pub async fn find_by_applicant(&self, applicant_id: &str) -> Result<Vec<Application>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let cursor = self
            .collection
            .find(doc! { "applicantId": applicant_id }, options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// All applications filed against a job, most recent first.
    pub async fn find_by_job(&self, job_id: &str) -> Result<Vec<Application>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let cursor = self
            .collection
            .find(doc! { "jobId": job_id }, options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn exists_for(&self, applicant_id: &str, job_id: &str) -> Result<bool> {
        let count = self
            .collection
            .count_documents(doc! { "applicantId": applicant_id, "jobId": job_id }, None)
            .await?;
        Ok(count > 0)
    }

    pub async fn update(&self, application: &Application) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &application.id }, application, None)
            .await?;
        Ok(())
    }
}
