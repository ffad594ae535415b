//! Job Repository

use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection, Database};

use crate::domain::Job;
use crate::error::Result;

pub struct JobRepository {
    collection: Collection<Job>,
}

impl JobRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("jobs"),
        }
    }

    fn newest_first() -> FindOptions {
        FindOptions::builder().sort(doc! { "createdAt": -1 }).build()
    }

    pub async fn insert(&self, job: &Job) -> Result<()> {
        self.collection.insert_one(job, None).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Job>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Job>> {
        let cursor = self.collection.find(doc! {}, Self::newest_first()).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_poster(&self, user_id: &str) -> Result<Vec<Job>> {
        let cursor = self
            .collection
            .find(doc! { "postedBy": user_id }, Self::newest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update(&self, job: &Job) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &job.id }, job, None)
            .await?;
        Ok(())
    }
}
