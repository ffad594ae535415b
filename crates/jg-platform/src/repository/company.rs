//! Company Repository

use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection, Database};

use crate::domain::Company;
use crate::error::Result;

pub struct CompanyRepository {
    collection: Collection<Company>,
}

impl CompanyRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("companies"),
        }
    }

    pub async fn insert(&self, company: &Company) -> Result<()> {
        self.collection.insert_one(company, None).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Company>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Company>> {
        Ok(self.collection.find_one(doc! { "name": name }, None).await?)
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Company>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let cursor = self
            .collection
            .find(doc! { "ownerId": owner_id }, options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update(&self, company: &Company) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &company.id }, company, None)
            .await?;
        Ok(())
    }
}
