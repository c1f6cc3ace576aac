use async_trait::async_trait;
use mongodb::{bson::doc, options::FindOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Submission};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    /// Submissions for one session, oldest first.
    async fn list_by_session(&self, session_id: &str) -> AppResult<Vec<Submission>>;
    async fn list_all(&self) -> AppResult<Vec<Submission>>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        let session_index = IndexModel::builder()
            .keys(doc! { "session_id": 1, "created_at": 1 })
            .build();

        self.collection.create_index(session_index).await?;

        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn list_by_session(&self, session_id: &str) -> AppResult<Vec<Submission>> {
        use futures::TryStreamExt;

        let options = FindOptions::builder().sort(doc! { "created_at": 1 }).build();

        let cursor = self
            .collection
            .find(doc! { "session_id": session_id })
            .with_options(options)
            .await?;
        let items: Vec<Submission> = cursor.try_collect().await?;

        Ok(items)
    }

    async fn list_all(&self) -> AppResult<Vec<Submission>> {
        use futures::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let items: Vec<Submission> = cursor.try_collect().await?;

        Ok(items)
    }
}
