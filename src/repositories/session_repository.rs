use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{FindOneOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::ProblemSession};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: ProblemSession) -> AppResult<ProblemSession>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ProblemSession>>;
    /// The most recently created session, used for the novelty check on
    /// problem generation.
    async fn find_latest(&self) -> AppResult<Option<ProblemSession>>;
    async fn list_all(&self) -> AppResult<Vec<ProblemSession>>;
}

pub struct MongoSessionRepository {
    collection: Collection<ProblemSession>,
}

impl MongoSessionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for sessions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();

        self.collection.create_index(created_at_index).await?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MongoSessionRepository {
    async fn create(&self, session: ProblemSession) -> AppResult<ProblemSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<ProblemSession>> {
        let session = self.collection.find_one(doc! { "id": id }).await?;
        Ok(session)
    }

    async fn find_latest(&self) -> AppResult<Option<ProblemSession>> {
        let options = FindOneOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let session = self
            .collection
            .find_one(doc! {})
            .with_options(options)
            .await?;
        Ok(session)
    }

    async fn list_all(&self) -> AppResult<Vec<ProblemSession>> {
        use futures::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let items: Vec<ProblemSession> = cursor.try_collect().await?;

        Ok(items)
    }
}
