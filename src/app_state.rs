use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoSessionRepository, MongoSubmissionRepository},
    services::{GenerationService, OpenAiChatClient, ProblemService},
};

#[derive(Clone)]
pub struct AppState {
    pub problem_service: Arc<ProblemService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let session_repository =
            Arc::new(MongoSessionRepository::new(&db, &config.sessions_collection));
        session_repository.ensure_indexes().await?;

        let submission_repository = Arc::new(MongoSubmissionRepository::new(
            &db,
            &config.submissions_collection,
        ));
        submission_repository.ensure_indexes().await?;

        let chat_client = Arc::new(OpenAiChatClient::new(&config));
        let generation_service = Arc::new(GenerationService::new(
            chat_client,
            config.candidate_models.clone(),
        ));

        let problem_service = Arc::new(ProblemService::new(
            session_repository,
            submission_repository,
            generation_service,
        ));

        Ok(Self {
            problem_service,
            db,
            config: Arc::new(config),
        })
    }
}
