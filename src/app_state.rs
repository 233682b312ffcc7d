use std::sync::Arc;

use crate::{
    config::{Config, SessionStore},
    content::load_from_path,
    db::Database,
    errors::AppResult,
    models::domain::QuestionBank,
    repositories::{InMemorySessionRepository, MongoSessionRepository, SessionRepository},
    services::{report_service::ReportService, session_service::SessionService},
    time::Clock,
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Loads and validates the question bank, then opens the session store.
    /// An invalid bank stops startup here.
    pub async fn new(config: Config) -> AppResult<Self> {
        let bank = load_from_path(&config.question_bank_path)?;

        let repository: Arc<dyn SessionRepository> = match config.session_store {
            SessionStore::Memory => {
                log::info!("Using in-memory session store");
                Arc::new(InMemorySessionRepository::new())
            }
            SessionStore::Mongo => {
                let db = Database::connect(&config).await?;
                Arc::new(MongoSessionRepository::new(
                    &db,
                    &config.sessions_collection,
                ))
            }
        };
        repository.ensure_indexes().await?;

        Ok(Self::from_parts(bank, repository, Clock::System, config))
    }

    pub fn from_parts(
        bank: QuestionBank,
        repository: Arc<dyn SessionRepository>,
        clock: Clock,
        config: Config,
    ) -> Self {
        let reporter = ReportService::new(config.pass_mark_percent);
        let session_service = Arc::new(SessionService::new(
            Arc::new(bank),
            repository,
            reporter,
            clock,
        ));

        Self {
            session_service,
            config: Arc::new(config),
        }
    }

    #[cfg(test)]
    pub fn test_state() -> Self {
        Self::from_parts(
            crate::test_utils::fixtures::test_bank(),
            Arc::new(InMemorySessionRepository::new()),
            crate::time::fixed_clock(),
            Config::test_config(),
        )
    }
}
