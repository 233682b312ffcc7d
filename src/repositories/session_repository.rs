use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};
use tokio::sync::RwLock;

use crate::{db::Database, errors::AppResult, models::domain::Session};

/// Which of a user's sessions to return, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionQuery {
    pub period_key: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Session>>;
    /// Stores the session under its id, replacing any previous version.
    async fn save(&self, session: Session) -> AppResult<Session>;
    async fn find_by_user(
        &self,
        user_id: &str,
        query: &SessionQuery,
    ) -> AppResult<(Vec<Session>, i64)>;
    async fn ensure_indexes(&self) -> AppResult<()>;
    async fn health_check(&self) -> AppResult<()>;
}

pub struct MongoSessionRepository {
    collection: Collection<Session>,
    db: Database,
}

impl MongoSessionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.sessions(collection_name),
            db: db.clone(),
        }
    }
}

#[async_trait]
impl SessionRepository for MongoSessionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Session>> {
        let session = self.collection.find_one(doc! { "id": id }).await?;
        Ok(session)
    }

    async fn save(&self, session: Session) -> AppResult<Session> {
        self.collection
            .replace_one(doc! { "id": session.id() }, &session)
            .upsert(true)
            .await?;
        Ok(session)
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        query: &SessionQuery,
    ) -> AppResult<(Vec<Session>, i64)> {
        let mut filter = doc! { "user_id": user_id };

        if let Some(period_key) = &query.period_key {
            filter.insert("period_key", period_key.as_str());
        }

        let total = self.collection.count_documents(filter.clone()).await?;

        let sessions = self
            .collection
            .find(filter)
            .skip(query.offset.max(0) as u64)
            .limit(query.limit)
            .sort(doc! { "started_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((sessions, total as i64))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
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

        let user_period_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "period_key": 1, "started_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_period_started".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_period_index).await?;

        log::info!("Successfully created indexes for sessions collection");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.ping().await
    }
}

/// Process-local session store, used when no database is configured.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, session: Session) -> AppResult<Session> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().to_string(), session.clone());
        Ok(session)
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        query: &SessionQuery,
    ) -> AppResult<(Vec<Session>, i64)> {
        let sessions = self.sessions.read().await;
        let mut items: Vec<_> = sessions
            .values()
            .filter(|s| {
                s.user_id() == user_id
                    && query
                        .period_key
                        .as_deref()
                        .map(|key| s.period_key() == key)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();

        items.sort_by(|a, b| {
            b.started_at()
                .cmp(&a.started_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        let total = items.len() as i64;
        let start = query.offset.max(0) as usize;
        let end = (start + query.limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
