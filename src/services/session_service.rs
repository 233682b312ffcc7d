use std::{collections::HashMap, future::Future, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Period, QuestionBank, ReportView, ScoreResult, Session},
    repositories::{SessionQuery, SessionRepository},
    services::{report_service::ReportService, scoring_service::ScoringService},
    time::Clock,
};

/// One mutex per session id. Mutations hold the guard across the whole
/// read-modify-write against the repository.
///
/// An entry lives only while some call holds or waits on it.
#[derive(Default)]
struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(session_id.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    /// Drops the entry once no other call holds a handle to it.
    async fn release(&self, session_id: &str) {
        let mut locks = self.locks.lock().await;
        if locks
            .get(session_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(session_id);
        }
    }

    /// Runs `operation` while holding the session's lock.
    async fn run<T>(&self, session_id: &str, operation: impl Future<Output = T>) -> T {
        let guard = self.acquire(session_id).await;
        let output = operation.await;
        drop(guard);
        self.release(session_id).await;
        output
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}

pub struct SessionService {
    bank: Arc<QuestionBank>,
    repository: Arc<dyn SessionRepository>,
    reporter: ReportService,
    clock: Clock,
    locks: SessionLocks,
}

impl SessionService {
    pub fn new(
        bank: Arc<QuestionBank>,
        repository: Arc<dyn SessionRepository>,
        reporter: ReportService,
        clock: Clock,
    ) -> Self {
        Self {
            bank,
            repository,
            reporter,
            clock,
            locks: SessionLocks::default(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn pass_mark_percent(&self) -> u8 {
        self.reporter.pass_mark_percent()
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.health_check().await
    }

    pub async fn start_session(&self, user_id: &str, period_key: &str) -> AppResult<Session> {
        let period = self.bank.get_period(period_key)?;
        let session = Session::start(user_id, period, self.clock.now());
        let session = self.repository.save(session).await?;

        log::info!(
            "Started session {} on period '{}' for user {}",
            session.id(),
            period_key,
            user_id
        );
        Ok(session)
    }

    /// Loads a session owned by `user_id`. Sessions of other users are
    /// reported as missing.
    pub async fn get_session(&self, user_id: &str, session_id: &str) -> AppResult<Session> {
        self.repository
            .find_by_id(session_id)
            .await?
            .filter(|session| session.user_id() == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", session_id)))
    }

    pub async fn list_sessions(
        &self,
        user_id: &str,
        query: &SessionQuery,
    ) -> AppResult<(Vec<Session>, i64)> {
        self.repository.find_by_user(user_id, query).await
    }

    pub async fn select_answer(
        &self,
        user_id: &str,
        session_id: &str,
        index: usize,
        option: &str,
    ) -> AppResult<Session> {
        self.locks
            .run(
                session_id,
                self.apply_answer(user_id, session_id, index, option),
            )
            .await
    }

    pub async fn finalize(&self, user_id: &str, session_id: &str) -> AppResult<Session> {
        self.locks
            .run(session_id, self.apply_finalize(user_id, session_id))
            .await
    }

    pub async fn score(&self, user_id: &str, session_id: &str) -> AppResult<ScoreResult> {
        let session = self.get_session(user_id, session_id).await?;
        let period = self.period_of(&session)?;
        ScoringService::score(&session, period)
    }

    pub async fn report(&self, user_id: &str, session_id: &str) -> AppResult<ReportView> {
        let session = self.get_session(user_id, session_id).await?;
        let period = self.period_of(&session)?;
        let result = ScoringService::score(&session, period)?;
        self.reporter.format(&result, &session, period)
    }

    async fn apply_answer(
        &self,
        user_id: &str,
        session_id: &str,
        index: usize,
        option: &str,
    ) -> AppResult<Session> {
        let mut session = self.get_session(user_id, session_id).await?;
        let period = self.period_of(&session)?;

        session
            .select_answer(period, index, option)
            .inspect_err(|err| {
                log::warn!(
                    "Rejected answer for session {} question {}: {}",
                    session_id,
                    index,
                    err
                )
            })?;

        let session = self.repository.save(session).await?;
        log::debug!("Session {} question {} answered", session_id, index);
        Ok(session)
    }

    async fn apply_finalize(&self, user_id: &str, session_id: &str) -> AppResult<Session> {
        let mut session = self.get_session(user_id, session_id).await?;
        session.finalize(self.clock.now()).inspect_err(|err| {
            log::warn!("Rejected finalize for session {}: {}", session_id, err)
        })?;

        let session = self.repository.save(session).await?;
        log::info!(
            "Finalized session {} with {}/{} answered",
            session_id,
            session.answered_count(),
            session.responses().len()
        );
        Ok(session)
    }

    fn period_of(&self, session: &Session) -> AppResult<&Period> {
        self.bank.get_period(session.period_key()).map_err(|_| {
            AppError::InternalError(format!(
                "Session '{}' references period '{}' which is not in the question bank",
                session.id(),
                session.period_key()
            ))
        })
    }
}
