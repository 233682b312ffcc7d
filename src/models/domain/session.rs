use async_graphql::Enum;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::period::Period;

/// One answer slot of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Response {
    #[default]
    Unanswered,
    Selected(String),
}

impl Response {
    pub fn selected(&self) -> Option<&str> {
        match self {
            Response::Unanswered => None,
            Response::Selected(value) => Some(value),
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Response::Selected(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
pub enum SessionStatus {
    Open,
    Finalized,
}

/// A user's attempt at one period.
///
/// Open sessions accept answers; `finalize` moves them to `Finalized`, after
/// which nothing about the session changes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    id: String,
    user_id: String,
    period_key: String,
    responses: Vec<Response>,
    started_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Starts an attempt with every question unanswered.
    pub fn start(user_id: &str, period: &Period, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            period_key: period.key().to_string(),
            responses: vec![Response::Unanswered; period.len()],
            started_at: now,
            completed_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn period_key(&self) -> &str {
        &self.period_key
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn status(&self) -> SessionStatus {
        if self.completed_at.is_some() {
            SessionStatus::Finalized
        } else {
            SessionStatus::Open
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_answered()).count()
    }

    /// Time between start and finalize; `None` while the session is open.
    pub fn elapsed(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }

    /// Records `option` as the answer to question `index`, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// - `AppError::SessionClosed` if the session is finalized.
    /// - `AppError::InvalidOption` if the index is out of range or the option
    ///   is not one of the question's options.
    /// - `AppError::BadRequest` if `period` is not the session's period.
    /// - `AppError::LengthMismatch` if the session and period disagree on size.
    pub fn select_answer(&mut self, period: &Period, index: usize, option: &str) -> AppResult<()> {
        if self.is_finalized() {
            return Err(AppError::SessionClosed(format!(
                "Session '{}' is finalized and no longer accepts answers",
                self.id
            )));
        }
        self.ensure_matches(period)?;

        let question = period.question(index).ok_or_else(|| {
            AppError::InvalidOption(format!(
                "Question index {} is out of range for period '{}' with {} questions",
                index,
                period.key(),
                period.len()
            ))
        })?;

        if !question.has_option(option) {
            return Err(AppError::InvalidOption(format!(
                "'{}' is not an option of question '{}'",
                option,
                question.id()
            )));
        }

        self.responses[index] = Response::Selected(option.to_string());
        Ok(())
    }

    /// Closes the session. Calling it a second time is an error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SessionClosed` if the session is already finalized.
    pub fn finalize(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.is_finalized() {
            return Err(AppError::SessionClosed(format!(
                "Session '{}' is already finalized",
                self.id
            )));
        }
        self.completed_at = Some(now);
        Ok(())
    }

    /// Fails unless this session was started against `period` as it is now.
    pub(crate) fn ensure_matches(&self, period: &Period) -> AppResult<()> {
        if period.key() != self.period_key {
            return Err(AppError::BadRequest(format!(
                "Session '{}' belongs to period '{}', not '{}'",
                self.id,
                self.period_key,
                period.key()
            )));
        }
        if period.len() != self.responses.len() {
            return Err(AppError::LengthMismatch {
                correctness: self.responses.len(),
                questions: period.len(),
                responses: self.responses.len(),
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_responses(mut self, responses: Vec<Response>) -> Self {
        self.responses = responses;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_period_key(mut self, period_key: &str) -> Self {
        self.period_key = period_key.to_string();
        self
    }
}
