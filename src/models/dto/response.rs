use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    Period, PromptStatement, Question, ScoreResult, Session, SessionStatus,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SessionDto {
    pub id: String,
    pub period_key: String,
    pub status: SessionStatus,
    /// One entry per question; `null` while unanswered.
    pub responses: Vec<Option<String>>,
    pub answered_count: u32,
    pub total_questions: u32,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<i64>,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        SessionDto {
            id: session.id().to_string(),
            period_key: session.period_key().to_string(),
            status: session.status(),
            responses: session
                .responses()
                .iter()
                .map(|r| r.selected().map(str::to_string))
                .collect(),
            answered_count: session.answered_count() as u32,
            total_questions: session.responses().len() as u32,
            started_at: session.started_at(),
            completed_at: session.completed_at(),
            elapsed_seconds: session.elapsed().map(|d| d.num_seconds()),
        }
    }
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        SessionDto::from(&session)
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ScoreDto {
    pub session_id: String,
    pub period_key: String,
    pub total_questions: u32,
    pub correct_count: u32,
    pub percentage: f64,
    pub per_question_correctness: Vec<bool>,
    pub completed_at: DateTime<Utc>,
}

impl From<ScoreResult> for ScoreDto {
    fn from(result: ScoreResult) -> Self {
        ScoreDto {
            session_id: result.session_id().to_string(),
            period_key: result.period_key().to_string(),
            total_questions: result.total_questions(),
            correct_count: result.correct_count(),
            percentage: result.percentage(),
            per_question_correctness: result.per_question_correctness().to_vec(),
            completed_at: result.completed_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PeriodSummary {
    pub key: String,
    pub title: Option<String>,
    pub question_count: u32,
}

impl From<&Period> for PeriodSummary {
    fn from(period: &Period) -> Self {
        PeriodSummary {
            key: period.key().to_string(),
            title: period.title().map(str::to_string),
            question_count: period.len() as u32,
        }
    }
}

/// A period as shown to someone taking it: no correct options.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PeriodForTaking {
    pub key: String,
    pub title: Option<String>,
    pub questions: Vec<QuestionForTaking>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionForTaking {
    pub index: u32,
    pub id: String,
    pub prompt: String,
    pub stem: String,
    pub statements: Vec<PromptStatement>,
    pub options: Vec<String>,
}

impl QuestionForTaking {
    fn new(index: usize, question: &Question) -> Self {
        QuestionForTaking {
            index: index as u32,
            id: question.id().to_string(),
            prompt: question.prompt().to_string(),
            stem: question.stem().to_string(),
            statements: question.statements().to_vec(),
            options: question.options().to_vec(),
        }
    }
}

impl From<&Period> for PeriodForTaking {
    fn from(period: &Period) -> Self {
        PeriodForTaking {
            key: period.key().to_string(),
            title: period.title().map(str::to_string),
            questions: period
                .questions()
                .iter()
                .enumerate()
                .map(|(index, question)| QuestionForTaking::new(index, question))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
    pub has_more: bool,
}

impl PaginationMetadata {
    pub fn new(offset: i64, limit: i64, total: i64) -> Self {
        Self {
            offset,
            limit,
            total,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginatedSessions {
    pub items: Vec<SessionDto>,
    pub pagination: PaginationMetadata,
}
