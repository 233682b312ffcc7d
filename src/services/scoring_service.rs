use crate::{
    errors::{AppError, AppResult},
    models::domain::{Period, ScoreResult, Session},
};

pub struct ScoringService;

impl ScoringService {
    /// Scores a finalized session against the period it was taken on.
    ///
    /// Unanswered questions count as incorrect. The result depends only on the
    /// finalized session and the period, so repeated calls agree exactly.
    pub fn score(session: &Session, period: &Period) -> AppResult<ScoreResult> {
        let completed_at = session.completed_at().ok_or_else(|| {
            AppError::SessionNotFinalized(format!(
                "Session '{}' must be finalized before it can be scored",
                session.id()
            ))
        })?;

        session.ensure_matches(period)?;

        let per_question_correctness = session
            .responses()
            .iter()
            .zip(period.questions())
            .map(|(response, question)| {
                response
                    .selected()
                    .map(|value| question.is_correct(value))
                    .unwrap_or(false)
            })
            .collect();

        Ok(ScoreResult::new(
            session.id(),
            session.period_key(),
            per_question_correctness,
            completed_at,
        ))
    }
}
