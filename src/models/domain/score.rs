use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Correctness of a finalized session. Derived data: rebuild it, never edit it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreResult {
    session_id: String,
    period_key: String,
    total_questions: u32,
    correct_count: u32,
    per_question_correctness: Vec<bool>,
    completed_at: DateTime<Utc>,
}

impl ScoreResult {
    pub(crate) fn new(
        session_id: &str,
        period_key: &str,
        per_question_correctness: Vec<bool>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let correct_count = per_question_correctness.iter().filter(|c| **c).count();
        Self {
            session_id: session_id.to_string(),
            period_key: period_key.to_string(),
            total_questions: per_question_correctness.len() as u32,
            correct_count: correct_count as u32,
            per_question_correctness,
            completed_at,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn period_key(&self) -> &str {
        &self.period_key
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn per_question_correctness(&self) -> &[bool] {
        &self.per_question_correctness
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Share of correct answers in percent; 0 for an empty result.
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.correct_count) * 100.0 / f64::from(self.total_questions)
    }
}
