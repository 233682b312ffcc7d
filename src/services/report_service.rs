use crate::{
    errors::{AppError, AppResult},
    models::domain::{Period, ReportItem, ReportView, ScoreResult, Session},
};

#[derive(Clone, Copy, Debug)]
pub struct ReportService {
    pass_mark_percent: u8,
}

impl ReportService {
    pub fn new(pass_mark_percent: u8) -> Self {
        Self {
            pass_mark_percent: pass_mark_percent.min(100),
        }
    }

    pub fn pass_mark_percent(&self) -> u8 {
        self.pass_mark_percent
    }

    /// Lays out a score next to the questions and the answers given.
    ///
    /// The correctness flags, the period's questions and the session's
    /// responses are zipped by index and must all have the same length.
    pub fn format(
        &self,
        result: &ScoreResult,
        session: &Session,
        period: &Period,
    ) -> AppResult<ReportView> {
        if result.session_id() != session.id() {
            return Err(AppError::BadRequest(format!(
                "Score for session '{}' cannot be reported against session '{}'",
                result.session_id(),
                session.id()
            )));
        }

        let correctness = result.per_question_correctness();
        let questions = period.questions();
        let responses = session.responses();

        if correctness.len() != questions.len() || questions.len() != responses.len() {
            return Err(AppError::LengthMismatch {
                correctness: correctness.len(),
                questions: questions.len(),
                responses: responses.len(),
            });
        }

        let items = correctness
            .iter()
            .zip(questions)
            .zip(responses)
            .enumerate()
            .map(|(index, ((is_correct, question), response))| ReportItem {
                index: index as u32,
                question_id: question.id().to_string(),
                prompt: question.prompt().to_string(),
                statements: question.statements().to_vec(),
                chosen_option: response.selected().map(str::to_string),
                correct_option: question.correct_option().to_string(),
                is_correct: *is_correct,
            })
            .collect();

        let percentage = result.percentage();

        Ok(ReportView {
            session_id: result.session_id().to_string(),
            period_key: period.key().to_string(),
            period_title: period.title().map(str::to_string),
            total_questions: result.total_questions(),
            correct_count: result.correct_count(),
            percentage,
            pass_mark_percent: self.pass_mark_percent,
            passed: percentage >= f64::from(self.pass_mark_percent),
            duration_seconds: session.elapsed().map(|d| d.num_seconds()),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Response;
    use crate::services::scoring_service::ScoringService;
    use crate::test_utils::fixtures::week1_period;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn scored_week1() -> (Session, Period, ScoreResult) {
        let period = week1_period();
        let mut session = Session::start("user-1", &period, fixed_now());
        session.select_answer(&period, 0, "Bhutan").unwrap();
        session.select_answer(&period, 1, "Finland").unwrap();
        session.finalize(fixed_now() + Duration::seconds(90)).unwrap();
        let result = ScoringService::score(&session, &period).unwrap();
        (session, period, result)
    }

    #[test]
    fn report_breaks_down_each_question() {
        let (session, period, result) = scored_week1();

        let report = ReportService::new(50).format(&result, &session, &period).unwrap();

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.items[0].chosen_option.as_deref(), Some("Bhutan"));
        assert!(report.items[0].is_correct);
        assert_eq!(report.items[1].chosen_option.as_deref(), Some("Finland"));
        assert_eq!(report.items[1].correct_option, "All of these are true");
        assert_eq!(report.items[2].chosen_option, None);
        assert_eq!(report.items[1].statements.len(), 3);
        assert_eq!(report.duration_seconds, Some(90));
        assert_eq!(report.period_title.as_deref(), Some("Warm-up"));
    }

    #[test]
    fn pass_mark_decides_passed() {
        let (session, period, result) = scored_week1();

        let lenient = ReportService::new(30).format(&result, &session, &period).unwrap();
        let strict = ReportService::new(50).format(&result, &session, &period).unwrap();

        assert!(lenient.passed);
        assert!(!strict.passed);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let (session, period, result) = scored_week1();
        let truncated = session.with_responses(vec![Response::Unanswered; 2]);

        let err = ReportService::new(50)
            .format(&result, &truncated, &period)
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::LengthMismatch {
                correctness: 3,
                questions: 3,
                responses: 2
            }
        ));
    }

    #[test]
    fn short_correctness_is_rejected() {
        let (session, period, result) = scored_week1();
        let short = ScoreResult::new(
            result.session_id(),
            result.period_key(),
            vec![true],
            result.completed_at(),
        );

        let err = ReportService::new(50).format(&short, &session, &period).unwrap_err();

        assert!(matches!(err, AppError::LengthMismatch { correctness: 1, .. }));
    }

    #[test]
    fn result_of_another_session_is_rejected() {
        let (_, period, result) = scored_week1();
        let mut other = Session::start("user-1", &period, fixed_now());
        other.finalize(fixed_now()).unwrap();

        let err = ReportService::new(50).format(&result, &other, &period).unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
