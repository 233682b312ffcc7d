#[cfg(test)]
pub mod fixtures {
    use std::sync::Arc;

    use crate::{
        content::parse_bank,
        models::domain::{Period, QuestionBank},
        repositories::InMemorySessionRepository,
        services::{report_service::ReportService, session_service::SessionService},
        time::fixed_clock,
    };

    /// Week 1 answers: "Bhutan", "All of these are true", "Only C and D are true".
    pub const WEEK1_JSON: &str = r#"{
        "week1": {
            "title": "Warm-up",
            "questions": [
                {
                    "question": "Which country measures Gross National Happiness?",
                    "options": ["Bhutan", "Nepal", "Finland", "Denmark"],
                    "answer": "Bhutan"
                },
                {
                    "question": "Which statements hold? a) Published yearly b) Survey based c) Finland often ranks first",
                    "options": ["Only a is true", "Finland", "Only a and b are true", "All of these are true"],
                    "answer": "All of these are true"
                },
                {
                    "question": "Read the statements. A) one B) two C) three D) four",
                    "options": ["Only A and B are true", "Only B and C are true", "Only C and D are true"],
                    "answer": "Only C and D are true"
                }
            ]
        },
        "week2": [
            {"question": "Dijkstra fails with?", "options": ["Negative edge weights", "Cycles"], "answer": "Negative edge weights"},
            {"question": "A* is optimal with an?", "options": ["Admissible heuristic", "Random heuristic"], "answer": "Admissible heuristic"}
        ]
    }"#;

    pub fn test_bank() -> QuestionBank {
        parse_bank(WEEK1_JSON).expect("fixture bank should be valid")
    }

    pub fn week1_period() -> Period {
        test_bank()
            .get_period("week1")
            .expect("fixture bank has week1")
            .clone()
    }

    /// A session service over an in-memory store with a fixed clock.
    pub fn test_session_service() -> SessionService {
        SessionService::new(
            Arc::new(test_bank()),
            Arc::new(InMemorySessionRepository::new()),
            ReportService::new(50),
            fixed_clock(),
        )
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_bank_has_both_periods() {
        let bank = test_bank();
        assert_eq!(bank.list_period_keys(), vec!["week1", "week2"]);
    }

    #[test]
    fn test_fixture_week1_answers() {
        let period = week1_period();
        let answers: Vec<&str> = period
            .questions()
            .iter()
            .map(|q| q.correct_option())
            .collect();
        assert_eq!(
            answers,
            vec!["Bhutan", "All of these are true", "Only C and D are true"]
        );
    }
}
