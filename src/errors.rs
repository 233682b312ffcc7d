use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

use crate::models::domain::validation::ValidationIssues;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Session closed: {0}")]
    SessionClosed(String),

    #[error("Session not finalized: {0}")]
    SessionNotFinalized(String),

    #[error("Validation error: {0}")]
    ValidationError(ValidationIssues),

    #[error(
        "Length mismatch: {correctness} correctness flags, {questions} questions, {responses} responses"
    )]
    LengthMismatch {
        correctness: usize,
        questions: usize,
        responses: usize,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Content error: {0}")]
    ContentError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidOption(_) => "INVALID_OPTION",
            AppError::SessionClosed(_) => "SESSION_CLOSED",
            AppError::SessionNotFinalized(_) => "SESSION_NOT_FINALIZED",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ContentError(_) => "CONTENT_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Text that is safe to show to the person taking the quiz.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "The requested item could not be found.".to_string(),
            AppError::InvalidOption(_) | AppError::SessionClosed(_) => {
                "This answer cannot be submitted.".to_string()
            }
            AppError::SessionNotFinalized(_) => {
                "Finish the quiz before requesting a score.".to_string()
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Unauthorized(_) => "Please sign in to continue.".to_string(),
            AppError::ValidationError(_)
            | AppError::LengthMismatch { .. }
            | AppError::DatabaseError(_)
            | AppError::ContentError(_)
            | AppError::InternalError(_) => "Something went wrong on our side.".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidOption(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SessionClosed(_) => StatusCode::CONFLICT,
            AppError::SessionNotFinalized(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::LengthMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ContentError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            message: self.user_message(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ContentError(format!("malformed question bank: {}", err))
    }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ContentError(format!("cannot read question bank: {}", err))
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
            e.set("message", self.user_message());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::validation::ValidationIssue;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("week9".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidOption("test".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::SessionClosed("test".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::BadRequest("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("period 'week9'".into());
        assert_eq!(err.to_string(), "Not found: period 'week9'");

        let err = AppError::LengthMismatch {
            correctness: 2,
            questions: 3,
            responses: 3,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch: 2 correctness flags, 3 questions, 3 responses"
        );
    }

    #[test]
    fn rejected_submissions_share_a_friendly_message() {
        let invalid = AppError::InvalidOption("x".into());
        let closed = AppError::SessionClosed("x".into());

        assert_eq!(invalid.user_message(), closed.user_message());
        assert_eq!(invalid.user_message(), "This answer cannot be submitted.");
    }

    #[test]
    fn validation_error_lists_every_issue() {
        let err = AppError::ValidationError(ValidationIssues::from(vec![
            ValidationIssue::EmptyPeriod {
                period: "week2".into(),
            },
            ValidationIssue::MissingCorrectOption {
                period: "week1".into(),
                question_id: "q3".into(),
                correct_option: "Peru".into(),
            },
        ]));

        let text = err.to_string();
        assert!(text.contains("week2"));
        assert!(text.contains("q3"));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
