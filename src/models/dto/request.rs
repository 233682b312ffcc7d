use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::repositories::SessionQuery;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct StartSessionRequest {
    #[serde(alias = "periodKey")]
    #[validate(length(min = 1, max = 100))]
    pub period_key: String,
}

/// Body of `PUT /api/sessions/{id}/answers/{index}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectAnswerRequest {
    #[validate(length(min = 1, max = 1000))]
    pub option: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SelectAnswerInput {
    #[validate(length(min = 1, max = 100))]
    pub session_id: String,

    #[validate(range(min = 0))]
    pub question_index: i32,

    #[validate(length(min = 1, max = 1000))]
    pub option: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, InputObject)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    pub limit: Option<i64>,

    #[serde(alias = "periodKey")]
    pub period_key: Option<String>,
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn to_query(&self) -> SessionQuery {
        SessionQuery {
            period_key: self
                .period_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            offset: self.offset(),
            limit: self.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_start_session_accepts_camel_case() {
        let request: StartSessionRequest =
            serde_json::from_str(r#"{"periodKey": "week1"}"#).unwrap();

        assert_eq!(request.period_key, "week1");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_start_session_rejects_empty_period() {
        let request = StartSessionRequest {
            period_key: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_select_answer_rejects_negative_index() {
        let input = SelectAnswerInput {
            session_id: "abc".to_string(),
            question_index: -1,
            option: "Bhutan".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_select_answer_rejects_empty_option() {
        let request = SelectAnswerRequest {
            option: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_pagination_limit_is_clamped() {
        let huge = PaginationParams {
            limit: Some(500),
            ..Default::default()
        };
        let zero = PaginationParams {
            limit: Some(0),
            ..Default::default()
        };

        assert_eq!(huge.limit(), MAX_PAGE_SIZE);
        assert_eq!(zero.limit(), 1);
        assert_eq!(PaginationParams::default().limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_pagination_query_drops_blank_period() {
        let params = PaginationParams {
            offset: Some(5),
            limit: Some(10),
            period_key: Some("  ".to_string()),
        };

        let query = params.to_query();

        assert_eq!(query.period_key, None);
        assert_eq!(query.offset, 5);
        assert_eq!(query.limit, 10);
    }
}
