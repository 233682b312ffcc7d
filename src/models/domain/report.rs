use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::question::PromptStatement;

/// A scored session laid out for display or export.
#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct ReportView {
    pub session_id: String,
    pub period_key: String,
    pub period_title: Option<String>,
    pub total_questions: u32,
    pub correct_count: u32,
    pub percentage: f64,
    pub pass_mark_percent: u8,
    pub passed: bool,
    pub duration_seconds: Option<i64>,
    pub items: Vec<ReportItem>,
}

/// One question of the report: what was asked, chosen, and expected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ReportItem {
    pub index: u32,
    pub question_id: String,
    pub prompt: String,
    pub statements: Vec<PromptStatement>,
    pub chosen_option: Option<String>,
    pub correct_option: String,
    pub is_correct: bool,
}
