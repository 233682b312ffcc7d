use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single data-quality problem found while checking the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("period '{period}' has no questions")]
    EmptyPeriod { period: String },

    #[error("period key '{period}' is used more than once")]
    DuplicatePeriodKey { period: String },

    #[error("{period}/{question_id}: correct option '{correct_option}' is not one of the options")]
    MissingCorrectOption {
        period: String,
        question_id: String,
        correct_option: String,
    },

    #[error("{period}/{question_id}: expected 2 to 4 options, found {count}")]
    OptionCount {
        period: String,
        question_id: String,
        count: usize,
    },

    #[error("{period}/{question_id}: option '{option}' appears more than once")]
    DuplicateOption {
        period: String,
        question_id: String,
        option: String,
    },

    #[error("{period}/{question_id}: question id is used more than once")]
    DuplicateQuestionId { period: String, question_id: String },

    #[error("{period}/{question_id}: prompt is blank")]
    BlankPrompt { period: String, question_id: String },
}

impl ValidationIssue {
    pub fn period(&self) -> &str {
        match self {
            ValidationIssue::EmptyPeriod { period }
            | ValidationIssue::DuplicatePeriodKey { period }
            | ValidationIssue::MissingCorrectOption { period, .. }
            | ValidationIssue::OptionCount { period, .. }
            | ValidationIssue::DuplicateOption { period, .. }
            | ValidationIssue::DuplicateQuestionId { period, .. }
            | ValidationIssue::BlankPrompt { period, .. } => period,
        }
    }

    /// The offending question, or `None` when the issue concerns a whole period.
    pub fn question_id(&self) -> Option<&str> {
        match self {
            ValidationIssue::EmptyPeriod { .. } | ValidationIssue::DuplicatePeriodKey { .. } => {
                None
            }
            ValidationIssue::MissingCorrectOption { question_id, .. }
            | ValidationIssue::OptionCount { question_id, .. }
            | ValidationIssue::DuplicateOption { question_id, .. }
            | ValidationIssue::DuplicateQuestionId { question_id, .. }
            | ValidationIssue::BlankPrompt { question_id, .. } => Some(question_id),
        }
    }
}

/// Every issue found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationIssues(Vec<ValidationIssue>);

impl ValidationIssues {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.0.iter()
    }

    /// Offending question ids as `period/question`, deduplicated, in discovery order.
    pub fn offending_question_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for issue in &self.0 {
            if let Some(question_id) = issue.question_id() {
                let qualified = format!("{}/{}", issue.period(), question_id);
                if !ids.contains(&qualified) {
                    ids.push(qualified);
                }
            }
        }
        ids
    }
}

impl From<Vec<ValidationIssue>> for ValidationIssues {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        Self(issues)
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issue(s)", self.0.len())?;
        for (i, issue) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offending_ids_skip_period_level_issues_and_duplicates() {
        let issues = ValidationIssues::from(vec![
            ValidationIssue::EmptyPeriod {
                period: "week4".into(),
            },
            ValidationIssue::OptionCount {
                period: "week1".into(),
                question_id: "q2".into(),
                count: 5,
            },
            ValidationIssue::DuplicateOption {
                period: "week1".into(),
                question_id: "q2".into(),
                option: "Oslo".into(),
            },
            ValidationIssue::BlankPrompt {
                period: "week3".into(),
                question_id: "q1".into(),
            },
        ]);

        assert_eq!(issues.len(), 4);
        assert_eq!(
            issues.offending_question_ids(),
            vec!["week1/q2".to_string(), "week3/q1".to_string()]
        );
    }

    #[test]
    fn display_joins_issues() {
        let issues = ValidationIssues::from(vec![ValidationIssue::EmptyPeriod {
            period: "week4".into(),
        }]);

        assert_eq!(issues.to_string(), "1 issue(s): period 'week4' has no questions");
    }
}
