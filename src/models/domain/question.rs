use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::content::prompt::split_statements;
use crate::models::domain::validation::ValidationIssue;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

/// A lettered sub-statement embedded in a prompt, e.g. `a) Stacks are LIFO`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct PromptStatement {
    pub label: String,
    pub text: String,
}

/// A multiple-choice question with exactly one correct option.
///
/// The correct option is matched by string equality against `options`, never
/// by position, so the authored display order is free to change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    id: String,
    prompt: String,
    stem: String,
    statements: Vec<PromptStatement>,
    options: Vec<String>,
    correct_option: String,
}

impl Question {
    /// Builds a question, checking that the correct option is one of the options.
    pub fn new(
        period: &str,
        id: &str,
        prompt: &str,
        options: Vec<String>,
        correct_option: &str,
    ) -> Result<Self, ValidationIssue> {
        let question = Self::from_parts(id, prompt, options, correct_option);
        if !question.has_option(correct_option) {
            return Err(ValidationIssue::MissingCorrectOption {
                period: period.to_string(),
                question_id: id.to_string(),
                correct_option: correct_option.to_string(),
            });
        }
        Ok(question)
    }

    /// Builds a question without checks; the bank validates it afterwards.
    pub(crate) fn from_parts(
        id: &str,
        prompt: &str,
        options: Vec<String>,
        correct_option: &str,
    ) -> Self {
        let (stem, statements) = split_statements(prompt);
        Self {
            id: id.to_string(),
            prompt: prompt.trim().to_string(),
            stem,
            statements,
            options,
            correct_option: correct_option.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The prompt text before any lettered sub-statements.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn statements(&self) -> &[PromptStatement] {
        &self.statements
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }

    pub fn is_correct(&self, value: &str) -> bool {
        self.correct_option == value
    }

    /// Appends every invariant this question breaks to `issues`.
    pub(crate) fn collect_issues(&self, period: &str, issues: &mut Vec<ValidationIssue>) {
        if self.prompt.is_empty() {
            issues.push(ValidationIssue::BlankPrompt {
                period: period.to_string(),
                question_id: self.id.clone(),
            });
        }

        let count = self.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            issues.push(ValidationIssue::OptionCount {
                period: period.to_string(),
                question_id: self.id.clone(),
                count,
            });
        }

        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].contains(option) {
                issues.push(ValidationIssue::DuplicateOption {
                    period: period.to_string(),
                    question_id: self.id.clone(),
                    option: option.clone(),
                });
            }
        }

        if !self.has_option(&self.correct_option) {
            issues.push(ValidationIssue::MissingCorrectOption {
                period: period.to_string(),
                question_id: self.id.clone(),
                correct_option: self.correct_option.clone(),
            });
        }
    }
}
