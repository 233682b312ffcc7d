use serde::Serialize;

use crate::models::domain::question::Question;
use crate::models::domain::validation::ValidationIssue;

/// A named group of questions, e.g. one week of course content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Period {
    key: String,
    title: Option<String>,
    questions: Vec<Question>,
}

impl Period {
    pub fn new(
        key: &str,
        title: Option<String>,
        questions: Vec<Question>,
    ) -> Result<Self, ValidationIssue> {
        if questions.is_empty() {
            return Err(ValidationIssue::EmptyPeriod {
                period: key.to_string(),
            });
        }
        Ok(Self::from_parts(key, title, questions))
    }

    pub(crate) fn from_parts(key: &str, title: Option<String>, questions: Vec<Question>) -> Self {
        Self {
            key: key.to_string(),
            title,
            questions,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub(crate) fn collect_issues(&self, issues: &mut Vec<ValidationIssue>) {
        if self.questions.is_empty() {
            issues.push(ValidationIssue::EmptyPeriod {
                period: self.key.clone(),
            });
        }

        for (i, question) in self.questions.iter().enumerate() {
            let repeated = self.questions[..i].iter().any(|q| q.id() == question.id());
            if repeated {
                issues.push(ValidationIssue::DuplicateQuestionId {
                    period: self.key.clone(),
                    question_id: question.id().to_string(),
                });
            }
            question.collect_issues(&self.key, issues);
        }
    }
}
