use indexmap::IndexMap;

use crate::content::raw::RawQuestionBank;
use crate::errors::{AppError, AppResult};
use crate::models::domain::period::Period;
use crate::models::domain::question::Question;
use crate::models::domain::validation::{ValidationIssue, ValidationIssues};

/// Read-only store of every period and its questions.
///
/// A bank is only handed out after `validate` succeeds, so consumers can rely
/// on non-empty periods and on every correct option being among its options.
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    periods: IndexMap<String, Period>,
}

impl QuestionBank {
    /// Decodes the authored form into validated records.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ValidationError` carrying every issue found.
    pub fn from_raw(raw: RawQuestionBank) -> AppResult<Self> {
        let periods = raw
            .0
            .into_iter()
            .map(|(key, raw_period)| {
                let questions = raw_period
                    .questions()
                    .iter()
                    .enumerate()
                    .map(|(i, q)| {
                        Question::from_parts(&q.id_or_position(i), &q.question, q.options.clone(), &q.answer)
                    })
                    .collect();
                Period::from_parts(&key, raw_period.title().map(str::to_string), questions)
            })
            .collect();

        Self::from_periods(periods)
    }

    /// Builds a bank from periods in the given order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ValidationError` listing repeated keys together with
    /// every issue inside the periods, repeated ones included.
    pub fn from_periods(periods: Vec<Period>) -> AppResult<Self> {
        let mut map = IndexMap::new();
        let mut issues = Vec::new();
        for period in periods {
            if map.contains_key(period.key()) {
                issues.push(ValidationIssue::DuplicatePeriodKey {
                    period: period.key().to_string(),
                });
                period.collect_issues(&mut issues);
                continue;
            }
            map.insert(period.key().to_string(), period);
        }

        let bank = Self { periods: map };
        bank.collect_issues(&mut issues);
        if issues.is_empty() {
            Ok(bank)
        } else {
            Err(AppError::ValidationError(ValidationIssues::from(issues)))
        }
    }

    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no period has this key.
    pub fn get_period(&self, key: &str) -> AppResult<&Period> {
        self.periods
            .get(key)
            .ok_or_else(|| AppError::NotFound(format!("Period '{}' not found", key)))
    }

    /// Period keys in authored order.
    pub fn list_period_keys(&self) -> Vec<String> {
        self.periods.keys().cloned().collect()
    }

    pub fn periods(&self) -> impl Iterator<Item = &Period> {
        self.periods.values()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.periods.values().map(Period::len).sum()
    }

    /// Checks every period and question, collecting all issues before failing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ValidationError` listing each offending period and question.
    pub fn validate(&self) -> AppResult<()> {
        let mut issues = Vec::new();
        self.collect_issues(&mut issues);

        if issues.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(ValidationIssues::from(issues)))
        }
    }

    fn collect_issues(&self, issues: &mut Vec<ValidationIssue>) {
        for period in self.periods.values() {
            period.collect_issues(issues);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AppResult<QuestionBank> {
        let raw: RawQuestionBank = serde_json::from_str(json).expect("json should parse");
        QuestionBank::from_raw(raw)
    }

    #[test]
    fn lists_keys_in_authored_order() {
        let bank = parse(
            r#"{
                "week2": [{"question": "Q", "options": ["a", "b"], "answer": "a"}],
                "week1": [{"question": "Q", "options": ["a", "b"], "answer": "b"}]
            }"#,
        )
        .expect("bank should be valid");

        assert_eq!(bank.list_period_keys(), vec!["week2", "week1"]);
        assert_eq!(bank.question_count(), 2);
    }

    #[test]
    fn get_period_reports_missing_key() {
        let bank = QuestionBank::default();

        assert!(matches!(bank.get_period("week1"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn validation_collects_all_offenders() {
        let result = parse(
            r#"{
                "week1": [
                    {"question": "Q1", "options": ["Bhutan", "Nepal"], "answer": "Bhutan"},
                    {"question": "Q2", "options": ["Oslo", "Bergen"], "answer": "Helsinki"},
                    {"question": "Q3", "options": ["x", "y"], "answer": "z"}
                ],
                "week2": [],
                "week3": [{"id": "only", "question": "Q", "options": ["one"], "answer": "one"}]
            }"#,
        );

        let Err(AppError::ValidationError(issues)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(
            issues.offending_question_ids(),
            vec!["week1/q2", "week1/q3", "week3/only"]
        );
        assert!(issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::EmptyPeriod { period } if period == "week2")));
    }

    #[test]
    fn from_periods_collects_repeated_keys_with_other_issues() {
        let question = Question::new("week1", "q1", "Q", vec!["a".into(), "b".into()], "a")
            .expect("question should be valid");
        let period = Period::new("week1", None, vec![question]).expect("period should be valid");
        let broken = Period::from_parts(
            "week2",
            None,
            vec![Question::from_parts("q1", "Q", vec!["a".into(), "b".into()], "c")],
        );

        let result = QuestionBank::from_periods(vec![period.clone(), broken, period]);

        let Err(AppError::ValidationError(issues)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::DuplicatePeriodKey { period } if period == "week1")));
        assert_eq!(issues.offending_question_ids(), vec!["week2/q1"]);
    }
}
