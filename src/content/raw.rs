use indexmap::IndexMap;
use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};

/// The question bank as authored: period keys mapped to their questions,
/// in the order they appear in the file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct RawQuestionBank(pub IndexMap<String, RawPeriod>);

/// A period is either a bare list of questions or an object with a title.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum RawPeriod {
    Questions(Vec<RawQuestion>),
    Titled {
        /// # Display title of the period
        #[serde(default)]
        title: Option<String>,
        /// # Questions in presentation order
        questions: Vec<RawQuestion>,
    },
}

impl RawPeriod {
    pub fn title(&self) -> Option<&str> {
        match self {
            RawPeriod::Questions(_) => None,
            RawPeriod::Titled { title, .. } => title.as_deref(),
        }
    }

    pub fn questions(&self) -> &[RawQuestion] {
        match self {
            RawPeriod::Questions(questions) => questions,
            RawPeriod::Titled { questions, .. } => questions,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawQuestion {
    /// # Stable identifier within the period
    /// Assigned from the position (`q1`, `q2`, ...) when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// # Question text
    /// May embed lettered sub-statements such as `a) ... b) ...`.
    #[serde(alias = "prompt")]
    pub question: String,
    /// # Choices in display order
    pub options: Vec<String>,
    /// # The correct choice, matched by exact text
    #[serde(alias = "correct_option", alias = "correctOption")]
    pub answer: String,
}

impl RawQuestion {
    pub fn id_or_position(&self, index: usize) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => format!("q{}", index + 1),
        }
    }
}

/// JSON Schema describing the content file.
pub fn raw_bank_schema() -> Schema {
    schemars::schema_for!(RawQuestionBank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_authored_period_order() {
        let json = r#"{
            "week3": [{"question": "Q", "options": ["a", "b"], "answer": "a"}],
            "week1": [{"question": "Q", "options": ["a", "b"], "answer": "b"}],
            "week2": {"title": "Graphs", "questions": [{"prompt": "Q", "options": ["a", "b"], "correctOption": "a"}]}
        }"#;

        let raw: RawQuestionBank = serde_json::from_str(json).expect("bank should parse");
        let keys: Vec<&str> = raw.0.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["week3", "week1", "week2"]);
        assert_eq!(raw.0["week2"].title(), Some("Graphs"));
        assert_eq!(raw.0["week2"].questions()[0].answer, "a");
    }

    #[test]
    fn rejects_unknown_question_fields() {
        let json = r#"{"week1": [{"question": "Q", "options": ["a"], "answer": "a", "points": 3}]}"#;

        assert!(serde_json::from_str::<RawQuestionBank>(json).is_err());
    }

    #[test]
    fn missing_ids_fall_back_to_position() {
        let question = RawQuestion {
            id: None,
            question: "Q".into(),
            options: vec![],
            answer: String::new(),
        };

        assert_eq!(question.id_or_position(0), "q1");
        assert_eq!(question.id_or_position(4), "q5");
    }

    #[test]
    fn schema_describes_question_fields() {
        let schema = serde_json::to_string(&raw_bank_schema()).expect("schema should serialize");

        assert!(schema.contains("options"));
        assert!(schema.contains("answer"));
    }
}
