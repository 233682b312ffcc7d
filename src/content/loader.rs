use std::{fs, path::Path};

use crate::{
    content::raw::RawQuestionBank,
    errors::{AppError, AppResult},
    models::domain::QuestionBank,
};

/// Parses and validates a question bank from its JSON text.
pub fn parse_bank(json: &str) -> AppResult<QuestionBank> {
    let raw: RawQuestionBank = serde_json::from_str(json)?;
    QuestionBank::from_raw(raw)
}

/// Reads the content file once at startup.
///
/// Validation problems are logged one per line before the error is returned,
/// so a bad deploy shows exactly which questions need fixing.
pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<QuestionBank> {
    let path = path.as_ref();
    log::info!("Loading question bank from {}", path.display());

    let json = fs::read_to_string(path)?;
    let bank = parse_bank(&json).inspect_err(|err| {
        if let AppError::ValidationError(issues) = err {
            for issue in issues.iter() {
                log::error!("Question bank issue: {}", issue);
            }
        }
    })?;

    log::info!(
        "Loaded {} periods with {} questions",
        bank.len(),
        bank.question_count()
    );
    Ok(bank)
}
