pub mod loader;
pub mod prompt;
pub mod raw;

pub use loader::{load_from_path, parse_bank};
pub use raw::{raw_bank_schema, RawQuestionBank};
