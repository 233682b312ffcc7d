pub mod period;
pub mod question;
pub mod question_bank;
pub mod report;
pub mod score;
pub mod session;
pub mod validation;
pub use period::Period;
pub use question::{PromptStatement, Question};
pub use question_bank::QuestionBank;
pub use report::{ReportItem, ReportView};
pub use score::ScoreResult;
pub use session::{Response, Session, SessionStatus};
pub use validation::{ValidationIssue, ValidationIssues};
