//! Form domain layer
//!
//! Declarative form definitions, answer values, validation rules and the
//! session engine that walks a user through the screens.

mod answer;
mod definition;
mod session;
mod sink;
mod steps;
mod validation;

pub use answer::{pop_char, push_char, toggle_choice, AnswerValue};
pub use definition::{FormConfig, Question, QuestionKind};
pub use session::{FormSession, QuestionView, StepView, SubmitOutcome};
pub use sink::{LogSink, Submission, SubmissionSink};
pub use validation::RuleTable;

#[cfg(test)]
pub use sink::MockSubmissionSink;
