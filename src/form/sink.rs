//! Submission records and where they are delivered

use super::answer::AnswerMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of a successfully submitted form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub form_title: String,
    pub answers: AnswerMap,
}

impl Submission {
    pub fn new(form_title: &str, answers: AnswerMap) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            form_title: form_title.to_string(),
            answers,
        }
    }
}

/// Receiver for submitted answers. Delivery is fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionSink {
    fn deliver(&mut self, submission: &Submission);
}

/// Sink that records submissions in the log
#[derive(Debug, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn deliver(&mut self, submission: &Submission) {
        let answers = answers_json(submission);
        tracing::info!(
            submission_id = %submission.id,
            form = %submission.form_title,
            answer_count = submission.answers.len(),
            %answers,
            "Form submitted"
        );
    }
}

/// Answers as compact JSON for the log line
fn answers_json(submission: &Submission) -> String {
    match serde_json::to_string(&submission.answers) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(submission_id = %submission.id, "Failed to serialise answers: {err}");
            format!("<unserialisable: {err}>")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::answer::AnswerValue;

    #[test]
    fn test_new_submission_gets_unique_id() {
        let a = Submission::new("Form", AnswerMap::new());
        let b = Submission::new("Form", AnswerMap::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_submission_serializes_answers_as_plain_values() {
        let mut answers = AnswerMap::new();
        answers.insert("email".into(), AnswerValue::Text("a@b.com".into()));
        let submission = Submission::new("Mini Survey Form", answers);

        let json: serde_json::Value = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["form_title"], "Mini Survey Form");
        assert_eq!(json["answers"]["email"], "a@b.com");
        assert!(json["submitted_at"].is_string());
    }

    #[test]
    fn test_logged_answers_are_json() {
        let mut answers = AnswerMap::new();
        answers.insert("services".into(), AnswerValue::Choices(vec!["Design".into()]));
        let submission = Submission::new("Form", answers);
        assert_eq!(answers_json(&submission), r#"{"services":["Design"]}"#);
    }

    #[test]
    fn test_log_sink_accepts_submission() {
        let mut sink = LogSink;
        sink.deliver(&Submission::new("Form", AnswerMap::new()));
    }
}
