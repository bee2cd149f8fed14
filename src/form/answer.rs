//! Answer value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers keyed by question id. Unanswered questions are absent.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// Error messages keyed by question id
pub type ErrorMap = BTreeMap<String, String>;

/// A single answer: free text / one option, or a list of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Choices(_) => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Choices(c) => Some(c),
            AnswerValue::Text(_) => None,
        }
    }

    /// Whether this counts as an answer for a required question:
    /// non-blank text or a non-empty list
    pub fn is_present(&self) -> bool {
        match self {
            AnswerValue::Text(s) => !s.trim().is_empty(),
            AnswerValue::Choices(c) => !c.is_empty(),
        }
    }

    /// Whether a field rule should look at this value at all.
    /// Empty text is skipped; any list, even empty, is checked.
    pub fn is_set(&self) -> bool {
        match self {
            AnswerValue::Text(s) => !s.is_empty(),
            AnswerValue::Choices(_) => true,
        }
    }

    /// Whether `option` is the selected radio value or one of the checked boxes
    pub fn contains(&self, option: &str) -> bool {
        match self {
            AnswerValue::Text(s) => s == option,
            AnswerValue::Choices(c) => c.iter().any(|v| v == option),
        }
    }

    /// Text for display (list values joined with commas)
    pub fn display_value(&self) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Choices(c) => c.join(", "),
        }
    }
}

/// Return the checkbox answer after toggling `option`. Newly checked options
/// are appended so the list keeps selection order.
pub fn toggle_choice(current: Option<&AnswerValue>, option: &str) -> AnswerValue {
    let mut selected: Vec<String> = current
        .and_then(AnswerValue::as_choices)
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    if let Some(pos) = selected.iter().position(|v| v == option) {
        selected.remove(pos);
    } else {
        selected.push(option.to_string());
    }
    AnswerValue::Choices(selected)
}

/// Return the text answer with `c` appended
pub fn push_char(current: Option<&AnswerValue>, c: char) -> AnswerValue {
    let mut text = current
        .and_then(AnswerValue::as_text)
        .unwrap_or_default()
        .to_string();
    text.push(c);
    AnswerValue::Text(text)
}

/// Return the text answer with its last character removed
pub fn pop_char(current: Option<&AnswerValue>) -> AnswerValue {
    let mut text = current
        .and_then(AnswerValue::as_text)
        .unwrap_or_default()
        .to_string();
    text.pop();
    AnswerValue::Text(text)
}
