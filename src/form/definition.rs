//! Declarative form definition: chapters, screens and questions

use super::validation::RuleKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or checking a form definition
#[derive(Debug, Error)]
pub enum FormConfigError {
    #[error("failed to read form definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form definition JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question in screen '{screen}' has an empty id")]
    EmptyQuestionId { screen: String },

    #[error("question id '{0}' is used more than once")]
    DuplicateQuestionId(String),

    #[error("choice question '{0}' has no options")]
    MissingOptions(String),

    #[error("question '{question}' lists option '{option}' more than once")]
    DuplicateOption { question: String, option: String },

    #[error("validation rule on question '{0}' only applies to text questions")]
    RuleOnChoiceQuestion(String),
}

/// Question type together with its type-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Free text input
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Single choice
    Radio { options: Vec<String> },
    /// Multiple choice
    Checkbox { options: Vec<String> },
}

/// A single question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Built-in rule bound to this question in addition to the default table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<RuleKind>,
}

impl Question {
    /// Create a text question
    pub fn text(id: &str, label: &str, required: bool, placeholder: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required,
            kind: QuestionKind::Text {
                placeholder: (!placeholder.is_empty()).then(|| placeholder.to_string()),
            },
            validation: None,
        }
    }

    /// Create a single-choice question
    pub fn radio(id: &str, label: &str, required: bool, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required,
            kind: QuestionKind::Radio {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            validation: None,
        }
    }

    /// Create a multiple-choice question
    pub fn checkbox(id: &str, label: &str, required: bool, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required,
            kind: QuestionKind::Checkbox {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            validation: None,
        }
    }

    /// Options for choice questions, empty for text
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Text { .. } => &[],
            QuestionKind::Radio { options } | QuestionKind::Checkbox { options } => options,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            QuestionKind::Text { placeholder } => placeholder.as_deref(),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, QuestionKind::Text { .. })
    }

    pub fn is_multi_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::Checkbox { .. })
    }
}

/// A screen of questions shown together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

/// A group of screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub screens: Vec<Screen>,
}

/// The whole form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub title: String,
    pub description: String,
    pub chapters: Vec<Chapter>,
}

impl FormConfig {
    /// Load a form definition from a JSON file and check its structure
    pub fn from_json_file(path: &Path) -> Result<Self, FormConfigError> {
        let content = fs::read_to_string(path).map_err(|source| FormConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a form definition from JSON and check its structure
    pub fn from_json_str(json: &str) -> Result<Self, FormConfigError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Check structural invariants: unique non-empty question ids,
    /// non-empty duplicate-free option lists for choice questions, and
    /// validation rules bound only to text questions.
    pub fn check(&self) -> Result<(), FormConfigError> {
        let mut seen = HashSet::new();
        for screen in self.chapters.iter().flat_map(|c| &c.screens) {
            for question in &screen.questions {
                if question.id.trim().is_empty() {
                    return Err(FormConfigError::EmptyQuestionId {
                        screen: screen.id.clone(),
                    });
                }
                if !seen.insert(question.id.as_str()) {
                    return Err(FormConfigError::DuplicateQuestionId(question.id.clone()));
                }
                if !question.is_text() {
                    if question.validation.is_some() {
                        return Err(FormConfigError::RuleOnChoiceQuestion(question.id.clone()));
                    }
                    let options = question.options();
                    if options.is_empty() {
                        return Err(FormConfigError::MissingOptions(question.id.clone()));
                    }
                    let mut unique = HashSet::new();
                    if let Some(dup) = options.iter().find(|o| !unique.insert(o.as_str())) {
                        return Err(FormConfigError::DuplicateOption {
                            question: question.id.clone(),
                            option: dup.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Iterate over every question in definition order
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.chapters
            .iter()
            .flat_map(|c| &c.screens)
            .flat_map(|s| &s.questions)
    }

    /// Built-in "Mini Survey Form"
    pub fn builtin() -> Self {
        Self {
            title: "Mini Survey Form".to_string(),
            description: "A dynamic multi-step form example".to_string(),
            chapters: vec![
                Chapter {
                    id: "personal-info".to_string(),
                    title: "Personal Information".to_string(),
                    description: Some(
                        "Let's start with some basic information about you".to_string(),
                    ),
                    screens: vec![
                        Screen {
                            id: "basic-details".to_string(),
                            title: "Basic Details".to_string(),
                            description: Some("Tell us about yourself".to_string()),
                            questions: vec![
                                Question::text(
                                    "full-name",
                                    "Full Name",
                                    true,
                                    "Enter your full name",
                                ),
                                Question::text(
                                    "email",
                                    "Email Address",
                                    true,
                                    "Enter your email address",
                                ),
                            ],
                        },
                        Screen {
                            id: "demographics".to_string(),
                            title: "Demographics".to_string(),
                            description: Some("Help us understand your background".to_string()),
                            questions: vec![
                                Question::radio(
                                    "age-group",
                                    "Age Group",
                                    true,
                                    &["18-25", "26-35", "36-45", "46-55", "55+"],
                                ),
                                Question::checkbox(
                                    "interests",
                                    "Interests (select all that apply)",
                                    false,
                                    &["Technology", "Sports", "Arts", "Travel", "Music", "Reading"],
                                ),
                            ],
                        },
                    ],
                },
                Chapter {
                    id: "preferences".to_string(),
                    title: "Preferences".to_string(),
                    description: Some("Tell us about your preferences and needs".to_string()),
                    screens: vec![
                        Screen {
                            id: "communication".to_string(),
                            title: "Communication Preferences".to_string(),
                            description: Some("How would you like to hear from us?".to_string()),
                            questions: vec![
                                Question::radio(
                                    "contact-method",
                                    "Preferred Contact Method",
                                    true,
                                    &["Email", "Phone", "SMS", "Mail"],
                                ),
                                Question::radio(
                                    "frequency",
                                    "Contact Frequency",
                                    true,
                                    &["Daily", "Weekly", "Monthly", "Quarterly"],
                                ),
                            ],
                        },
                        Screen {
                            id: "final-details".to_string(),
                            title: "Final Details".to_string(),
                            description: Some(
                                "Just a few more questions to complete your profile".to_string(),
                            ),
                            questions: vec![
                                Question::text(
                                    "company",
                                    "Company Name",
                                    false,
                                    "Enter your company name (optional)",
                                ),
                                Question::checkbox(
                                    "services",
                                    "Services of Interest",
                                    true,
                                    &["Consulting", "Development", "Design", "Marketing", "Support"],
                                ),
                            ],
                        },
                    ],
                },
            ],
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
