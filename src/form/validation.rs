//! Question validation rules
//!
//! The engine applies the presence rule itself; everything here is a
//! field-specific rule looked up by question id in a [`RuleTable`].

use super::answer::AnswerValue;
use super::definition::FormConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Message for a required question without a usable answer
pub const REQUIRED_MESSAGE: &str = "This field is required";

pub const NAME_REQUIRED_MESSAGE: &str = "Name is required";
pub const NAME_NUMERIC_MESSAGE: &str = "Name cannot contain only numbers";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";
pub const EMAIL_INVALID_MESSAGE: &str = "Please enter a valid email address";
pub const EXPECTED_TEXT_MESSAGE: &str = "Expected a text answer";

/// Local part and domain shape of an email address. Leading dots and
/// consecutive dots are rejected separately.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// A pure field rule: returns an error message when the value is rejected
pub type Rule = fn(&AnswerValue) -> Option<String>;

/// Built-in rules that a form definition can bind to a question by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Name,
    Email,
}

impl RuleKind {
    pub fn rule(self) -> Rule {
        match self {
            Self::Name => validate_name,
            Self::Email => validate_email,
        }
    }
}

/// Reject names that are empty or made up solely of digits
pub fn validate_name(value: &AnswerValue) -> Option<String> {
    let Some(text) = value.as_text() else {
        return Some(EXPECTED_TEXT_MESSAGE.to_string());
    };
    if text.is_empty() {
        return Some(NAME_REQUIRED_MESSAGE.to_string());
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Some(NAME_NUMERIC_MESSAGE.to_string());
    }
    None
}

/// Reject values that are not shaped like an email address
pub fn validate_email(value: &AnswerValue) -> Option<String> {
    let Some(text) = value.as_text() else {
        return Some(EXPECTED_TEXT_MESSAGE.to_string());
    };
    if text.is_empty() {
        return Some(EMAIL_REQUIRED_MESSAGE.to_string());
    }
    if text.starts_with('.') || text.contains("..") || !EMAIL_PATTERN.is_match(text) {
        return Some(EMAIL_INVALID_MESSAGE.to_string());
    }
    None
}

/// Mapping from question id to its field-specific rule
#[derive(Clone)]
pub struct RuleTable {
    rules: HashMap<String, Rule>,
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.rules.keys().collect();
        ids.sort();
        f.debug_struct("RuleTable").field("rules", &ids).finish()
    }
}

impl RuleTable {
    /// A table with no rules at all
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Default rules plus any rule a question of `config` declares
    pub fn for_form(config: &FormConfig) -> Self {
        config
            .questions()
            .filter_map(|q| q.validation.map(|kind| (q.id.as_str(), kind.rule())))
            .fold(Self::default(), |table, (id, rule)| table.with_rule(id, rule))
    }

    /// Bind `rule` to `question_id`, replacing any previous binding
    pub fn with_rule(mut self, question_id: &str, rule: Rule) -> Self {
        self.rules.insert(question_id.to_string(), rule);
        self
    }

    pub fn has_rule(&self, question_id: &str) -> bool {
        self.rules.contains_key(question_id)
    }

    /// Run the field-specific rule for `question_id`, if there is one
    pub fn validate(&self, question_id: &str, value: &AnswerValue) -> Option<String> {
        self.rules.get(question_id).and_then(|rule| rule(value))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::empty()
            .with_rule("full-name", validate_name)
            .with_rule("email", validate_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::definition::Question;

    fn text(s: &str) -> AnswerValue {
        AnswerValue::Text(s.to_string())
    }

    mod name_rule {
        use super::*;

        #[test]
        fn test_digits_only_rejected() {
            assert_eq!(
                validate_name(&text("12345")).as_deref(),
                Some(NAME_NUMERIC_MESSAGE)
            );
        }

        #[test]
        fn test_digits_with_surrounding_spaces_rejected() {
            assert_eq!(
                validate_name(&text("  42 ")).as_deref(),
                Some(NAME_NUMERIC_MESSAGE)
            );
        }

        #[test]
        fn test_mixed_name_accepted() {
            assert!(validate_name(&text("Ada Lovelace")).is_none());
            assert!(validate_name(&text("R2D2")).is_none());
        }

        #[test]
        fn test_empty_rejected() {
            assert_eq!(
                validate_name(&text("")).as_deref(),
                Some(NAME_REQUIRED_MESSAGE)
            );
        }

        #[test]
        fn test_whitespace_only_accepted() {
            // Presence is the engine's job; the name rule only checks length and digits
            assert!(validate_name(&text("   ")).is_none());
        }

        #[test]
        fn test_list_value_rejected() {
            let value = AnswerValue::Choices(vec!["a".to_string()]);
            assert_eq!(
                validate_name(&value).as_deref(),
                Some(EXPECTED_TEXT_MESSAGE)
            );
        }
    }

    mod email_rule {
        use super::*;

        #[test]
        fn test_valid_addresses() {
            for addr in ["a@b.com", "first.last+tag@example.co.uk", "o'neil@mail-host.org"] {
                assert!(validate_email(&text(addr)).is_none(), "{addr} should pass");
            }
        }

        #[test]
        fn test_invalid_addresses() {
            for addr in [
                "not-an-email",
                "a@b",
                "@b.com",
                ".a@b.com",
                "a..b@c.com",
                "a@b.c",
                "a b@c.com",
                "a@-b.com",
            ] {
                assert_eq!(
                    validate_email(&text(addr)).as_deref(),
                    Some(EMAIL_INVALID_MESSAGE),
                    "{addr} should fail"
                );
            }
        }

        #[test]
        fn test_empty_rejected() {
            assert_eq!(
                validate_email(&text("")).as_deref(),
                Some(EMAIL_REQUIRED_MESSAGE)
            );
        }
    }

    mod rule_table {
        use super::*;

        #[test]
        fn test_default_binds_name_and_email() {
            let table = RuleTable::default();
            assert!(table.has_rule("full-name"));
            assert!(table.has_rule("email"));
            assert!(!table.has_rule("company"));
        }

        #[test]
        fn test_unknown_id_has_no_rule() {
            let table = RuleTable::default();
            assert!(table.validate("company", &text("12345")).is_none());
        }

        #[test]
        fn test_validate_is_pure() {
            let table = RuleTable::default();
            let first = table.validate("email", &text("nope"));
            let second = table.validate("email", &text("nope"));
            assert_eq!(first, second);
        }

        #[test]
        fn test_with_rule_adds_custom_rule() {
            fn no_x(value: &AnswerValue) -> Option<String> {
                value
                    .as_text()
                    .filter(|t| t.contains('x'))
                    .map(|_| "No x allowed".to_string())
            }

            let table = RuleTable::empty().with_rule("code", no_x);
            assert_eq!(
                table.validate("code", &text("xyz")).as_deref(),
                Some("No x allowed")
            );
            assert!(table.validate("code", &text("abc")).is_none());
        }

        #[test]
        fn test_for_form_binds_declared_rules() {
            let mut config = FormConfig::builtin();
            let mut contact = Question::text("work-email", "Work Email", false, "");
            contact.validation = Some(RuleKind::Email);
            config.chapters[0].screens[0].questions.push(contact);

            let table = RuleTable::for_form(&config);
            assert!(table.has_rule("full-name"));
            assert_eq!(
                table.validate("work-email", &text("bad")).as_deref(),
                Some(EMAIL_INVALID_MESSAGE)
            );
        }
    }
}
