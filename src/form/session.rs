//! Form state engine
//!
//! Owns the current step index, the answers and the validation errors for one
//! run through a form. The step index only moves through [`FormSession::advance`]
//! and [`FormSession::retreat`], and forward movement is gated on
//! [`FormSession::validate_current_screen`].

use super::answer::{AnswerMap, AnswerValue, ErrorMap};
use super::definition::{FormConfig, Question};
use super::sink::{Submission, SubmissionSink};
use super::steps::{flatten, FlattenedStep};
use super::validation::{RuleTable, REQUIRED_MESSAGE};

/// Position of a screen inside the chapter tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepPosition {
    chapter: usize,
    screen: usize,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed and the answers were handed to the sink
    Submitted(Submission),
    /// The current screen failed validation; errors are populated
    Invalid,
    /// Submit is only available on the last step
    NotLastStep,
}

/// A question of the current screen with its current value and error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionView<'a> {
    pub question: &'a Question,
    pub value: Option<&'a AnswerValue>,
    pub error: Option<&'a str>,
}

/// Read-only projection of the current step for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct StepView<'a> {
    pub current_step_index: usize,
    pub total_steps: usize,
    pub chapter_title: &'a str,
    pub screen_title: &'a str,
    pub screen_description: Option<&'a str>,
    pub questions: Vec<QuestionView<'a>>,
    pub is_first_step: bool,
    pub is_last_step: bool,
    pub can_advance: bool,
}

/// One user's pass through a form
#[derive(Debug, Clone)]
pub struct FormSession {
    config: FormConfig,
    rules: RuleTable,
    steps: Vec<StepPosition>,
    current_step_index: usize,
    answers: AnswerMap,
    errors: ErrorMap,
}

impl FormSession {
    /// Start a session at the first step with no answers and no errors
    pub fn new(config: FormConfig, rules: RuleTable) -> Self {
        let steps: Vec<StepPosition> = flatten(&config)
            .iter()
            .map(|step| StepPosition {
                chapter: step.chapter_index,
                screen: step.screen_index,
            })
            .collect();

        if steps.is_empty() {
            tracing::warn!(form = %config.title, "Form has no screens");
        }

        Self {
            config,
            rules,
            steps,
            current_step_index: 0,
            answers: AnswerMap::new(),
            errors: ErrorMap::new(),
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn error(&self, question_id: &str) -> Option<&str> {
        self.errors.get(question_id).map(String::as_str)
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        !self.steps.is_empty() && self.current_step_index == self.steps.len() - 1
    }

    /// The current screen and its chapter title, or `None` for an empty form
    pub fn current_step(&self) -> Option<FlattenedStep<'_>> {
        let pos = self.steps.get(self.current_step_index)?;
        let chapter = &self.config.chapters[pos.chapter];
        Some(FlattenedStep {
            screen: &chapter.screens[pos.screen],
            chapter_title: &chapter.title,
            chapter_index: pos.chapter,
            screen_index: pos.screen,
        })
    }

    fn current_questions(&self) -> &[Question] {
        self.current_step()
            .map(|step| step.screen.questions.as_slice())
            .unwrap_or_default()
    }

    /// Store an answer and clear any error shown for that question.
    /// The new value is not validated until the next transition attempt.
    pub fn set_answer(&mut self, question_id: &str, value: AnswerValue) {
        tracing::debug!(question = question_id, ?value, "Answer changed");
        self.answers.insert(question_id.to_string(), value);
        self.errors.remove(question_id);
    }

    /// Check every question of the current screen and replace the error map
    /// with the failures found. Returns true when there are none.
    pub fn validate_current_screen(&mut self) -> bool {
        let mut errors = ErrorMap::new();

        for question in self.current_questions() {
            let answer = self.answers.get(&question.id);

            if question.required && !answer.is_some_and(AnswerValue::is_present) {
                errors.insert(question.id.clone(), REQUIRED_MESSAGE.to_string());
                continue;
            }

            let has_rule = self.rules.has_rule(&question.id);
            if let Some(value) = answer.filter(|v| has_rule && v.is_set()) {
                if let Some(message) = self.rules.validate(&question.id, value) {
                    errors.insert(question.id.clone(), message);
                }
            }
        }

        let valid = errors.is_empty();
        tracing::debug!(
            step = self.current_step_index,
            failures = errors.len(),
            "Validated screen"
        );
        self.errors = errors;
        valid
    }

    /// Whether every required question of the current screen has an answer.
    /// Field-specific rules are not consulted.
    pub fn can_advance(&self) -> bool {
        self.current_questions()
            .iter()
            .filter(|q| q.required)
            .all(|q| self.answers.get(&q.id).is_some_and(AnswerValue::is_present))
    }

    /// Move to the next step if the current screen validates.
    /// Returns whether validation passed. Stays put on the last step.
    pub fn advance(&mut self) -> bool {
        if !self.validate_current_screen() {
            return false;
        }
        let last = self.steps.len().saturating_sub(1);
        let next = (self.current_step_index + 1).min(last);
        if next != self.current_step_index {
            tracing::info!(from = self.current_step_index, to = next, "Advanced step");
        }
        self.current_step_index = next;
        true
    }

    /// Move to the previous step without validating
    pub fn retreat(&mut self) {
        let previous = self.current_step_index.saturating_sub(1);
        if previous != self.current_step_index {
            tracing::info!(from = self.current_step_index, to = previous, "Went back a step");
        }
        self.current_step_index = previous;
    }

    /// Validate the last screen and hand a snapshot of all answers to `sink`.
    /// Answers and errors are left as they are.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink) -> SubmitOutcome {
        if !self.is_last_step() {
            return SubmitOutcome::NotLastStep;
        }
        if !self.validate_current_screen() {
            return SubmitOutcome::Invalid;
        }
        let submission = Submission::new(&self.config.title, self.answers().clone());
        sink.deliver(&submission);
        SubmitOutcome::Submitted(submission)
    }

    /// Projection of the current step, or `None` for an empty form
    pub fn view(&self) -> Option<StepView<'_>> {
        let step = self.current_step()?;
        let questions = step
            .screen
            .questions
            .iter()
            .map(|question| QuestionView {
                question,
                value: self.answer(&question.id),
                error: self.error(&question.id),
            })
            .collect();

        Some(StepView {
            current_step_index: self.current_step_index,
            total_steps: self.total_steps(),
            chapter_title: step.chapter_title,
            screen_title: &step.screen.title,
            screen_description: step.screen.description.as_deref(),
            questions,
            is_first_step: self.is_first_step(),
            is_last_step: self.is_last_step(),
            can_advance: self.can_advance(),
        })
    }
}
