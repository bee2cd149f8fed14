//! Application state and key handling

use crate::config::{Settings, SettingsProvider, ThemeName};
use crate::form::{
    pop_char, push_char, toggle_choice, AnswerValue, FormSession, Question, QuestionKind,
    Submission, SubmissionSink, SubmitOutcome,
};
use crate::platform;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which part of the screen receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Question at this index of the current screen
    Question(usize),
    /// The Back / Continue / Submit row
    Navigation,
}

/// Selected button on the navigation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavButton {
    Back,
    #[default]
    Forward,
}

/// Main application struct
pub struct App {
    /// The form session being filled in
    pub session: FormSession,
    /// Where submitted answers go
    sink: Box<dyn SubmissionSink>,
    /// Where the theme preference is stored
    settings_provider: Box<dyn SettingsProvider>,
    settings: Settings,
    pub theme: ThemeName,
    pub focus: Focus,
    /// Highlighted option of the focused choice question
    pub option_cursor: usize,
    pub nav_button: NavButton,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Set once the form has been submitted
    pub submitted: Option<Submission>,
    quit: bool,
}

impl App {
    /// Create the app, loading user settings from `settings_provider`
    pub fn new(
        session: FormSession,
        settings_provider: Box<dyn SettingsProvider>,
        sink: Box<dyn SubmissionSink>,
    ) -> Self {
        let settings = settings_provider.load().unwrap_or_else(|err| {
            tracing::warn!("Failed to load settings, using defaults: {err:#}");
            Settings::default()
        });
        let theme = settings.theme();

        let mut app = Self {
            session,
            sink,
            settings_provider,
            settings,
            theme,
            focus: Focus::Navigation,
            option_cursor: 0,
            nav_button: NavButton::Forward,
            status_message: None,
            submitted: None,
            quit: false,
        };
        app.reset_focus();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether the submission confirmation is on screen
    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    /// Switch theme and persist the choice
    pub fn set_theme(&mut self, theme: ThemeName) {
        self.theme = theme;
        self.settings.set_theme(theme);
        if let Err(err) = self.settings_provider.save(&self.settings) {
            tracing::warn!("Failed to save settings: {err:#}");
            self.status_message = Some("Could not save theme preference".to_string());
        } else {
            tracing::debug!(theme = %theme, "Theme changed");
        }
    }

    /// The focused question, cloned so the session can be mutated afterwards
    fn focused_question(&self) -> Option<Question> {
        let Focus::Question(idx) = self.focus else {
            return None;
        };
        self.session
            .current_step()
            .and_then(|step| step.screen.questions.get(idx).cloned())
    }

    fn question_count(&self) -> usize {
        self.session
            .current_step()
            .map(|step| step.screen.questions.len())
            .unwrap_or(0)
    }

    /// Put the option cursor on the selected option of the focused question
    fn sync_option_cursor(&mut self) {
        self.option_cursor = self
            .focused_question()
            .and_then(|q| {
                let answer = self.session.answer(&q.id)?;
                q.options().iter().position(|o| answer.contains(o))
            })
            .unwrap_or(0);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_option_cursor();
    }

    /// Focus the first question of the current screen
    fn reset_focus(&mut self) {
        self.nav_button = NavButton::Forward;
        let focus = if self.question_count() > 0 {
            Focus::Question(0)
        } else {
            Focus::Navigation
        };
        self.set_focus(focus);
    }

    /// Focus the first question showing an error, if any
    fn focus_first_error(&mut self) {
        let first_error = self.session.current_step().and_then(|step| {
            step.screen
                .questions
                .iter()
                .position(|q| self.session.errors().contains_key(&q.id))
        });
        if let Some(idx) = first_error {
            self.set_focus(Focus::Question(idx));
        }
    }

    /// Move focus to the next question, then the navigation row (wraps around)
    pub fn next_focus(&mut self) {
        let count = self.question_count();
        let next = match self.focus {
            Focus::Question(idx) if idx + 1 < count => Focus::Question(idx + 1),
            Focus::Question(_) => Focus::Navigation,
            Focus::Navigation if count > 0 => Focus::Question(0),
            Focus::Navigation => Focus::Navigation,
        };
        self.set_focus(next);
    }

    /// Move focus backwards (wraps around)
    pub fn prev_focus(&mut self) {
        let count = self.question_count();
        let prev = match self.focus {
            Focus::Question(0) => Focus::Navigation,
            Focus::Question(idx) => Focus::Question(idx - 1),
            Focus::Navigation if count > 0 => Focus::Question(count - 1),
            Focus::Navigation => Focus::Navigation,
        };
        self.set_focus(prev);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Submission dialog is modal; dismissing it ends the session
        if self.is_submitted() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.quit = true;
            }
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;

        if platform::is_shortcut(key.modifiers) {
            match key.code {
                KeyCode::Char('n') => self.go_forward(),
                KeyCode::Char('b') => self.go_back(),
                KeyCode::Char('t') => self.set_theme(self.theme.next()),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab => self.next_focus(),
            KeyCode::BackTab => self.prev_focus(),
            _ => match self.focus {
                Focus::Navigation => self.handle_navigation_key(key),
                Focus::Question(_) => self.handle_question_key(key),
            },
        }
    }

    /// Handle keys on the navigation row
    fn handle_navigation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') if !self.session.is_first_step() => {
                self.nav_button = NavButton::Back;
            }
            KeyCode::Right | KeyCode::Char('l') => self.nav_button = NavButton::Forward,
            KeyCode::Enter | KeyCode::Char(' ') => match self.nav_button {
                NavButton::Back => self.go_back(),
                NavButton::Forward => self.go_forward(),
            },
            KeyCode::Up => self.prev_focus(),
            _ => {}
        }
    }

    /// Handle keys on the focused question
    fn handle_question_key(&mut self, key: KeyEvent) {
        let Some(question) = self.focused_question() else {
            return;
        };
        let current = self.session.answer(&question.id);

        match &question.kind {
            QuestionKind::Text { .. } => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                    let value = push_char(current, c);
                    self.session.set_answer(&question.id, value);
                }
                KeyCode::Backspace => {
                    let value = pop_char(current);
                    self.session.set_answer(&question.id, value);
                }
                KeyCode::Enter | KeyCode::Down => self.next_focus(),
                KeyCode::Up => self.prev_focus(),
                _ => {}
            },
            QuestionKind::Radio { options } | QuestionKind::Checkbox { options } => {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        if self.option_cursor == 0 {
                            self.prev_focus();
                        } else {
                            self.option_cursor -= 1;
                        }
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if self.option_cursor + 1 >= options.len() {
                            self.next_focus();
                        } else {
                            self.option_cursor += 1;
                        }
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        let Some(option) = options.get(self.option_cursor) else {
                            return;
                        };
                        let value = if question.is_multi_choice() {
                            toggle_choice(current, option)
                        } else {
                            AnswerValue::Text(option.clone())
                        };
                        self.session.set_answer(&question.id, value);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Continue to the next screen, or submit on the last one
    pub fn go_forward(&mut self) {
        if self.session.is_empty() {
            return;
        }
        // The forward button is disabled until required questions are answered
        if !self.session.can_advance() {
            self.status_message = Some("Answer all required questions to continue".to_string());
            return;
        }

        if self.session.is_last_step() {
            self.submit();
            return;
        }

        let before = self.session.current_step_index();
        if self.session.advance() && self.session.current_step_index() != before {
            self.reset_focus();
        } else {
            self.focus_first_error();
        }
    }

    /// Go back one screen
    pub fn go_back(&mut self) {
        if self.session.is_first_step() {
            return;
        }
        self.session.retreat();
        self.reset_focus();
    }

    fn submit(&mut self) {
        match self.session.submit(self.sink.as_mut()) {
            SubmitOutcome::Submitted(submission) => {
                self.submitted = Some(submission);
            }
            SubmitOutcome::Invalid => self.focus_first_error(),
            SubmitOutcome::NotLastStep => {}
        }
    }
}

/// App over `config` with in-memory settings and a sink that accepts anything
#[cfg(test)]
pub(crate) fn test_app(config: crate::form::FormConfig) -> App {
    use crate::config::MockSettingsProvider;
    use crate::form::{MockSubmissionSink, RuleTable};

    let mut settings = MockSettingsProvider::new();
    settings.expect_load().returning(|| Ok(Settings::default()));
    settings.expect_save().returning(|_| Ok(()));
    let mut sink = MockSubmissionSink::new();
    sink.expect_deliver().return_const(());

    let rules = RuleTable::for_form(&config);
    App::new(
        FormSession::new(config, rules),
        Box::new(settings),
        Box::new(sink),
    )
}
