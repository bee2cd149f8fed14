//! UI module for rendering the TUI

mod components;
mod layout;
mod navigation;
mod progress;
mod question;
mod theme;

use crate::app::{App, Focus};
use crate::form::StepView;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use theme::Palette;

/// Blank rows between questions
const QUESTION_SPACING: u16 = 1;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = theme::palette(app.theme);
    let layout = layout::create_layout(frame.area());

    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));
    frame.render_widget(card, layout.card);

    layout::draw_header(frame, layout.header, app, &palette);

    match app.session.view() {
        Some(view) => {
            progress::draw(frame, layout.progress, &view, &palette);
            draw_screen(frame, layout.body, &view, app, &palette);
            navigation::draw(frame, layout.navigation, &view, app, &palette);
        }
        None => draw_empty_form(frame, layout.body, &palette),
    }

    layout::draw_status_bar(frame, layout.status, app, &palette);

    if let Some(submission) = &app.submitted {
        components::render_submitted_dialog(frame, submission, &palette);
    }
}

/// Index of the first question to draw so the focused one is visible
fn first_visible(heights: &[u16], focused: usize, available: u16) -> usize {
    let mut first = 0;
    while first < focused {
        let used: u16 = heights[first..=focused]
            .iter()
            .map(|h| h + QUESTION_SPACING)
            .sum();
        if used <= available {
            break;
        }
        first += 1;
    }
    first
}

/// Draw the screen title, description and its questions
fn draw_screen(frame: &mut Frame, area: Rect, view: &StepView, app: &App, palette: &Palette) {
    if area.height == 0 {
        return;
    }

    let title = Paragraph::new(Span::styled(
        view.screen_title,
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, Rect { height: 1, ..area });

    let mut header_rows = 2;
    if let Some(description) = view.screen_description {
        if area.height > 1 {
            let description = Paragraph::new(description)
                .style(Style::default().fg(palette.muted))
                .alignment(Alignment::Center);
            frame.render_widget(
                description,
                Rect {
                    y: area.y + 1,
                    height: 1,
                    ..area
                },
            );
        }
        header_rows = 3;
    }

    let mut questions_area = Rect {
        y: area.y + header_rows.min(area.height),
        height: area.height.saturating_sub(header_rows),
        ..area
    };

    let heights: Vec<u16> = view.questions.iter().map(question::question_height).collect();
    let focused = match app.focus {
        Focus::Question(idx) => idx.min(heights.len().saturating_sub(1)),
        Focus::Navigation => heights.len().saturating_sub(1),
    };
    let first = if heights.is_empty() {
        0
    } else {
        first_visible(&heights, focused, questions_area.height)
    };

    for (idx, question_view) in view.questions.iter().enumerate().skip(first) {
        if questions_area.height == 0 {
            break;
        }
        let height = heights[idx].min(questions_area.height);
        let question_area = Rect {
            height,
            ..questions_area
        };
        question::draw_question(
            frame,
            question_area,
            question_view,
            app.focus == Focus::Question(idx),
            app.option_cursor,
            palette,
        );

        let consumed = (height + QUESTION_SPACING).min(questions_area.height);
        questions_area.y += consumed;
        questions_area.height -= consumed;
    }
}

/// Notice shown when the form definition contains no screens
fn draw_empty_form(frame: &mut Frame, area: Rect, palette: &Palette) {
    let notice = Paragraph::new("This form has no screens to fill in.\n\nPress Esc to quit.")
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(notice, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crate::form::{AnswerValue, FormConfig};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_first_visible_keeps_start_when_everything_fits() {
        assert_eq!(first_visible(&[4, 4], 1, 20), 0);
    }

    #[test]
    fn test_first_visible_scrolls_to_focused_question() {
        assert_eq!(first_visible(&[4, 6, 4], 2, 8), 2);
        assert_eq!(first_visible(&[4, 6, 4], 2, 13), 1);
    }

    #[test]
    fn test_draws_first_screen() {
        let app = test_app(FormConfig::builtin());
        let screen = render(&app, 90, 32);

        assert!(screen.contains("Mini Survey Form"));
        assert!(screen.contains("── A dynamic multi-step form example"));
        assert!(screen.contains("Personal Information"));
        assert!(screen.contains("1 / 4"));
        assert!(screen.contains("Basic Details"));
        assert!(screen.contains("Full Name *"));
        assert!(screen.contains("Enter your email address"));
        assert!(screen.contains("Continue"));
        assert!(screen.contains("1 of 4"));
        assert!(!screen.contains("Back"));
        assert!(screen.contains("Plain"));
    }

    #[test]
    fn test_draws_errors_under_questions() {
        let mut app = test_app(FormConfig::builtin());
        app.session.set_answer("full-name", AnswerValue::Text("12345".into()));
        app.session.validate_current_screen();

        let screen = render(&app, 90, 32);
        assert!(screen.contains("Name cannot contain only numbers"));
        assert!(screen.contains("This field is required"));
    }

    #[test]
    fn test_draws_choice_markers_and_back_button() {
        let mut app = test_app(FormConfig::builtin());
        app.session.set_answer("full-name", AnswerValue::Text("Ada".into()));
        app.session.set_answer("email", AnswerValue::Text("a@b.com".into()));
        app.go_forward();
        app.session.set_answer("age-group", AnswerValue::Text("26-35".into()));

        let screen = render(&app, 90, 32);
        assert!(screen.contains("(•) 26-35"));
        assert!(screen.contains("( ) 18-25"));
        assert!(screen.contains("[ ] Technology"));
        assert!(screen.contains("Back"));
        assert!(screen.contains("2 / 4"));
    }

    #[test]
    fn test_draws_submit_on_last_step() {
        let mut app = test_app(FormConfig::builtin());
        for (id, value) in [
            ("full-name", "Ada"),
            ("email", "a@b.com"),
            ("age-group", "18-25"),
            ("contact-method", "SMS"),
            ("frequency", "Daily"),
        ] {
            app.session.set_answer(id, AnswerValue::Text(value.into()));
        }
        for _ in 0..3 {
            app.go_forward();
        }

        let screen = render(&app, 90, 32);
        assert!(screen.contains("Final Details"));
        assert!(screen.contains("Submit"));
        assert!(screen.contains("4 / 4"));
    }

    #[test]
    fn test_draws_submitted_dialog() {
        let mut app = test_app(FormConfig::builtin());
        for (id, value) in [
            ("full-name", "Ada"),
            ("email", "a@b.com"),
            ("age-group", "18-25"),
            ("contact-method", "SMS"),
            ("frequency", "Daily"),
        ] {
            app.session.set_answer(id, AnswerValue::Text(value.into()));
        }
        app.session
            .set_answer("services", AnswerValue::Choices(vec!["Design".into()]));
        for _ in 0..4 {
            app.go_forward();
        }
        assert!(app.is_submitted());

        let screen = render(&app, 90, 32);
        assert!(screen.contains("Form Submitted Successfully!"));
        assert!(screen.contains("services: Design"));
    }

    #[test]
    fn test_draws_empty_form_notice() {
        let app = test_app(FormConfig {
            title: "Nothing Here".to_string(),
            description: "No screens".to_string(),
            chapters: vec![],
        });
        let screen = render(&app, 80, 20);
        assert!(screen.contains("Nothing Here"));
        assert!(screen.contains("This form has no screens to fill in."));
    }

    #[test]
    fn test_theme_label_follows_shortcut() {
        let mut app = test_app(FormConfig::builtin());
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        let screen = render(&app, 90, 32);
        assert!(screen.contains("Winter"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let app = test_app(FormConfig::builtin());
        render(&app, 20, 6);
    }
}
