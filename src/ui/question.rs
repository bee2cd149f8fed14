//! Rendering of a single question by type

use super::theme::Palette;
use crate::form::{QuestionKind, QuestionView};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows needed by a question: label, body, and the error line if any
pub fn question_height(view: &QuestionView) -> u16 {
    let body = match &view.question.kind {
        QuestionKind::Text { .. } => 3,
        QuestionKind::Radio { options } | QuestionKind::Checkbox { options } => {
            options.len() as u16
        }
    };
    1 + body + u16::from(view.error.is_some())
}

/// Marker drawn in front of a choice option
pub fn choice_marker(multi: bool, selected: bool) -> &'static str {
    match (multi, selected) {
        (false, true) => "(•)",
        (false, false) => "( )",
        (true, true) => "[x]",
        (true, false) => "[ ]",
    }
}

/// Draw a question with its label, input and error message
pub fn draw_question(
    frame: &mut Frame,
    area: Rect,
    view: &QuestionView,
    is_focused: bool,
    option_cursor: usize,
    palette: &Palette,
) {
    if area.height == 0 {
        return;
    }

    let label_style = if is_focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    let mut label = vec![Span::styled(view.question.label.as_str(), label_style)];
    if view.question.required {
        label.push(Span::styled(" *", Style::default().fg(palette.error)));
    }
    frame.render_widget(Paragraph::new(Line::from(label)), Rect { height: 1, ..area });

    let body_height = question_height(view) - 1 - u16::from(view.error.is_some());
    let body = Rect {
        y: area.y + 1,
        height: body_height.min(area.height.saturating_sub(1)),
        ..area
    };

    match &view.question.kind {
        QuestionKind::Text { .. } => draw_text_input(
            frame,
            body,
            view.value.and_then(|v| v.as_text()).unwrap_or_default(),
            view.question.placeholder(),
            is_focused,
            palette,
        ),
        QuestionKind::Radio { options } | QuestionKind::Checkbox { options } => {
            let multi = view.question.is_multi_choice();
            let lines: Vec<Line> = options
                .iter()
                .enumerate()
                .map(|(idx, option)| {
                    let selected = view.value.is_some_and(|v| v.contains(option));
                    let under_cursor = is_focused && idx == option_cursor;
                    let style = if under_cursor {
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD)
                    } else if selected {
                        Style::default().fg(palette.text)
                    } else {
                        Style::default().fg(palette.muted)
                    };
                    Line::from(vec![
                        Span::styled(if under_cursor { "› " } else { "  " }, style),
                        Span::styled(choice_marker(multi, selected), style),
                        Span::raw(" "),
                        Span::styled(option.as_str(), style),
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), body);
        }
    }

    if let Some(error) = view.error {
        let error_row = body.y + body.height;
        if error_row < area.y + area.height {
            let message = Paragraph::new(Span::styled(error, Style::default().fg(palette.error)));
            frame.render_widget(
                message,
                Rect {
                    y: error_row,
                    height: 1,
                    ..area
                },
            );
        }
    }
}

/// Draw a bordered single-line text input
fn draw_text_input(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: Option<&str>,
    is_active: bool,
    palette: &Palette,
) {
    let border_style = if is_active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if value.is_empty() {
        Line::from(vec![
            Span::styled(cursor, Style::default().fg(palette.accent)),
            Span::styled(
                placeholder.unwrap_or_default(),
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(value, Style::default().fg(palette.text)),
            Span::styled(cursor, Style::default().fg(palette.accent)),
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Question;

    #[test]
    fn test_text_question_height() {
        let question = Question::text("q", "Q", true, "");
        let mut view = QuestionView {
            question: &question,
            value: None,
            error: None,
        };
        assert_eq!(question_height(&view), 4);
        view.error = Some("This field is required");
        assert_eq!(question_height(&view), 5);
    }

    #[test]
    fn test_choice_question_height_counts_options() {
        let question = Question::radio("q", "Q", true, &["a", "b", "c"]);
        let view = QuestionView {
            question: &question,
            value: None,
            error: None,
        };
        assert_eq!(question_height(&view), 4);
    }

    #[test]
    fn test_choice_markers() {
        assert_eq!(choice_marker(false, true), "(•)");
        assert_eq!(choice_marker(false, false), "( )");
        assert_eq!(choice_marker(true, true), "[x]");
        assert_eq!(choice_marker(true, false), "[ ]");
    }
}
