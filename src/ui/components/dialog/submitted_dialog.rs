//! Confirmation shown after a successful submit

use super::base::{render_dialog, DialogConfig};
use crate::form::Submission;
use crate::ui::theme::Palette;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the "submitted" dialog listing the recorded answers
pub fn render_submitted_dialog(frame: &mut Frame, submission: &Submission, palette: &Palette) {
    let key_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to finish"),
    ];

    let details = submission
        .answers
        .iter()
        .map(|(id, value)| {
            Line::from(vec![
                Span::styled(format!("{id}: "), Style::default().fg(palette.muted)),
                Span::raw(value.display_value()),
            ])
        })
        .collect();

    render_dialog(
        frame,
        DialogConfig {
            title: "Form Submitted Successfully!",
            color: palette.success,
            message: "Your answers will be printed to the console when you finish.",
            details,
            hint: Some(hint),
            max_width: 70,
        },
    );
}
