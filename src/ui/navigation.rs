//! Back / Continue / Submit row

use super::components::render_button;
use super::theme::Palette;
use crate::app::{App, Focus, NavButton};
use crate::form::StepView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

/// Label of the forward button for the current step
pub fn forward_label(view: &StepView) -> &'static str {
    if view.is_last_step {
        "Submit"
    } else {
        "Continue ›"
    }
}

pub fn draw(frame: &mut Frame, area: Rect, view: &StepView, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Back
            Constraint::Min(0),     // Step counter
            Constraint::Length(14), // Continue / Submit
        ])
        .split(area);

    let on_nav_row = app.focus == Focus::Navigation;

    if !view.is_first_step {
        render_button(
            frame,
            chunks[0],
            "‹ Back",
            on_nav_row && app.nav_button == NavButton::Back,
            true,
            palette.accent,
            palette.muted,
        );
    }

    let counter = Paragraph::new(format!(
        "{} of {}",
        view.current_step_index + 1,
        view.total_steps
    ))
    .style(Style::default().fg(palette.muted))
    .alignment(Alignment::Center);
    frame.render_widget(
        counter,
        Rect {
            y: chunks[1].y + chunks[1].height / 2,
            height: 1.min(chunks[1].height),
            ..chunks[1]
        },
    );

    render_button(
        frame,
        chunks[2],
        forward_label(view),
        on_nav_row && app.nav_button == NavButton::Forward,
        view.can_advance,
        palette.accent,
        palette.muted,
    );
}
