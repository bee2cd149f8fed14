//! Progress indicator: chapter title, step counter, bar and step dots

use super::theme::Palette;
use crate::form::StepView;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{LineGauge, Paragraph},
    Frame,
};

/// Fraction of the form reached, counting the current step as reached
pub fn progress_ratio(current_step: usize, total_steps: usize) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    ((current_step + 1) as f64 / total_steps as f64).min(1.0)
}

/// One dot per step, filled up to and including the current one
pub fn step_dots(current_step: usize, total_steps: usize) -> String {
    (0..total_steps)
        .map(|i| if i <= current_step { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn draw(frame: &mut Frame, area: Rect, view: &StepView, palette: &Palette) {
    if area.height == 0 {
        return;
    }
    let row = |offset: u16| Rect {
        y: area.y + offset,
        height: 1,
        ..area
    };

    let chapter = Paragraph::new(Span::styled(
        view.chapter_title,
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(chapter, row(0));

    let counter = Paragraph::new(format!("{} / {}", view.current_step_index + 1, view.total_steps))
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Right);
    frame.render_widget(counter, row(0));

    if area.height < 3 {
        return;
    }

    let ratio = progress_ratio(view.current_step_index, view.total_steps);
    let gauge = LineGauge::default()
        .ratio(ratio)
        .label(format!("{:>3.0}%", ratio * 100.0))
        .filled_style(Style::default().fg(palette.accent))
        .unfilled_style(Style::default().fg(palette.muted));
    frame.render_widget(gauge, row(1));

    let dots = Paragraph::new(Line::from(Span::styled(
        step_dots(view.current_step_index, view.total_steps),
        Style::default().fg(palette.accent),
    )));
    frame.render_widget(dots, row(2));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_ratio_counts_current_step() {
        assert_eq!(progress_ratio(0, 4), 0.25);
        assert_eq!(progress_ratio(3, 4), 1.0);
    }

    #[test]
    fn test_progress_ratio_empty_form() {
        assert_eq!(progress_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_step_dots() {
        assert_eq!(step_dots(1, 4), "● ● ○ ○");
        assert_eq!(step_dots(0, 1), "●");
        assert_eq!(step_dots(0, 0), "");
    }
}
