//! Layout components (card, header, status bar)

use super::components::BUTTON_HEIGHT;
use super::theme::Palette;
use crate::app::App;
use crate::platform::{BACK_SHORTCUT, FORWARD_SHORTCUT, THEME_SHORTCUT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form card gets on large terminals
const MAX_CARD_WIDTH: u16 = 84;

/// Areas of the form screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    /// Bordered card holding everything but the status bar
    pub card: Rect,
    pub header: Rect,
    pub progress: Rect,
    pub body: Rect,
    pub navigation: Rect,
    pub status: Rect,
}

/// Split the terminal into the centered form card and the status bar
pub fn create_layout(area: Rect) -> FormLayout {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let card_width = rows[0].width.min(MAX_CARD_WIDTH);
    let card = Rect {
        x: rows[0].x + (rows[0].width - card_width) / 2,
        width: card_width,
        ..rows[0]
    };

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title, description, spacer
            Constraint::Length(4),             // Progress indicator
            Constraint::Min(0),                // Screen and questions
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .margin(1)
        .split(card);

    FormLayout {
        card,
        header: inner[0],
        progress: inner[1],
        body: inner[2],
        navigation: inner[3],
        status: rows[1],
    }
}

/// Draw the form title, description and current theme
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let config = app.session.config();

    let title = Paragraph::new(Line::from(Span::styled(
        config.title.as_str(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, area);

    let theme = Paragraph::new(Line::from(vec![
        Span::styled("◐ ", Style::default().fg(palette.muted)),
        Span::raw(app.theme.label()),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(theme, area);

    if area.height > 1 {
        let description = Paragraph::new(format!("── {}", config.description))
            .style(Style::default().fg(palette.muted));
        frame.render_widget(
            description,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Draw the status bar: a pending status message, or key help
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let line = if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(palette.error),
        ))
    } else {
        let key = Style::default().fg(palette.accent);
        Line::from(vec![
            Span::styled("Tab", key),
            Span::raw(": next field  "),
            Span::styled("Space", key),
            Span::raw(": select  "),
            Span::styled(FORWARD_SHORTCUT, key),
            Span::raw(": continue  "),
            Span::styled(BACK_SHORTCUT, key),
            Span::raw(": back  "),
            Span::styled(THEME_SHORTCUT, key),
            Span::raw(": theme  "),
            Span::styled("Esc", key),
            Span::raw(": quit"),
        ])
        .style(Style::default().fg(palette.muted))
    };

    frame.render_widget(Paragraph::new(line), area);
}
