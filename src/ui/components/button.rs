//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a button with border. Disabled buttons are drawn in `muted`
/// and never shown as selected.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Color,
    muted: Color,
) {
    let is_selected = is_selected && is_enabled;

    let border_style = if is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(muted)
    };

    let text_style = if is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(muted).add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
