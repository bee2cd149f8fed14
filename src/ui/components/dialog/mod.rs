//! Dialog components for TUI

mod base;
mod submitted_dialog;

pub use submitted_dialog::render_submitted_dialog;
