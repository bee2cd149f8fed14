//! Colour palettes for the themes

use crate::config::ThemeName;
use ratatui::style::Color;

/// Colours used across the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Focus, titles and the progress bar
    pub accent: Color,
    /// Hints, placeholders and inactive borders
    pub muted: Color,
    pub text: Color,
    pub error: Color,
    pub success: Color,
}

pub fn palette(theme: ThemeName) -> Palette {
    match theme {
        ThemeName::Plain => Palette {
            accent: Color::Cyan,
            muted: Color::DarkGray,
            text: Color::White,
            error: Color::Red,
            success: Color::Green,
        },
        ThemeName::Winter => Palette {
            accent: Color::Rgb(96, 165, 250),
            muted: Color::Rgb(100, 116, 139),
            text: Color::Rgb(226, 232, 240),
            error: Color::Rgb(248, 113, 113),
            success: Color::Rgb(125, 211, 252),
        },
        ThemeName::SnowyNight => Palette {
            accent: Color::Rgb(199, 210, 254),
            muted: Color::Rgb(71, 85, 105),
            text: Color::Rgb(241, 245, 249),
            error: Color::Rgb(252, 165, 165),
            success: Color::Rgb(167, 243, 208),
        },
        ThemeName::Vintage => Palette {
            accent: Color::Rgb(180, 140, 90),
            muted: Color::Rgb(120, 110, 95),
            text: Color::Rgb(235, 225, 205),
            error: Color::Rgb(190, 80, 60),
            success: Color::Rgb(140, 160, 90),
        },
        ThemeName::Vampire => Palette {
            accent: Color::Rgb(220, 38, 38),
            muted: Color::Rgb(87, 83, 78),
            text: Color::Rgb(245, 245, 244),
            error: Color::Rgb(251, 146, 60),
            success: Color::Rgb(168, 85, 247),
        },
        ThemeName::Bubblegum => Palette {
            accent: Color::Rgb(244, 114, 182),
            muted: Color::Rgb(157, 122, 145),
            text: Color::Rgb(253, 242, 248),
            error: Color::Rgb(225, 29, 72),
            success: Color::Rgb(134, 239, 172),
        },
        ThemeName::GreenTea => Palette {
            accent: Color::Rgb(132, 204, 22),
            muted: Color::Rgb(101, 119, 84),
            text: Color::Rgb(236, 252, 203),
            error: Color::Rgb(234, 88, 12),
            success: Color::Rgb(74, 222, 128),
        },
        ThemeName::Wood => Palette {
            accent: Color::Rgb(217, 119, 6),
            muted: Color::Rgb(120, 85, 60),
            text: Color::Rgb(254, 243, 199),
            error: Color::Rgb(185, 28, 28),
            success: Color::Rgb(101, 163, 13),
        },
        ThemeName::Beach => Palette {
            accent: Color::Rgb(6, 182, 212),
            muted: Color::Rgb(148, 140, 110),
            text: Color::Rgb(255, 251, 235),
            error: Color::Rgb(239, 68, 68),
            success: Color::Rgb(250, 204, 21),
        },
    }
}
