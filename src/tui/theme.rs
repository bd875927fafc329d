use ratatui::style::Color;

use crate::model::config::Config;
use crate::model::node::Priority;

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight: Color,
    pub border: Color,
    pub folder: Color,
    pub done: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub status: Color,
}

impl Theme {
    pub fn dark() -> Theme {
        Theme {
            background: Color::Rgb(0x1E, 0x1E, 0x1E),
            text: Color::Rgb(0xC5, 0xC5, 0xC5),
            dim: Color::Rgb(0x6E, 0x6E, 0x6E),
            highlight: Color::Rgb(0x56, 0x9C, 0xD6),
            border: Color::Rgb(0x3C, 0x3C, 0x3C),
            folder: Color::Rgb(0xC5, 0xC5, 0xC5),
            done: Color::Rgb(0x4C, 0xAF, 0x50),
            high: Color::Rgb(0xF4, 0x43, 0x36),
            medium: Color::Rgb(0xFF, 0xB9, 0x00),
            low: Color::Rgb(0x61, 0xD4, 0x6F),
            selection_bg: Color::Rgb(0x26, 0x4F, 0x78),
            selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            status: Color::Rgb(0x9C, 0x9C, 0x9C),
        }
    }

    pub fn light() -> Theme {
        Theme {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x33, 0x33, 0x33),
            dim: Color::Rgb(0x8A, 0x8A, 0x8A),
            highlight: Color::Rgb(0x00, 0x64, 0xC8),
            border: Color::Rgb(0xD0, 0xD0, 0xD0),
            folder: Color::Rgb(0x44, 0x44, 0x44),
            done: Color::Rgb(0x2E, 0x7D, 0x32),
            high: Color::Rgb(0xC6, 0x28, 0x28),
            medium: Color::Rgb(0xB2, 0x6A, 0x00),
            low: Color::Rgb(0x38, 0x8E, 0x3C),
            selection_bg: Color::Rgb(0xCC, 0xE2, 0xFF),
            selection_fg: Color::Rgb(0x11, 0x11, 0x11),
            status: Color::Rgb(0x66, 0x66, 0x66),
        }
    }

    /// Pick a theme from config; unknown names fall back to dark.
    pub fn from_config(config: &Config) -> Theme {
        match config.theme.as_str() {
            "light" => Theme::light(),
            _ => Theme::dark(),
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}
