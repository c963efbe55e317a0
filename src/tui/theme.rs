//! TUI theme and styles

use ratatui::style::{Color, Modifier, Style};

use crate::screening::MatchLabel;

/// Application color theme
pub struct Theme;

impl Theme {
    /// Primary accent color
    pub const PRIMARY: Color = Color::Cyan;

    /// Success color
    pub const SUCCESS: Color = Color::Green;

    /// Error color
    pub const ERROR: Color = Color::Red;

    /// Warning color
    pub const WARNING: Color = Color::Yellow;

    /// Muted text color
    pub const MUTED: Color = Color::DarkGray;

    /// Header style
    pub fn header() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::Black)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default()
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Section title inside a panel
    pub fn section() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Error text style
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Color for a match label, strongest matches greenest
    pub fn match_label(label: MatchLabel) -> Style {
        let color = match label {
            MatchLabel::Excellent | MatchLabel::Good => Self::SUCCESS,
            MatchLabel::Fair => Self::WARNING,
            MatchLabel::Weak | MatchLabel::Poor => Self::ERROR,
        };
        Style::default().fg(color)
    }
}
