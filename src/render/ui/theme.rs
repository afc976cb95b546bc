//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for terminal rendering using ratatui's
//! color system directly to avoid unnecessary abstractions.

use crate::render::ui::state::Tone;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Placeholder and hint text
    pub muted_text: Color,

    /// Product names in the list
    pub product_name: Style,

    /// Prices in the list and detail panel
    pub price: Style,

    /// Selected list row
    pub selection: Style,

    /// Border of the focused region
    pub focused_border: Color,

    /// Border of unfocused regions
    pub border: Color,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// "Not found" style messages
    pub warning_text: Color,

    /// Error text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None, // Use terminal default
            muted_text: Color::DarkGray,
            product_name: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            focused_border: Color::Yellow,
            border: Color::DarkGray,
            status_bg: Color::Blue,
            status_fg: Color::White,
            warning_text: Color::Yellow,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            muted_text: Color::Gray,
            product_name: Style::default().add_modifier(Modifier::BOLD),
            price: Style::default(),
            selection: Style::default().fg(Color::Black).bg(Color::White),
            focused_border: Color::White,
            border: Color::Gray,
            status_bg: Color::Black,
            status_fg: Color::White,
            warning_text: Color::White,
            error_text: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            muted_text: Color::Gray,
            product_name: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            price: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::Black).bg(Color::LightYellow),
            focused_border: Color::LightYellow,
            border: Color::White,
            status_bg: Color::White,
            status_fg: Color::Black,
            warning_text: Color::LightYellow,
            error_text: Color::LightRed,
        }
    }

    /// Look a theme up by its configuration name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "monochrome" => Some(Self::monochrome()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Text style for a panel line of the given tone.
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Muted => Style::default()
                .fg(self.muted_text)
                .add_modifier(Modifier::ITALIC),
            Tone::Normal => match self.normal_text {
                Some(color) => Style::default().fg(color),
                None => Style::default(),
            },
            Tone::Warning => Style::default().fg(self.warning_text),
            Tone::Error => Style::default().fg(self.error_text),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().fg(self.border)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.normal_text, None);
        assert_eq!(theme.status_fg, Color::White);
        assert_eq!(theme.status_bg, Color::Blue);
        assert_eq!(theme.price.fg, Some(Color::Green));
    }

    #[test]
    fn test_monochrome_theme() {
        let theme = ColorTheme::monochrome();
        assert_eq!(theme.status_bg, Color::Black);
        assert_eq!(theme.selection.bg, Some(Color::White));
        assert_eq!(theme.error_text, Color::White);
    }

    #[test]
    fn test_high_contrast_theme() {
        let theme = ColorTheme::high_contrast();
        assert_eq!(theme.normal_text, Some(Color::White));
        assert_eq!(theme.error_text, Color::LightRed);
        assert_eq!(theme.status_bg, Color::White);
        assert_eq!(theme.status_fg, Color::Black);
    }

    #[test]
    fn themes_resolve_by_name() {
        assert!(ColorTheme::by_name("default").is_some());
        assert_eq!(
            ColorTheme::by_name("high-contrast").unwrap().status_bg,
            Color::White
        );
        assert!(ColorTheme::by_name("neon").is_none());
    }

    #[test]
    fn tone_styles() {
        let theme = ColorTheme::default();
        assert_eq!(theme.tone_style(Tone::Error).fg, Some(Color::Red));
        assert_eq!(theme.tone_style(Tone::Warning).fg, Some(Color::Yellow));
        assert_eq!(theme.tone_style(Tone::Normal), Style::default());
        assert_eq!(
            theme.border_style(true).fg,
            Some(theme.focused_border)
        );
    }
}
