//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── stage ──────────────────────────────────────────────────
    /// The reel digits: warm yellow, bold to stand in for the glow.
    pub fn reel_style() -> Style {
        Style::default()
            .fg(Color::Rgb(250, 204, 21))
            .add_modifier(Modifier::BOLD)
    }

    pub fn prefix_style() -> Style {
        Style::default().fg(Color::White)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    // ── popups ─────────────────────────────────────────────────
    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_value_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
