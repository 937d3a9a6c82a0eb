//! Chrome theme and per-page background tinting.

use iced::{Color, Theme as IcedTheme};

use crate::pages::EdgeColor;

/// Chrome theme for the reader UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl From<crate::config::ThemeMode> for Theme {
    fn from(mode: crate::config::ThemeMode) -> Self {
        match mode {
            crate::config::ThemeMode::Night => Theme::Dark,
            crate::config::ThemeMode::Day => Theme::Light,
        }
    }
}

impl From<Theme> for IcedTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => IcedTheme::Light,
            Theme::Dark => IcedTheme::Dark,
        }
    }
}

/// The page surface is tinted with the current page's edge color so the
/// letterboxing blends into the artwork.
pub fn background_from_edge(color: EdgeColor) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}

/// Fallback surface color while no page (or no edge color) is available.
pub fn neutral_background(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::from_rgb8(0xee, 0xee, 0xee),
        Theme::Dark => Color::from_rgb8(0x16, 0x16, 0x16),
    }
}
