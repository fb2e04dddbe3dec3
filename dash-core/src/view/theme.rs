//! src/view/theme.rs
//! ============================================================================
//! # Theme palettes and color tokens
//!
//! Components never hardcode colors; they ask a [`ThemeProvider`] for a
//! named [`ColorToken`]. The dark palette is Catppuccin Mocha, the light
//! palette Catppuccin Latte:
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Named color slots a palette must fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Primary,
    Success,
    Warning,
    Error,
    Background,
    Card,
    Text,
    Muted,
}

/// Supplies color tokens to the view and to banner producers.
pub trait ThemeProvider: Send + Sync {
    fn color(&self, token: ColorToken) -> Color;

    fn style(&self, token: ColorToken) -> Style {
        Style::default().fg(self.color(token))
    }
}

/// Palette selector, as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn palette(self) -> Palette {
        match self {
            Self::Dark => MOCHA,
            Self::Light => LATTE,
        }
    }
}

/// A complete set of token colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub background: Color,
    pub card: Color,
    pub text: Color,
    pub muted: Color,
}

pub const MOCHA: Palette = Palette {
    primary: Color::Rgb(137, 180, 250),    // Blue
    success: Color::Rgb(166, 227, 161),    // Green
    warning: Color::Rgb(249, 226, 175),    // Yellow
    error: Color::Rgb(243, 139, 168),      // Red
    background: Color::Rgb(30, 30, 46),    // Base
    card: Color::Rgb(49, 50, 68),          // Surface0
    text: Color::Rgb(205, 214, 244),       // Text
    muted: Color::Rgb(127, 132, 156),      // Overlay1
};

pub const LATTE: Palette = Palette {
    primary: Color::Rgb(30, 102, 245),     // Blue
    success: Color::Rgb(64, 160, 43),      // Green
    warning: Color::Rgb(223, 142, 29),     // Yellow
    error: Color::Rgb(210, 15, 57),        // Red
    background: Color::Rgb(239, 241, 245), // Base
    card: Color::Rgb(204, 208, 218),       // Surface0
    text: Color::Rgb(76, 79, 105),         // Text
    muted: Color::Rgb(140, 143, 161),      // Overlay1
};

impl ThemeProvider for Palette {
    fn color(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Primary => self.primary,
            ColorToken::Success => self.success,
            ColorToken::Warning => self.warning,
            ColorToken::Error => self.error,
            ColorToken::Background => self.background,
            ColorToken::Card => self.card,
            ColorToken::Text => self.text,
            ColorToken::Muted => self.muted,
        }
    }
}

/// Log the active palette once at startup.
#[instrument(level = "debug")]
pub fn init_theme(kind: ThemeKind) {
    let palette = kind.palette();
    debug!("Initializing {:?} theme", kind);
    debug!("Background: {:?}", palette.background);
    debug!("Primary: {:?}", palette.primary);
}
