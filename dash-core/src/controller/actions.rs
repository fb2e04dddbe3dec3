//! src/controller/actions.rs
//! ============================================================================
//! # Actions: what a key press means
//!
//! Terminal events are translated into `Action`s here so the dispatcher
//! never looks at raw key codes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ui_state::UIMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the splash screen.
    EnterDashboard,

    /// Press the "Scan PIDs" button.
    RequestScan,

    /// Return to the splash screen.
    ResetView,

    ToggleTheme,

    Quit,
}

impl Action {
    /// Map a key press to an action for the given screen.
    pub fn from_key(key: KeyEvent, mode: UIMode) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Self::Quit);
        }

        match (mode, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q')) => Some(Self::Quit),
            (UIMode::Splash, _) => Some(Self::EnterDashboard),
            (UIMode::Dashboard, KeyCode::Char('s') | KeyCode::Enter) => Some(Self::RequestScan),
            (UIMode::Dashboard, KeyCode::Char('r')) => Some(Self::ResetView),
            (UIMode::Dashboard, KeyCode::Char('t')) => Some(Self::ToggleTheme),
            (UIMode::Dashboard, _) => None,
        }
    }
}
