//! UI state: which screen is up, the active palette and the current banner

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use compact_str::CompactString;
use parking_lot::RwLock;

use crate::view::theme::{ColorToken, ThemeKind};

/// UI state shared between the render loop and banner producers
pub type SharedUiState = Arc<RwLock<UIState>>;

/// Top-level screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UIMode {
    #[default]
    Splash,
    Dashboard,
}

/// Banner currently on screen
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub background: ColorToken,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.auto_dismiss_ms.is_some_and(|ms| {
            now.saturating_duration_since(self.timestamp).as_millis() >= u128::from(ms)
        })
    }
}

#[derive(Debug)]
pub struct UIState {
    redraw: AtomicBool,
    pub frame_count: AtomicU64,

    pub mode: UIMode,
    pub theme: ThemeKind,
    pub notification: Option<Notification>,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(ThemeKind::default())
    }
}

impl UIState {
    pub fn new(theme: ThemeKind) -> Self {
        Self {
            redraw: AtomicBool::new(true),
            frame_count: AtomicU64::new(0),
            mode: UIMode::Splash,
            theme,
            notification: None,
        }
    }

    #[inline]
    pub fn request_redraw(&self) {
        self.redraw.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.redraw.store(false, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_frame(&self) {
        self.frame_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn show_banner(
        &mut self,
        message: impl Into<CompactString>,
        background: ColorToken,
        auto_dismiss_ms: Option<u32>,
    ) {
        self.notification = Some(Notification {
            message: message.into(),
            background,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
        self.request_redraw();
    }

    /// Drop the banner once its time is up. Returns true if one was removed.
    pub fn update_notification(&mut self) -> bool {
        self.update_notification_at(Instant::now())
    }

    pub fn update_notification_at(&mut self, now: Instant) -> bool {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
            self.request_redraw();
            return true;
        }
        false
    }

    pub fn enter_dashboard(&mut self) {
        if self.mode != UIMode::Dashboard {
            self.mode = UIMode::Dashboard;
            self.request_redraw();
        }
    }

    /// Back to the initial splash view with no banner showing.
    pub fn reset_to_splash(&mut self) {
        self.mode = UIMode::Splash;
        self.notification = None;
        self.request_redraw();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.request_redraw();
    }
}
