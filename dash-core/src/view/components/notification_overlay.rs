//! src/view/components/notification_overlay.rs
//! ============================================================================
//! # BannerOverlay: transient banner across the top of the screen
//!
//! Draws the current `Notification` over whatever screen is showing, in the
//! color its producer picked. Expiry is handled by `UIState`, not here.

use crate::model::ui_state::Notification;
use crate::view::theme::{ColorToken, ThemeProvider};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Clear, Paragraph, Wrap},
};
use tracing::{debug, instrument};

pub struct BannerOverlay;

impl BannerOverlay {
    pub fn new() -> Self {
        Self
    }

    /// Slot for the banner at the top of `area`, one text line plus padding.
    pub fn area(area: Rect) -> Rect {
        Rect {
            height: area.height.min(3),
            ..area
        }
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(
            marker = "BANNER_DISPLAYED",
            operation_type = "banner_render",
            message_len = notification.message.len(),
            auto_dismiss_ms = ?notification.auto_dismiss_ms
        )
    )]
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        notification: &Notification,
        theme: &dyn ThemeProvider,
        area: Rect,
    ) {
        let slot = Self::area(area);
        frame.render_widget(Clear, slot);

        // Text on a colored banner uses the page background for contrast.
        let style = Style::default()
            .bg(theme.color(notification.background))
            .fg(theme.color(ColorToken::Background))
            .add_modifier(Modifier::BOLD);

        let banner = Paragraph::new(format!("\n{}", notification.message))
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        frame.render_widget(banner, slot);

        debug!(
            target: "dash_core::view::components::notification_overlay",
            background = ?notification.background,
            "Banner rendered"
        );
    }
}

impl Default for BannerOverlay {
    fn default() -> Self {
        Self::new()
    }
}
