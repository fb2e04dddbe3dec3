//! Banner notifier that writes into the shared UI state.

use std::time::Duration;

use tracing::info;

use crate::controller::traits::{Banner, BannerNotifier};
use crate::model::ui_state::SharedUiState;

pub struct UiBannerNotifier {
    ui_state: SharedUiState,
    duration: Duration,
}

impl UiBannerNotifier {
    pub fn new(ui_state: SharedUiState, duration: Duration) -> Self {
        Self { ui_state, duration }
    }
}

impl BannerNotifier for UiBannerNotifier {
    fn show_banner(&self, banner: Banner) {
        info!(
            marker = "BANNER",
            operation_type = "banner_shown",
            message = %banner.message,
            background = ?banner.background,
            "Showing banner"
        );

        let auto_dismiss_ms = u32::try_from(self.duration.as_millis()).unwrap_or(u32::MAX);
        self.ui_state
            .write()
            .show_banner(banner.message, banner.background, Some(auto_dismiss_ms));
    }
}
