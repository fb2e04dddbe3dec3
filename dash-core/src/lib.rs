pub mod error;

pub mod config;

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod action_dispatcher;
    pub use action_dispatcher::{ActionDispatcher, Flow};

    pub mod scan_controller;
    pub use scan_controller::ScanStatusController;

    pub mod traits;
    pub use traits::{Banner, BannerNotifier, ScanService};
}

pub mod model {
    pub mod dashboard;

    pub mod scan_status;
    pub use scan_status::{RawScanResult, ScanFailure, ScanResult, ScanStatus};

    pub mod ui_state;
    pub use ui_state::{Notification, SharedUiState, UIMode, UIState};
}

pub mod services {
    pub mod banner;
    pub use banner::UiBannerNotifier;

    pub mod simulated_scan;
    pub use simulated_scan::SimulatedScanService;
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod notification_overlay;
        pub use notification_overlay::BannerOverlay;
        pub mod scan_button;
        pub use scan_button::{ScanButton, ScanButtonProps};
        pub mod score_panel;
        pub use score_panel::ScorePanel;
    }
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use controller::scan_controller::ScanStatusController;
pub use model::{scan_status::ScanStatus, ui_state::UIState};
