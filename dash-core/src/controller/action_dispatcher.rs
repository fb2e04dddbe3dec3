//! src/controller/action_dispatcher.rs
//! ============================================================================
//! # ActionDispatcher: applies actions to UI state and the scan controller
//!
//! Owns the wiring between the pieces: the banner notifier writes into the
//! shared `UIState`, and the reset-view callback handed to the controller
//! sends the UI back to the splash screen.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::Config;
use crate::controller::actions::Action;
use crate::controller::scan_controller::{ResetViewCallback, ScanStatusController};
use crate::controller::traits::ScanService;
use crate::model::ui_state::{SharedUiState, UIState};
use crate::services::banner::UiBannerNotifier;

/// Whether the event loop should keep running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct ActionDispatcher {
    ui_state: SharedUiState,
    scan: ScanStatusController,
}

impl ActionDispatcher {
    pub fn new(config: &Config, service: Arc<dyn ScanService>) -> Self {
        let ui_state: SharedUiState = Arc::new(RwLock::new(UIState::new(config.theme)));

        let notifier = Arc::new(UiBannerNotifier::new(
            Arc::clone(&ui_state),
            config.banner.duration,
        ));

        let on_reset_view: ResetViewCallback = {
            let ui_state = Arc::clone(&ui_state);
            Arc::new(move || ui_state.write().reset_to_splash())
        };

        let scan = ScanStatusController::new(service, notifier, on_reset_view);

        Self { ui_state, scan }
    }

    pub fn ui_state(&self) -> &SharedUiState {
        &self.ui_state
    }

    pub fn scan_controller(&self) -> &ScanStatusController {
        &self.scan
    }

    pub fn dispatch(&self, action: Action) -> Flow {
        debug!(marker = "ACTION_DISPATCH", action = ?action, "Dispatching action");

        match action {
            Action::Quit => {
                info!("Quit requested");
                return Flow::Exit;
            }
            Action::EnterDashboard => self.ui_state.write().enter_dashboard(),
            Action::ToggleTheme => self.ui_state.write().toggle_theme(),
            Action::ResetView => self.scan.reset_view(),
            Action::RequestScan => {
                // The button is disabled mid-scan; a press there is a no-op.
                match self.scan.try_begin_scan() {
                    Some(generation) => {
                        let scan = self.scan.clone();
                        tokio::spawn(async move { scan.run_cycle(generation).await });
                    }
                    None => {
                        debug!(marker = "ACTION_DISPATCH", "Scan already in flight, ignoring");
                    }
                }
            }
        }

        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorConfig;
    use crate::controller::scan_controller::PROTOCOL_BANNER_MESSAGE;
    use crate::error::AppError;
    use crate::model::scan_status::{ScanResult, ScanStatus};
    use crate::model::ui_state::UIMode;
    use crate::services::simulated_scan::SimulatedScanService;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    /// Succeeds after a fixed latency and counts how often it was asked.
    struct CountingScanService {
        latency: Duration,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ScanService for CountingScanService {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn scan_available_pids(&self) -> Result<ScanResult, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            sleep(self.latency).await;
            Ok(ScanResult::Success)
        }
    }

    fn dispatcher(simulator: SimulatorConfig) -> ActionDispatcher {
        let config = Config {
            simulator: simulator.clone(),
            ..Config::default()
        };
        ActionDispatcher::new(&config, Arc::new(SimulatedScanService::new(simulator)))
    }

    #[tokio::test(start_paused = true)]
    async fn unconfigured_scan_shows_protocol_banner() {
        let dispatcher = dispatcher(SimulatorConfig {
            latency: Duration::from_millis(100),
            ..SimulatorConfig::default()
        });
        dispatcher.dispatch(Action::EnterDashboard);

        assert_eq!(dispatcher.dispatch(Action::RequestScan), Flow::Continue);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(dispatcher.scan_controller().status(), ScanStatus::Scanning);

        sleep(Duration::from_millis(100)).await;
        assert_eq!(dispatcher.scan_controller().status(), ScanStatus::Error);
        let ui = dispatcher.ui_state().read();
        assert_eq!(
            ui.notification.as_ref().map(|n| n.message.as_str()),
            Some(PROTOCOL_BANNER_MESSAGE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn press_while_scanning_is_ignored() {
        let dispatcher = dispatcher(SimulatorConfig {
            protocol: Some("SAE J1850 PWM".into()),
            latency: Duration::from_millis(500),
            ..SimulatorConfig::default()
        });
        let mut rx = dispatcher.scan_controller().subscribe();

        dispatcher.dispatch(Action::RequestScan);
        sleep(Duration::from_millis(10)).await;
        dispatcher.dispatch(Action::RequestScan);

        sleep(Duration::from_millis(600)).await;
        assert_eq!(dispatcher.scan_controller().status(), ScanStatus::Success);
        assert!(dispatcher.ui_state().read().notification.is_none());

        // Scanning then Success, collapsed by the watch into the latest value.
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ScanStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_presses_start_one_scan() {
        let service = Arc::new(CountingScanService {
            latency: Duration::from_millis(500),
            calls: AtomicUsize::new(0),
        });
        let dispatcher = ActionDispatcher::new(&Config::default(), service.clone());

        dispatcher.dispatch(Action::RequestScan);
        assert!(dispatcher.scan_controller().is_disabled());
        dispatcher.dispatch(Action::RequestScan);

        sleep(Duration::from_millis(600)).await;
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.scan_controller().status(), ScanStatus::Success);
    }

    #[tokio::test]
    async fn reset_view_goes_back_to_splash() {
        let dispatcher = dispatcher(SimulatorConfig::default());
        dispatcher.dispatch(Action::EnterDashboard);
        assert_eq!(dispatcher.ui_state().read().mode, UIMode::Dashboard);

        dispatcher.dispatch(Action::ResetView);
        assert_eq!(dispatcher.ui_state().read().mode, UIMode::Splash);
    }

    #[tokio::test]
    async fn quit_exits_and_theme_toggles() {
        let dispatcher = dispatcher(SimulatorConfig::default());
        let before = dispatcher.ui_state().read().theme;

        assert_eq!(dispatcher.dispatch(Action::ToggleTheme), Flow::Continue);
        assert_eq!(dispatcher.ui_state().read().theme, before.toggled());
        assert_eq!(dispatcher.dispatch(Action::Quit), Flow::Exit);
    }
}
