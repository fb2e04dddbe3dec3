//! src/controller/scan_controller.rs
//! ============================================================================
//! # ScanStatusController: PID scan button state machine
//!
//! ```text
//! Idle --request_scan()--> Scanning
//! Scanning --resolve(success)--> Success
//! Scanning --resolve(failure | fault)--> Error
//! Success | Error --reset_delay--> Idle
//! ```
//!
//! Each `request_scan` starts a new generation. Reset timers capture the
//! generation they were scheduled for and do nothing if a newer scan has
//! started since, so a cooldown from an old cycle never knocks a running
//! scan back to `Idle`.
//!
//! `request_scan` does not reject a request issued while `Scanning`. Callers
//! that must keep one scan outstanding use `try_begin_scan`, which checks
//! and claims the `Scanning` state under the cycle lock, then drive the
//! claimed cycle with `run_cycle`.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, instrument, warn};

use crate::controller::traits::{Banner, BannerNotifier, ScanService};
use crate::model::scan_status::{ScanResult, ScanStatus};

/// Cooldown between a finished scan and the button returning to idle.
pub const SCAN_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Shown when the scan failed because no diagnostic protocol is selected.
pub const PROTOCOL_BANNER_MESSAGE: &str = "Please configure protocol first";

/// Returns the screen to its initial (splash) view.
pub type ResetViewCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, Default)]
struct ScanCycle {
    status: ScanStatus,
    generation: u64,
}

struct Inner {
    cycle: Mutex<ScanCycle>,
    status_tx: watch::Sender<ScanStatus>,
    service: Arc<dyn ScanService>,
    notifier: Arc<dyn BannerNotifier>,
    on_reset_view: ResetViewCallback,
    reset_delay: Duration,
}

impl Inner {
    /// Caller holds the cycle lock, so watchers see transitions in order.
    fn publish(&self, cycle: &mut ScanCycle, status: ScanStatus) {
        cycle.status = status;
        self.status_tx.send_replace(status);
    }

    fn begin(&self, cycle: &mut ScanCycle) -> u64 {
        cycle.generation = cycle.generation.wrapping_add(1);
        self.publish(cycle, ScanStatus::Scanning);
        cycle.generation
    }

    fn reset_if_current(&self, generation: u64) {
        let mut cycle = self.cycle.lock();
        if cycle.generation != generation {
            debug!(
                marker = "SCAN_CONTROLLER",
                operation_type = "stale_reset_skipped",
                timer_generation = generation,
                current_generation = cycle.generation,
                "Ignoring reset timer from a superseded scan"
            );
            return;
        }

        self.publish(&mut cycle, ScanStatus::Idle);
        debug!(
            marker = "SCAN_CONTROLLER",
            operation_type = "status_reset",
            generation,
            "Scan status returned to idle"
        );
    }
}

/// Drives the scan button. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ScanStatusController {
    inner: Arc<Inner>,
}

impl ScanStatusController {
    pub fn new(
        service: Arc<dyn ScanService>,
        notifier: Arc<dyn BannerNotifier>,
        on_reset_view: ResetViewCallback,
    ) -> Self {
        Self::with_reset_delay(service, notifier, on_reset_view, SCAN_RESET_DELAY)
    }

    fn with_reset_delay(
        service: Arc<dyn ScanService>,
        notifier: Arc<dyn BannerNotifier>,
        on_reset_view: ResetViewCallback,
        reset_delay: Duration,
    ) -> Self {
        let (status_tx, _) = watch::channel(ScanStatus::Idle);
        Self {
            inner: Arc::new(Inner {
                cycle: Mutex::new(ScanCycle::default()),
                status_tx,
                service,
                notifier,
                on_reset_view,
                reset_delay,
            }),
        }
    }

    #[inline]
    pub fn status(&self) -> ScanStatus {
        self.inner.cycle.lock().status
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.status().is_disabled()
    }

    /// Receiver that wakes on every status change.
    pub fn subscribe(&self) -> watch::Receiver<ScanStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Run one scan cycle. Never fails: service faults end in `Error`.
    pub async fn request_scan(&self) {
        let generation = self.begin_cycle();
        self.run_cycle(generation).await;
    }

    /// Claim a new cycle unless one is already in flight.
    ///
    /// Returns the generation to hand to [`Self::run_cycle`]. The check and
    /// the move to `Scanning` happen under one lock, so two back-to-back
    /// presses cannot both start a scan.
    pub fn try_begin_scan(&self) -> Option<u64> {
        let mut cycle = self.inner.cycle.lock();
        if cycle.status.is_disabled() {
            return None;
        }
        Some(self.inner.begin(&mut cycle))
    }

    /// Await the service for a cycle already moved to `Scanning`.
    #[instrument(
        skip(self),
        fields(
            marker = "SCAN_CONTROLLER",
            service = self.inner.service.name()
        )
    )]
    pub async fn run_cycle(&self, generation: u64) {
        let started = Instant::now();

        info!(
            marker = "SCAN_CONTROLLER",
            operation_type = "scan_start",
            generation,
            "Starting PID scan"
        );

        let outcome = self.inner.service.scan_available_pids().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let next = match &outcome {
            Ok(result) if result.is_success() => ScanStatus::Success,
            _ => ScanStatus::Error,
        };

        {
            let mut cycle = self.inner.cycle.lock();
            self.inner.publish(&mut cycle, next);
        }

        match outcome {
            Ok(ScanResult::Success) => {
                info!(
                    marker = "SCAN_CONTROLLER",
                    operation_type = "scan_success",
                    generation,
                    elapsed_ms,
                    "PID scan complete"
                );
            }
            Ok(ScanResult::Failure(failure)) => {
                warn!(
                    marker = "SCAN_CONTROLLER",
                    operation_type = "scan_failed",
                    generation,
                    elapsed_ms,
                    failure = %failure,
                    "PID scan failed"
                );
                if failure.is_user_actionable() {
                    self.inner
                        .notifier
                        .show_banner(Banner::error(PROTOCOL_BANNER_MESSAGE));
                }
            }
            Err(err) => {
                error!(
                    marker = "SCAN_CONTROLLER",
                    operation_type = "scan_fault",
                    generation,
                    elapsed_ms,
                    error = %err,
                    "Scan service faulted"
                );
            }
        }

        self.schedule_reset(generation);
    }

    /// Go back to the splash view through the callback supplied at construction.
    pub fn reset_view(&self) {
        info!(
            marker = "SCAN_CONTROLLER",
            operation_type = "reset_view",
            "Resetting to initial view"
        );
        (self.inner.on_reset_view)();
    }

    fn begin_cycle(&self) -> u64 {
        let mut cycle = self.inner.cycle.lock();
        self.inner.begin(&mut cycle)
    }

    fn schedule_reset(&self, generation: u64) {
        let deadline = Instant::now() + self.inner.reset_delay;
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            sleep_until(deadline).await;
            if let Some(inner) = weak.upgrade() {
                inner.reset_if_current(generation);
            }
        });
    }
}

impl std::fmt::Debug for ScanStatusController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cycle = *self.inner.cycle.lock();
        f.debug_struct("ScanStatusController")
            .field("status", &cycle.status)
            .field("generation", &cycle.generation)
            .field("service", &self.inner.service.name())
            .field("reset_delay", &self.inner.reset_delay)
            .finish()
    }
}
