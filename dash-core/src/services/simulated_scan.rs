//! src/services/simulated_scan.rs
//! ============================================================================
//! # Simulated PID scan
//!
//! Stands in for a real OBD-II probe. It answers the way a text-reporting
//! backend would (`{ success, error }`) and converts through
//! [`RawScanResult`] so classification happens at this boundary, not in
//! the controller.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::SimulatorConfig;
use crate::controller::traits::ScanService;
use crate::error::AppError;
use crate::model::scan_status::{PROTOCOL_NOT_CONFIGURED_TEXT, RawScanResult, ScanResult};

#[derive(Debug, Clone)]
pub struct SimulatedScanService {
    config: SimulatorConfig,
}

impl SimulatedScanService {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    fn probe(&self) -> RawScanResult {
        if let Some(text) = &self.config.force_failure {
            return RawScanResult {
                success: false,
                error: Some(text.clone()),
            };
        }

        let Some(protocol) = &self.config.protocol else {
            return RawScanResult {
                success: false,
                error: Some(format!(
                    "{PROTOCOL_NOT_CONFIGURED_TEXT}: select a protocol before scanning"
                )),
            };
        };

        if self.config.supported_pids.is_empty() {
            return RawScanResult {
                success: false,
                error: Some(format!("ECU on {protocol} reported no supported PIDs")),
            };
        }

        let pids = self
            .config
            .supported_pids
            .iter()
            .map(|pid| format!("0x{pid:02X}"))
            .collect::<Vec<_>>()
            .join(",");

        info!(
            marker = "PID_SCAN",
            operation_type = "pids_discovered",
            protocol = %protocol,
            count = self.config.supported_pids.len(),
            pids = %pids,
            "Simulated ECU answered"
        );

        RawScanResult {
            success: true,
            error: None,
        }
    }
}

#[async_trait]
impl ScanService for SimulatedScanService {
    fn name(&self) -> &'static str {
        "simulator"
    }

    async fn scan_available_pids(&self) -> Result<ScanResult, AppError> {
        debug!(
            marker = "PID_SCAN",
            operation_type = "probe_start",
            latency_ms = self.config.latency.as_millis() as u64,
            "Probing simulated bus"
        );

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        Ok(self.probe().into())
    }
}
