use async_trait::async_trait;
use compact_str::CompactString;

use crate::error::AppError;
use crate::model::scan_status::ScanResult;
use crate::view::theme::ColorToken;

/// Probes the vehicle bus for the PIDs it answers to.
///
/// `Ok` carries the outcome, including classified failures. `Err` means the
/// service itself broke and produced no outcome.
#[async_trait]
pub trait ScanService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn scan_available_pids(&self) -> Result<ScanResult, AppError>;
}

/// Transient, non-modal message shown over the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: CompactString,
    pub background: ColorToken,
}

impl Banner {
    pub fn new(message: impl Into<CompactString>, background: ColorToken) -> Self {
        Self {
            message: message.into(),
            background,
        }
    }

    pub fn error(message: impl Into<CompactString>) -> Self {
        Self::new(message, ColorToken::Error)
    }
}

/// Fire-and-forget banner sink. How long a banner stays up is the
/// notifier's business.
pub trait BannerNotifier: Send + Sync {
    fn show_banner(&self, banner: Banner);
}
