//! src/model/scan_status.rs
//! ============================================================================
//! # Scan status and scan results
//!
//! `ScanStatus` is the only mutable state behind the scan button. Everything
//! the button shows (label, border color, disabled, dimmed) is derived from
//! it here, so the view never keeps a second copy.
//!
//! `ScanResult` is what a [`ScanService`](crate::controller::traits::ScanService)
//! resolves with. Failures are data, classified into a closed set so callers
//! branch on variants instead of matching on free text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::view::theme::ColorToken;

/// Text a service reports when no diagnostic protocol has been selected.
pub const PROTOCOL_NOT_CONFIGURED_TEXT: &str = "No protocol configured";

/// Progress of the current scan cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    #[default]
    Idle,
    Scanning,
    Success,
    Error,
}

impl ScanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Scan PIDs",
            Self::Scanning => "Scanning…",
            Self::Success => "Scan Complete!",
            Self::Error => "Scan Failed",
        }
    }

    pub const fn color_token(self) -> ColorToken {
        match self {
            Self::Success => ColorToken::Success,
            Self::Error => ColorToken::Error,
            Self::Idle | Self::Scanning => ColorToken::Primary,
        }
    }

    /// The trigger must not be pressed while a scan is in flight.
    #[inline]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::Scanning)
    }

    #[inline]
    pub const fn is_dimmed(self) -> bool {
        matches!(self, Self::Scanning)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Why a scan did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFailure {
    ProtocolNotConfigured,
    Timeout,
    DeviceUnavailable,
    Unknown(String),
}

impl ScanFailure {
    /// Classify a free-text error reported by a legacy scan backend.
    pub fn from_error_text(text: &str) -> Self {
        if text.contains(PROTOCOL_NOT_CONFIGURED_TEXT) {
            return Self::ProtocolNotConfigured;
        }

        let lower = text.to_ascii_lowercase();
        if lower.contains("timeout") || lower.contains("timed out") {
            return Self::Timeout;
        }

        let mentions_device = lower.contains("device") || lower.contains("adapter");
        let unreachable = ["unavailable", "not connected", "not found", "disconnected"]
            .iter()
            .any(|needle| lower.contains(needle));
        if mentions_device && unreachable {
            return Self::DeviceUnavailable;
        }

        Self::Unknown(text.to_owned())
    }

    /// Only a missing protocol is something the user can fix from here.
    #[inline]
    pub const fn is_user_actionable(&self) -> bool {
        matches!(self, Self::ProtocolNotConfigured)
    }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProtocolNotConfigured => f.write_str(PROTOCOL_NOT_CONFIGURED_TEXT),
            Self::Timeout => f.write_str("scan timed out"),
            Self::DeviceUnavailable => f.write_str("diagnostic device unavailable"),
            Self::Unknown(detail) => write!(f, "unknown scan failure: {detail}"),
        }
    }
}

/// Resolved outcome of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    Success,
    Failure(ScanFailure),
}

impl ScanResult {
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Parse the `{ "success": bool, "error": "..." }` payload used by
    /// backends that report failures as text.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        let raw: RawScanResult = serde_json::from_str(payload)?;
        Ok(raw.into())
    }
}

/// Two-field wire form of a scan result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScanResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RawScanResult> for ScanResult {
    fn from(raw: RawScanResult) -> Self {
        if raw.success {
            return Self::Success;
        }

        match raw.error {
            Some(text) => Self::Failure(ScanFailure::from_error_text(&text)),
            None => Self::Failure(ScanFailure::Unknown(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_is_derived_from_status() {
        let table = [
            (ScanStatus::Idle, "Scan PIDs", ColorToken::Primary, false),
            (ScanStatus::Scanning, "Scanning…", ColorToken::Primary, true),
            (ScanStatus::Success, "Scan Complete!", ColorToken::Success, false),
            (ScanStatus::Error, "Scan Failed", ColorToken::Error, false),
        ];

        for (status, label, color, disabled) in table {
            assert_eq!(status.label(), label);
            assert_eq!(status.color_token(), color);
            assert_eq!(status.is_disabled(), disabled);
            assert_eq!(status.is_dimmed(), disabled);
        }
    }

    #[test]
    fn default_status_is_idle() {
        assert_eq!(ScanStatus::default(), ScanStatus::Idle);
    }

    #[test]
    fn classifies_protocol_text_by_substring() {
        assert_eq!(
            ScanFailure::from_error_text("No protocol configured: select one in settings"),
            ScanFailure::ProtocolNotConfigured
        );
        assert!(ScanFailure::ProtocolNotConfigured.is_user_actionable());
    }

    #[test]
    fn classifies_other_failures() {
        assert_eq!(ScanFailure::from_error_text("timeout"), ScanFailure::Timeout);
        assert_eq!(
            ScanFailure::from_error_text("Request Timed Out after 5s"),
            ScanFailure::Timeout
        );
        assert_eq!(
            ScanFailure::from_error_text("OBD adapter not connected"),
            ScanFailure::DeviceUnavailable
        );

        let unknown = ScanFailure::from_error_text("checksum mismatch");
        assert_eq!(unknown, ScanFailure::Unknown("checksum mismatch".into()));
        assert!(!unknown.is_user_actionable());
        assert!(!ScanFailure::Timeout.is_user_actionable());
    }

    #[test]
    fn protocol_match_is_case_sensitive() {
        assert!(matches!(
            ScanFailure::from_error_text("no protocol configured"),
            ScanFailure::Unknown(_)
        ));
    }

    #[test]
    fn parses_wire_payloads() {
        assert_eq!(
            ScanResult::from_json(r#"{"success":true}"#).unwrap(),
            ScanResult::Success
        );
        assert_eq!(
            ScanResult::from_json(r#"{"success":false,"error":"No protocol configured: X"}"#)
                .unwrap(),
            ScanResult::Failure(ScanFailure::ProtocolNotConfigured)
        );
        assert_eq!(
            ScanResult::from_json(r#"{"success":false}"#).unwrap(),
            ScanResult::Failure(ScanFailure::Unknown(String::new()))
        );
        assert!(ScanResult::from_json("not json").is_err());
    }

    #[test]
    fn success_ignores_stray_error_text() {
        let raw = RawScanResult {
            success: true,
            error: Some("timeout".into()),
        };
        let result = ScanResult::from(raw);
        assert_eq!(result, ScanResult::Success);
    }
}
