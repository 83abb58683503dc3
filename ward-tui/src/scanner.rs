//! Scanner view state: audit request plus a display-only progress bar.
//! The bar advances 15% per 200ms tick capped at 95 and jumps to 100 when
//! the response lands; it tracks perceived responsiveness, not server
//! progress.

use ward_core::models::AuditResult;
use ward_core::verified;

use crate::tasks::TaskGuard;

pub const PROGRESS_TICK_MS: u64 = 200;
const PROGRESS_STEP: u8 = 15;
const PROGRESS_CEILING: u8 = 95;

/// The one token the team ships a dedicated banner for. Kept separate
/// from the manually-verified list on purpose; see DESIGN.md.
pub const OFFICIAL_WARD_TOKEN: &str = "HHe76F2iWTj8h9RzrEmMZc3YrW1mXmAkwZ3iMszTpump";

#[derive(Default)]
pub struct ScannerState {
    pub address_input: String,
    pub scanning: bool,
    pub progress: u8,
    pub result: Option<AuditResult>,
    pub error: Option<String>,
    pub progress_guard: Option<TaskGuard>,
}

impl ScannerState {
    pub fn begin_scan(&mut self) {
        self.scanning = true;
        self.progress = 0;
        self.result = None;
        self.error = None;
    }

    pub fn on_progress_tick(&mut self) {
        if self.scanning {
            self.progress = (self.progress + PROGRESS_STEP).min(PROGRESS_CEILING);
        }
    }

    pub fn on_result(&mut self, result: AuditResult) {
        self.scanning = false;
        self.progress = 100;
        self.result = Some(result);
        self.progress_guard = None;
    }

    /// Scan failures reset to an empty view; the scanner keeps no stale
    /// results, unlike the portfolio.
    pub fn on_error(&mut self, message: String) {
        self.scanning = false;
        self.progress = 0;
        self.result = None;
        self.error = Some(message);
        self.progress_guard = None;
    }

    pub fn scanned_address(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.contract_address.as_str())
    }

    pub fn shows_official_banner(&self) -> bool {
        self.scanned_address() == Some(OFFICIAL_WARD_TOKEN)
    }

    pub fn manually_verified(&self) -> Option<&'static ward_core::models::ManuallyVerifiedToken> {
        self.scanned_address().and_then(verified::lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ward_core::models::{TokenInfo, Verification};

    fn result_for(address: &str) -> AuditResult {
        AuditResult {
            contract_address: address.to_string(),
            overall_score: 75,
            vulnerabilities: Vec::new(),
            verification: Verification::unavailable(),
            scan_time: Utc::now(),
            token_info: TokenInfo::unknown(),
        }
    }

    #[test]
    fn test_progress_caps_at_95_until_response() {
        let mut state = ScannerState::default();
        state.begin_scan();
        for _ in 0..20 {
            state.on_progress_tick();
        }
        assert_eq!(state.progress, 95);

        state.on_result(result_for("Addr111"));
        assert_eq!(state.progress, 100);
        assert!(!state.scanning);
    }

    #[test]
    fn test_error_resets_to_empty_view() {
        let mut state = ScannerState::default();
        state.begin_scan();
        state.on_progress_tick();
        state.on_error("network down".to_string());

        assert!(state.result.is_none());
        assert_eq!(state.progress, 0);
        assert_eq!(state.error.as_deref(), Some("network down"));
    }

    #[test]
    fn test_official_banner_only_for_exact_address() {
        let mut state = ScannerState::default();
        state.on_result(result_for(OFFICIAL_WARD_TOKEN));
        assert!(state.shows_official_banner());

        state.on_result(result_for("WARDmUpYMKh6V42Uod2P1MNUcY1TCJ5RXuiUDKs8Wpf"));
        assert!(!state.shows_official_banner());
        // That address is on the manually-verified list instead.
        assert!(state.manually_verified().is_some());
    }
}
