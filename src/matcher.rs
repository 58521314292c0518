//! Line matchers for the supported log event families
//!
//! Each matcher recognizes exactly one line format. A line that does not
//! match is not an error: `match_line` returns `None` and the analyzer moves on.

use crate::record::{AppCreationRecord, LogRecord, ScreenTransitionRecord};
use crate::stats::{AppIdSummary, ScreenSummary};
use regex::Regex;
use std::sync::LazyLock;

/// `[01/02 04:23:33] [59] [ap] [pagemanager] on_ui_create: create view 0x18ac02b0:{15, 5}`
static APP_CREATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[([0-9]{2}/[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\].*on_ui_create: create view 0x[0-9a-fA-F]+:\{([0-9]+),\s*([0-9]+)\}",
    )
    .expect("Invalid app creation regex pattern")
});

/// `[01/02 05:51:19] [59] [ap] [MiWearScreen] async_apply_screen_state_change: Screen state: ON-->OFF, source: TOUCH_PALM`
static SCREEN_STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[([0-9]{2}/[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\].*async_apply_screen_state_change: Screen state: (\w+)-->(\w+), source: (\w+)",
    )
    .expect("Invalid screen state regex pattern")
});

/// A stateless recognizer for one log line format
pub trait LineMatcher {
    type Record: LogRecord;
    type Summary;

    /// Short name used in logs and console headings
    fn name(&self) -> &'static str;

    /// Extract a record from `line`, or `None` if the line is not of this kind
    fn match_line(&self, line: &str) -> Option<Self::Record>;

    /// Aggregate records (in arrival order) into summary statistics
    fn summarize(&self, records: &[Self::Record]) -> Self::Summary;
}

/// Matches `on_ui_create` view creation lines
#[derive(Debug, Clone, Copy, Default)]
pub struct AppCreationMatcher;

impl LineMatcher for AppCreationMatcher {
    type Record = AppCreationRecord;
    type Summary = AppIdSummary;

    fn name(&self) -> &'static str {
        "AppIDAnalyzer"
    }

    fn match_line(&self, line: &str) -> Option<AppCreationRecord> {
        let caps = APP_CREATION_RE.captures(line)?;

        // Digits-only captures can still overflow u64
        let (app_id, page_id) = match (caps[2].parse::<u64>(), caps[3].parse::<u64>()) {
            (Ok(app_id), Ok(page_id)) => (app_id, page_id),
            _ => {
                tracing::debug!("on_ui_create ids out of range: {}", line.trim());
                return None;
            }
        };

        Some(AppCreationRecord::new(&caps[1], app_id, page_id, line.trim()))
    }

    fn summarize(&self, records: &[AppCreationRecord]) -> AppIdSummary {
        AppIdSummary::from_records(records)
    }
}

/// Matches `async_apply_screen_state_change` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenStateMatcher;

impl LineMatcher for ScreenStateMatcher {
    type Record = ScreenTransitionRecord;
    type Summary = ScreenSummary;

    fn name(&self) -> &'static str {
        "ScreenStateAnalyzer"
    }

    fn match_line(&self, line: &str) -> Option<ScreenTransitionRecord> {
        let caps = SCREEN_STATE_RE.captures(line)?;
        Some(ScreenTransitionRecord::new(
            &caps[1],
            &caps[2],
            &caps[3],
            &caps[4],
            line.trim(),
        ))
    }

    fn summarize(&self, records: &[ScreenTransitionRecord]) -> ScreenSummary {
        ScreenSummary::from_records(records)
    }
}
