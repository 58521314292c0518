//! Typed records extracted from single log lines

use crate::app_ids;
use serde::Serialize;
use std::fmt;

/// Common view over every record kind
pub trait LogRecord {
    /// Timestamp as it appeared in the log (`MM/DD HH:MM:SS`)
    fn timestamp(&self) -> &str;

    /// The matched line with surrounding whitespace trimmed
    fn raw_line(&self) -> &str;
}

/// An `on_ui_create` event: the page manager created a view for an app page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppCreationRecord {
    pub timestamp: String,
    pub app_id: u64,
    pub page_id: u64,
    /// Directory name, or `Unknown(appid=N)` when unmapped
    pub app_name: String,
    pub raw_line: String,
}

impl AppCreationRecord {
    /// Build a record, resolving the app name through the directory
    pub fn new(timestamp: &str, app_id: u64, page_id: u64, raw_line: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            app_id,
            page_id,
            app_name: app_ids::app_name(app_id),
            raw_line: raw_line.to_string(),
        }
    }

    /// Whether the app id has a directory entry
    pub fn is_known_app(&self) -> bool {
        app_ids::is_known(self.app_id)
    }

    /// App name without the firmware's `MI_` prefix
    pub fn display_name(&self) -> &str {
        self.app_name
            .strip_prefix("MI_")
            .unwrap_or(&self.app_name)
    }
}

impl LogRecord for AppCreationRecord {
    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn raw_line(&self) -> &str {
        &self.raw_line
    }
}

impl fmt::Display for AppCreationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] App = 0x{:04X}, Page = {:2}, Name = {}",
            self.timestamp, self.app_id, self.page_id, self.app_name
        )
    }
}

/// A screen state change reported by `async_apply_screen_state_change`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenTransitionRecord {
    pub timestamp: String,
    pub from_state: String,
    pub to_state: String,
    /// What triggered the change (e.g. `TOUCH_PALM`)
    pub source: String,
    pub raw_line: String,
}

impl ScreenTransitionRecord {
    pub fn new(timestamp: &str, from_state: &str, to_state: &str, source: &str, raw_line: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            from_state: from_state.to_string(),
            to_state: to_state.to_string(),
            source: source.to_string(),
            raw_line: raw_line.to_string(),
        }
    }

    /// Grouping key for transition statistics, e.g. `ON-->OFF`
    pub fn transition(&self) -> String {
        format!("{}-->{}", self.from_state, self.to_state)
    }
}

impl LogRecord for ScreenTransitionRecord {
    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn raw_line(&self) -> &str {
        &self.raw_line
    }
}

impl fmt::Display for ScreenTransitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Screen State: {:<3} --> {:<3}, Source: {}",
            self.timestamp, self.from_state, self.to_state, self.source
        )
    }
}
