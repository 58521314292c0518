//! Summary statistics over analyzer records
//!
//! Summaries are pure functions of the record sequence and are recomputed
//! on demand. Group keys are kept in `BTreeMap`s so enumeration order is
//! ascending by key (numeric for app ids, lexicographic for screen labels).

use crate::app_ids;
use crate::record::{AppCreationRecord, LogRecord, ScreenTransitionRecord};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sentinel for a duration that cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Log timestamps carry no year; parse them inside this fixed one.
const IMPLICIT_YEAR: i32 = 1900;

/// First/last timestamp (by arrival order) and the elapsed time between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub first: Option<String>,
    pub last: Option<String>,
    /// `HH:MM:SS`, or `N/A`
    pub duration: String,
}

impl TimeRange {
    /// Take the first and last record timestamps without sorting
    pub fn from_records<R: LogRecord>(records: &[R]) -> Self {
        let first = records.first().map(|r| r.timestamp().to_string());
        let last = records.last().map(|r| r.timestamp().to_string());

        let duration = match (&first, &last) {
            (Some(first), Some(last)) => format_duration(first, last),
            _ => NOT_AVAILABLE.to_string(),
        };

        Self {
            first,
            last,
            duration,
        }
    }

    pub fn first_or_na(&self) -> &str {
        self.first.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn last_or_na(&self) -> &str {
        self.last.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Parse a `MM/DD HH:MM:SS` timestamp in the implicit year
///
/// Second `60` is rejected: chrono reads it as a leap second, the log never means one.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    let dated = format!("{}/{}", IMPLICIT_YEAR, timestamp);
    let parsed = NaiveDateTime::parse_from_str(&dated, "%Y/%m/%d %H:%M:%S").ok()?;
    if parsed.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(parsed)
}

/// Elapsed time from `start` to `end` as `HH:MM:SS`, or `N/A` if either
/// timestamp does not parse.
///
/// Hours are floor-divided and minutes/seconds are Euclidean remainders,
/// so a negative span (log crossing a year boundary) renders as e.g.
/// `-1:59:59`. Hours are not capped at 24.
pub fn format_duration(start: &str, end: &str) -> String {
    let (Some(start), Some(end)) = (parse_timestamp(start), parse_timestamp(end)) else {
        tracing::debug!("unparsable timestamp range {} ~ {}", start, end);
        return NOT_AVAILABLE.to_string();
    };

    let total_seconds = (end - start).num_seconds();
    let hours = total_seconds.div_euclid(3600);
    let minutes = total_seconds.rem_euclid(3600) / 60;
    let seconds = total_seconds.rem_euclid(60);

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// A directory entry that never appeared in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrunApp {
    pub app_id: u16,
    pub app_name: &'static str,
}

/// Statistics for `on_ui_create` records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppIdSummary {
    /// Creation count per app id
    pub counts: BTreeMap<u64, usize>,
    pub total: usize,
    pub time_range: TimeRange,
}

impl AppIdSummary {
    pub fn from_records(records: &[AppCreationRecord]) -> Self {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.app_id).or_insert(0) += 1;
        }

        Self {
            counts,
            total: records.len(),
            time_range: TimeRange::from_records(records),
        }
    }

    /// Number of distinct app ids seen, mapped or not
    pub fn distinct_apps(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, app_id: u64) -> usize {
        self.counts.get(&app_id).copied().unwrap_or(0)
    }

    /// Distinct app ids with no directory entry, ascending
    pub fn unknown_app_ids(&self) -> Vec<u64> {
        self.counts
            .keys()
            .copied()
            .filter(|&id| !app_ids::is_known(id))
            .collect()
    }

    /// Directory entries never observed, ordered by app name
    pub fn unrun_apps(&self) -> Vec<UnrunApp> {
        let mut unrun: Vec<UnrunApp> = app_ids::entries()
            .filter(|&(_, id)| !self.counts.contains_key(&u64::from(id)))
            .map(|(app_name, app_id)| UnrunApp { app_id, app_name })
            .collect();
        unrun.sort_by(|a, b| a.app_name.cmp(b.app_name));
        unrun
    }

    /// `(name, count)` pairs in ascending app id order
    pub fn named_counts(&self) -> Vec<(String, usize)> {
        self.counts
            .iter()
            .map(|(&id, &count)| (app_ids::app_name(id), count))
            .collect()
    }
}

/// Statistics for screen state transition records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenSummary {
    /// Count per `FROM-->TO` label
    pub transitions: BTreeMap<String, usize>,
    /// Count per trigger source
    pub sources: BTreeMap<String, usize>,
    /// Count per target state
    pub to_states: BTreeMap<String, usize>,
    pub total: usize,
    pub time_range: TimeRange,
}

impl ScreenSummary {
    pub fn from_records(records: &[ScreenTransitionRecord]) -> Self {
        let mut transitions = BTreeMap::new();
        let mut sources = BTreeMap::new();
        let mut to_states = BTreeMap::new();

        for record in records {
            *transitions.entry(record.transition()).or_insert(0) += 1;
            *sources.entry(record.source.clone()).or_insert(0) += 1;
            *to_states.entry(record.to_state.clone()).or_insert(0) += 1;
        }

        Self {
            transitions,
            sources,
            to_states,
            total: records.len(),
            time_range: TimeRange::from_records(records),
        }
    }

    pub fn transition_count(&self, from_state: &str, to_state: &str) -> usize {
        let key = format!("{}-->{}", from_state, to_state);
        self.transitions.get(&key).copied().unwrap_or(0)
    }

    pub fn source_count(&self, source: &str) -> usize {
        self.sources.get(source).copied().unwrap_or(0)
    }

    /// Transitions that turned the screen on
    pub fn on_count(&self) -> usize {
        self.to_states.get("ON").copied().unwrap_or(0)
    }

    /// Transitions that turned the screen off
    pub fn off_count(&self) -> usize {
        self.to_states.get("OFF").copied().unwrap_or(0)
    }
}
