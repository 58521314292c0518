//! JSON output format for analyzer results

use crate::record::{AppCreationRecord, ScreenTransitionRecord};
use crate::stats::{AppIdSummary, ScreenSummary, UnrunApp};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// App creation section of the JSON report
#[derive(Debug, Serialize)]
pub struct JsonAppIdAnalysis<'a> {
    pub records: &'a [AppCreationRecord],
    pub summary: &'a AppIdSummary,
    /// Distinct app ids with no directory entry
    pub unknown_app_ids: Vec<u64>,
    pub unrun_apps: Vec<UnrunApp>,
}

impl<'a> JsonAppIdAnalysis<'a> {
    pub fn new(records: &'a [AppCreationRecord], summary: &'a AppIdSummary) -> Self {
        Self {
            records,
            summary,
            unknown_app_ids: summary.unknown_app_ids(),
            unrun_apps: summary.unrun_apps(),
        }
    }
}

/// Screen state section of the JSON report
#[derive(Debug, Serialize)]
pub struct JsonScreenAnalysis<'a> {
    pub records: &'a [ScreenTransitionRecord],
    pub summary: &'a ScreenSummary,
}

/// Complete JSON report
#[derive(Debug, Default, Serialize)]
pub struct JsonOutput<'a> {
    /// Analyzed log file
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appid: Option<JsonAppIdAnalysis<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<JsonScreenAnalysis<'a>>,
}

impl<'a> JsonOutput<'a> {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_appid(mut self, records: &'a [AppCreationRecord], summary: &'a AppIdSummary) -> Self {
        self.appid = Some(JsonAppIdAnalysis::new(records, summary));
        self
    }

    pub fn with_screen(mut self, records: &'a [ScreenTransitionRecord], summary: &'a ScreenSummary) -> Self {
        self.screen = Some(JsonScreenAnalysis { records, summary });
        self
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize JSON report")
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write JSON file {}", path.display()))
    }
}
