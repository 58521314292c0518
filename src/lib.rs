//! MiWear log analyzer
//!
//! Extracts structured events from MiWear firmware log files (app page
//! creation and screen state transitions), aggregates them into summary
//! statistics, and renders CSV, JSON, console, and interactive HTML reports.

pub mod analyzer;
pub mod app_ids;
pub mod browser;
pub mod cli;
pub mod csv_output;
pub mod html_output;
pub mod json_output;
pub mod matcher;
pub mod record;
pub mod runner;
pub mod stats;
pub mod text_output;
