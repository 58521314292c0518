//! CLI argument parsing for the MiWear log analyzer

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which analyzers to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalyzerType {
    /// App creation (`on_ui_create`) events only
    Appid,
    /// Screen state transitions only
    Screen,
    /// Both analyzers (default)
    All,
}

impl AnalyzerType {
    pub fn runs_appid(self) -> bool {
        matches!(self, AnalyzerType::Appid | AnalyzerType::All)
    }

    pub fn runs_screen(self) -> bool {
        matches!(self, AnalyzerType::Screen | AnalyzerType::All)
    }
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV file; screen states are appended as a second section (default)
    Csv,
    /// Interactive HTML page
    Html,
    /// JSON document for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "miwear")]
#[command(version)]
#[command(
    about = "Log analyzer for MiWear - extracts app creation and screen state events from device logs",
    long_about = None
)]
pub struct Cli {
    /// Log file path
    #[arg(short = 'f', long = "file", value_name = "PATH", default_value = "1.log")]
    pub file: PathBuf,

    /// Output file path; HTML and JSON reports swap in their own extension
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "miwear.csv")]
    pub output: PathBuf,

    /// Analyzer type
    #[arg(short = 't', long = "type", value_enum, default_value = "all")]
    pub analyzer_type: AnalyzerType,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Export results to HTML (same as --format html)
    #[arg(long = "html", conflicts_with = "format")]
    pub html: bool,

    /// Open the HTML report in the default browser after generation
    #[arg(long = "open-browser")]
    pub open_browser: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Output format after applying the `--html` shorthand
    pub fn effective_format(&self) -> OutputFormat {
        if self.html {
            OutputFormat::Html
        } else {
            self.format
        }
    }
}
