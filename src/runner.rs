//! End-to-end run: analyze a log, print results, write the report

use crate::analyzer::{Analyzer, AppIdAnalyzer, ScreenStateAnalyzer};
use crate::browser;
use crate::cli::{AnalyzerType, Cli, OutputFormat};
use crate::csv_output::{CsvOutput, SCREEN_SECTION_TITLE};
use crate::html_output::HtmlOutput;
use crate::json_output::JsonOutput;
use crate::matcher::LineMatcher;
use crate::text_output;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Run configuration, built from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub log_file: PathBuf,
    /// CSV path; HTML and JSON reports replace its extension
    pub output: PathBuf,
    pub analyzer_type: AnalyzerType,
    pub format: OutputFormat,
    pub open_browser: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("1.log"),
            output: PathBuf::from("miwear.csv"),
            analyzer_type: AnalyzerType::All,
            format: OutputFormat::Csv,
            open_browser: false,
        }
    }
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            log_file: cli.file.clone(),
            output: cli.output.clone(),
            analyzer_type: cli.analyzer_type,
            format: cli.effective_format(),
            open_browser: cli.open_browser,
        }
    }
}

impl RunConfig {
    /// Where the report for the configured format is written
    pub fn report_path(&self) -> PathBuf {
        match self.format {
            OutputFormat::Csv => self.output.clone(),
            OutputFormat::Html => self.output.with_extension("html"),
            OutputFormat::Json => self.output.with_extension("json"),
        }
    }
}

/// What a run produced
#[derive(Debug, Default)]
pub struct RunReport {
    /// Matched app creation records, if the analyzer ran
    pub appid_records: Option<usize>,
    /// Matched screen state records, if the analyzer ran
    pub screen_records: Option<usize>,
    pub unknown_app_ids: Vec<u64>,
    /// Analyzer failures (the run continues past them)
    pub errors: Vec<String>,
    /// Files written, in order
    pub written: Vec<PathBuf>,
}

fn format_label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Csv => "CSV",
        OutputFormat::Html => "HTML",
        OutputFormat::Json => "JSON",
    }
}

fn type_label(analyzer_type: AnalyzerType) -> &'static str {
    match analyzer_type {
        AnalyzerType::Appid => "appid",
        AnalyzerType::Screen => "screen",
        AnalyzerType::All => "all",
    }
}

/// Analyze `path`; a failure is printed and recorded, leaving no records
fn analyze_file<M: LineMatcher>(
    analyzer: &mut Analyzer<M>,
    path: &Path,
    report: &mut RunReport,
) {
    if let Err(e) = analyzer.analyze(path) {
        println!("Error: {}", e);
        report.errors.push(e.to_string());
    }
}

/// Run the selected analyzers and write the configured report
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let mut report = RunReport::default();

    println!("Starting log parsing...");
    println!("Log file: {}", config.log_file.display());
    println!("Analyzer type: {}", type_label(config.analyzer_type));
    println!("Export format: {}", format_label(config.format));

    let mut appid = AppIdAnalyzer::default();
    let mut screen = ScreenStateAnalyzer::default();

    if config.analyzer_type.runs_appid() {
        println!("{}", text_output::format_section_banner("Running AppID Analyzer"));
        analyze_file(&mut appid, &config.log_file, &mut report);

        let summary = appid.summarize();
        print!("{}", text_output::format_entries(appid.records(), "on_ui_create"));
        print!("{}", text_output::format_appid_summary(&summary));

        if config.format == OutputFormat::Csv {
            if appid.is_empty() {
                println!("No data to export");
            } else {
                CsvOutput::new(appid.records()).write_to(&config.output)?;
                println!("\nResults exported to: {}", config.output.display());
                report.written.push(config.output.clone());
            }
        }

        report.unknown_app_ids = summary.unknown_app_ids();
        if let Some(note) = text_output::format_unknown_note(&report.unknown_app_ids) {
            println!("{}", note);
        }
        report.appid_records = Some(appid.len());
    }

    if config.analyzer_type.runs_screen() {
        println!("{}", text_output::format_section_banner("Running Screen State Analyzer"));
        analyze_file(&mut screen, &config.log_file, &mut report);

        let summary = screen.summarize();
        print!("{}", text_output::format_entries(screen.records(), "screen state change"));
        print!("{}", text_output::format_screen_summary(&summary));

        if config.format == OutputFormat::Csv && !screen.is_empty() {
            CsvOutput::new(screen.records()).append_section_to(&config.output, SCREEN_SECTION_TITLE)?;
            println!("\nScreen state data appended to: {}", config.output.display());
            if !report.written.contains(&config.output) {
                report.written.push(config.output.clone());
            }
        }
        report.screen_records = Some(screen.len());
    }

    let has_data = !appid.is_empty() || !screen.is_empty();
    match config.format {
        OutputFormat::Csv => {}
        _ if !has_data => println!("\nNo data to export"),
        OutputFormat::Html => {
            let path = config.report_path();
            let appid_summary = appid.summarize();
            let screen_summary = screen.summarize();

            let mut html = HtmlOutput::new();
            if config.analyzer_type.runs_appid() {
                html = html.with_appid(appid.records(), &appid_summary);
            }
            if config.analyzer_type.runs_screen() {
                html = html.with_screen(screen.records(), &screen_summary);
            }
            html.write_to(&path)?;

            println!("\nResults exported to: {}", path.display());
            println!("Open {} in your browser to view the interactive report", path.display());
            report.written.push(path.clone());

            if config.open_browser {
                println!("\nOpening {} in your browser...", path.display());
                if let Err(e) = browser::open(&path) {
                    tracing::warn!("{:#}", e);
                    println!("Could not open browser: {:#}", e);
                }
            }
        }
        OutputFormat::Json => {
            let path = config.report_path();
            let appid_summary = appid.summarize();
            let screen_summary = screen.summarize();

            let mut json = JsonOutput::new(config.log_file.display().to_string());
            if config.analyzer_type.runs_appid() {
                json = json.with_appid(appid.records(), &appid_summary);
            }
            if config.analyzer_type.runs_screen() {
                json = json.with_screen(screen.records(), &screen_summary);
            }
            json.write_to(&path)?;

            println!("\nResults exported to: {}", path.display());
            report.written.push(path);
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("Analysis complete!");
    println!("{}", "=".repeat(80));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LOG: &str = "\
[01/02 04:23:33] [59] [ap] [pagemanager] on_ui_create: create view 0x18ac02b0:{15, 5}
[01/02 05:00:00] [59] [ap] [pagemanager] on_ui_create: create view 0x18ac0300:{39321, 0}
[01/02 05:51:19] [59] [ap] [MiWearScreen] async_apply_screen_state_change: Screen state: ON-->OFF, source: TOUCH_PALM
";

    fn setup(contents: &str) -> (TempDir, RunConfig) {
        let tmp_dir = TempDir::new().unwrap();
        let log_file = tmp_dir.path().join("1.log");
        fs::write(&log_file, contents).unwrap();
        let config = RunConfig {
            log_file,
            output: tmp_dir.path().join("miwear.csv"),
            ..Default::default()
        };
        (tmp_dir, config)
    }

    #[test]
    fn test_report_path_swaps_extension() {
        let mut config = RunConfig::default();
        assert_eq!(config.report_path(), PathBuf::from("miwear.csv"));
        config.format = OutputFormat::Html;
        assert_eq!(config.report_path(), PathBuf::from("miwear.html"));
        config.format = OutputFormat::Json;
        assert_eq!(config.report_path(), PathBuf::from("miwear.json"));
    }

    #[test]
    fn test_run_csv_all() {
        let (_tmp, config) = setup(LOG);
        let report = run(&config).unwrap();

        assert_eq!(report.appid_records, Some(2));
        assert_eq!(report.screen_records, Some(1));
        assert_eq!(report.unknown_app_ids, vec![39321]);
        assert_eq!(report.written, vec![config.output.clone()]);

        let csv = fs::read_to_string(&config.output).unwrap();
        assert!(csv.starts_with("Timestamp,AppID,PageID,AppName\n01/02 04:23:33,15,5,CLOCK\n"));
        assert!(csv.contains("\n\n\nScreen State Analysis\nTimestamp,FromState,ToState,Source\n"));
    }

    #[test]
    fn test_run_missing_file_continues() {
        let tmp_dir = TempDir::new().unwrap();
        let config = RunConfig {
            log_file: tmp_dir.path().join("absent.log"),
            output: tmp_dir.path().join("miwear.csv"),
            ..Default::default()
        };

        let report = run(&config).unwrap();
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.appid_records, Some(0));
        assert_eq!(report.screen_records, Some(0));
        assert!(report.written.is_empty());
        assert!(!config.output.exists());
    }

    #[test]
    fn test_run_screen_only_csv_has_no_separator() {
        let (_tmp, mut config) = setup(LOG);
        config.analyzer_type = AnalyzerType::Screen;

        let report = run(&config).unwrap();
        assert_eq!(report.appid_records, None);

        let csv = fs::read_to_string(&config.output).unwrap();
        assert!(csv.starts_with("Screen State Analysis\n"));
    }

    #[test]
    fn test_run_html() {
        let (_tmp, mut config) = setup(LOG);
        config.format = OutputFormat::Html;

        let report = run(&config).unwrap();
        let path = config.report_path();
        assert_eq!(report.written, vec![path.clone()]);
        assert!(!config.output.exists());

        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("appid-content"));
        assert!(html.contains("screen-content"));
    }

    #[test]
    fn test_run_json_appid_only() {
        let (_tmp, mut config) = setup(LOG);
        config.format = OutputFormat::Json;
        config.analyzer_type = AnalyzerType::Appid;

        run(&config).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.report_path()).unwrap()).unwrap();
        assert_eq!(json["appid"]["summary"]["total"], 2);
        assert!(json.get("screen").is_none());
    }

    #[test]
    fn test_run_html_without_matches_writes_nothing() {
        let (_tmp, mut config) = setup("nothing to see here\n");
        config.format = OutputFormat::Html;

        let report = run(&config).unwrap();
        assert!(report.written.is_empty());
        assert!(!config.report_path().exists());
    }
}
