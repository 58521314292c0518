//! CSV output format for analyzer records
//!
//! App creation records go to a fresh file; screen state records are
//! appended to the same file as a titled section.

use crate::record::{AppCreationRecord, ScreenTransitionRecord};
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Title line of the appended screen state section
pub const SCREEN_SECTION_TITLE: &str = "Screen State Analysis";

/// A record that can be rendered as one CSV row
pub trait CsvRecord {
    /// Column names, in field order
    const COLUMNS: &'static [&'static str];

    /// Unescaped field values, in column order
    fn csv_fields(&self) -> Vec<String>;
}

impl CsvRecord for AppCreationRecord {
    const COLUMNS: &'static [&'static str] = &["Timestamp", "AppID", "PageID", "AppName"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.app_id.to_string(),
            self.page_id.to_string(),
            self.display_name().to_string(),
        ]
    }
}

impl CsvRecord for ScreenTransitionRecord {
    const COLUMNS: &'static [&'static str] = &["Timestamp", "FromState", "ToState", "Source"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.from_state.clone(),
            self.to_state.clone(),
            self.source.clone(),
        ]
    }
}

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput<'a, R: CsvRecord> {
    records: &'a [R],
}

impl<'a, R: CsvRecord> CsvOutput<'a, R> {
    pub fn new(records: &'a [R]) -> Self {
        Self { records }
    }

    /// Generate CSV header row
    fn header(&self) -> String {
        R::COLUMNS.join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format a record as CSV row
    fn format_record(&self, record: &R) -> String {
        record
            .csv_fields()
            .iter()
            .map(|f| Self::escape_field(f))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for record in self.records {
            output.push_str(&self.format_record(record));
            output.push('\n');
        }

        output
    }

    /// CSV output preceded by a title line
    pub fn to_section(&self, title: &str) -> String {
        format!("{}\n{}", title, self.to_csv())
    }

    /// Write the CSV to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv())
            .with_context(|| format!("Failed to write CSV file {}", path.display()))
    }

    /// Append a titled section to `path`, separated by a blank line when the
    /// file already exists
    pub fn append_section_to(&self, path: &Path, title: &str) -> Result<()> {
        let file_exists = path.exists();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open CSV file {}", path.display()))?;

        let mut chunk = String::new();
        if file_exists {
            chunk.push_str("\n\n");
        }
        chunk.push_str(&self.to_section(title));

        file.write_all(chunk.as_bytes())
            .with_context(|| format!("Failed to append to CSV file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn apps() -> Vec<AppCreationRecord> {
        vec![
            AppCreationRecord::new("01/02 04:23:33", 15, 5, "raw"),
            AppCreationRecord::new("01/02 04:24:00", 0x9999, 0, "raw"),
        ]
    }

    fn screens() -> Vec<ScreenTransitionRecord> {
        vec![ScreenTransitionRecord::new(
            "01/02 05:51:19",
            "ON",
            "OFF",
            "TOUCH_PALM",
            "raw",
        )]
    }

    #[test]
    fn test_csv_app_header() {
        let records = apps();
        let output = CsvOutput::new(&records);
        assert_eq!(output.header(), "Timestamp,AppID,PageID,AppName");
    }

    #[test]
    fn test_csv_screen_header() {
        let records = screens();
        let output = CsvOutput::new(&records);
        assert_eq!(output.header(), "Timestamp,FromState,ToState,Source");
    }

    #[test]
    fn test_csv_escape_field_simple() {
        assert_eq!(CsvOutput::<AppCreationRecord>::escape_field("CLOCK"), "CLOCK");
    }

    #[test]
    fn test_csv_escape_field_with_comma() {
        assert_eq!(
            CsvOutput::<AppCreationRecord>::escape_field("a,b"),
            "\"a,b\""
        );
    }

    #[test]
    fn test_csv_escape_field_with_quote() {
        assert_eq!(
            CsvOutput::<AppCreationRecord>::escape_field("say \"hi\""),
            "\"say \"\"hi\"\"\""
        );
    }

    #[test]
    fn test_csv_app_rows() {
        let records = apps();
        let csv = CsvOutput::new(&records).to_csv();
        assert_eq!(
            csv,
            "Timestamp,AppID,PageID,AppName\n\
             01/02 04:23:33,15,5,CLOCK\n\
             01/02 04:24:00,39321,0,Unknown(appid=39321)\n"
        );
    }

    #[test]
    fn test_csv_strips_mi_prefix() {
        let mut records = apps();
        records[0].app_name = "MI_CLOCK".to_string();
        let csv = CsvOutput::new(&records).to_csv();
        assert!(csv.contains("01/02 04:23:33,15,5,CLOCK\n"));
    }

    #[test]
    fn test_csv_screen_section() {
        let records = screens();
        let section = CsvOutput::new(&records).to_section(SCREEN_SECTION_TITLE);
        assert_eq!(
            section,
            "Screen State Analysis\n\
             Timestamp,FromState,ToState,Source\n\
             01/02 05:51:19,ON,OFF,TOUCH_PALM\n"
        );
    }

    #[test]
    fn test_csv_write_then_append() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("miwear.csv");
        let app_records = apps();
        let screen_records = screens();

        CsvOutput::new(&app_records).write_to(&path).unwrap();
        CsvOutput::new(&screen_records)
            .append_section_to(&path, SCREEN_SECTION_TITLE)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Timestamp,AppID,PageID,AppName\n"));
        assert!(contents.contains("Unknown(appid=39321)\n\n\nScreen State Analysis\n"));
        assert!(contents.ends_with("01/02 05:51:19,ON,OFF,TOUCH_PALM\n"));
    }

    #[test]
    fn test_csv_append_to_new_file_has_no_separator() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("screen.csv");
        let records = screens();

        CsvOutput::new(&records)
            .append_section_to(&path, SCREEN_SECTION_TITLE)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Screen State Analysis\n"));
    }
}
