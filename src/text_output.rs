//! Human-readable console output: numbered entry listings and summaries

use crate::stats::{AppIdSummary, ScreenSummary, TimeRange};
use std::fmt::Display;

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Numbered listing of records framed by rules
///
/// `kind` names the log family, e.g. "on_ui_create" or "screen state change".
pub fn format_entries<R: Display>(records: &[R], kind: &str) -> String {
    if records.is_empty() {
        return format!("No {} logs found\n", kind);
    }

    let mut out = String::new();
    out.push_str(&format!("\nFound {} {} logs:\n\n", records.len(), kind));
    out.push_str(&rule());
    out.push('\n');
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("{:3}. {}\n", i + 1, record));
    }
    out.push_str(&rule());
    out.push('\n');
    out
}

fn format_time_range(out: &mut String, range: &TimeRange) {
    out.push_str(&format!(
        "\nTime range: {} ~ {}\n",
        range.first_or_na(),
        range.last_or_na()
    ));
}

fn format_counts<'a, K: Display + 'a>(
    out: &mut String,
    heading: &str,
    counts: impl IntoIterator<Item = (K, &'a usize)>,
) {
    out.push_str(&format!("\n{}:\n", heading));
    for (key, count) in counts {
        out.push_str(&format!("  {}: {} times\n", key, count));
    }
}

fn summary_heading() -> String {
    format!("\n\nStatistics Summary:\n{}\n", rule())
}

/// Statistics summary for app creation records; empty when nothing matched
pub fn format_appid_summary(summary: &AppIdSummary) -> String {
    if summary.total == 0 {
        return String::new();
    }

    let mut out = summary_heading();

    let named = summary.named_counts();
    format_counts(
        &mut out,
        "Statistics by App ID",
        named.iter().map(|(name, count)| (name, count)),
    );

    format_time_range(&mut out, &summary.time_range);
    out.push_str(&rule());
    out.push('\n');
    out
}

/// Statistics summary for screen state records; empty when nothing matched
pub fn format_screen_summary(summary: &ScreenSummary) -> String {
    if summary.total == 0 {
        return String::new();
    }

    let mut out = summary_heading();

    format_counts(&mut out, "Statistics by State Transition", &summary.transitions);
    format_counts(&mut out, "Statistics by Source", &summary.sources);

    format_time_range(&mut out, &summary.time_range);
    out.push_str(&rule());
    out.push('\n');
    out
}

/// Note listing app ids missing from the directory, or `None` if all are known
pub fn format_unknown_note(unknown_app_ids: &[u64]) -> Option<String> {
    if unknown_app_ids.is_empty() {
        return None;
    }
    let ids: Vec<String> = unknown_app_ids.iter().map(u64::to_string).collect();
    Some(format!(
        "\nNote: The following appids were not found in the mapping table: [{}]",
        ids.join(", ")
    ))
}

/// Heading printed before each analyzer runs
pub fn format_section_banner(title: &str) -> String {
    format!("\n{}\n{}\n{}", rule(), title, rule())
}
