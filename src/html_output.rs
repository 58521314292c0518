//! HTML report with one tab per analyzer
//!
//! The document is assembled piece by piece and every value taken from the
//! log is escaped, so crafted log lines cannot inject markup or script.

use crate::app_ids;
use crate::record::{AppCreationRecord, LogRecord, ScreenTransitionRecord};
use crate::stats::{AppIdSummary, ScreenSummary, TimeRange};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// App creation data for the report
#[derive(Debug, Clone, Copy)]
pub struct HtmlAppIdSection<'a> {
    pub records: &'a [AppCreationRecord],
    pub summary: &'a AppIdSummary,
}

/// Screen state data for the report
#[derive(Debug, Clone, Copy)]
pub struct HtmlScreenSection<'a> {
    pub records: &'a [ScreenTransitionRecord],
    pub summary: &'a ScreenSummary,
}

/// HTML output formatter
#[derive(Debug, Default)]
pub struct HtmlOutput<'a> {
    appid: Option<HtmlAppIdSection<'a>>,
    screen: Option<HtmlScreenSection<'a>>,
}

impl<'a> HtmlOutput<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appid(mut self, records: &'a [AppCreationRecord], summary: &'a AppIdSummary) -> Self {
        self.appid = Some(HtmlAppIdSection { records, summary });
        self
    }

    pub fn with_screen(mut self, records: &'a [ScreenTransitionRecord], summary: &'a ScreenSummary) -> Self {
        self.screen = Some(HtmlScreenSection { records, summary });
        self
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        * {
            box-sizing: border-box;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
        }
        .container {
            max-width: 1400px;
            margin: 0 auto;
            background: white;
            border-radius: 12px;
            box-shadow: 0 10px 40px rgba(0,0,0,0.2);
            overflow: hidden;
        }
        .header {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 30px;
            text-align: center;
        }
        .header h1 {
            margin: 0 0 10px 0;
        }
        .header p {
            margin: 0;
            opacity: 0.9;
        }
        .tabs {
            display: flex;
            background: #f8f9fa;
            border-bottom: 2px solid #dee2e6;
        }
        .tab {
            padding: 15px 30px;
            cursor: pointer;
            font-weight: 600;
            color: #6c757d;
        }
        .tab:hover {
            background: #e9ecef;
        }
        .tab.active {
            color: #667eea;
            border-bottom: 3px solid #667eea;
            background: white;
        }
        .tab-content {
            display: none;
            padding: 30px;
        }
        .tab-content.active {
            display: block;
        }
        .stats {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin-bottom: 30px;
        }
        .stat-card {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 20px;
            border-radius: 10px;
            text-align: center;
        }
        .stat-card h3 {
            margin: 0 0 5px 0;
            font-size: 1.6em;
        }
        .stat-card p {
            margin: 0;
            opacity: 0.9;
        }
        .table-container {
            overflow-x: auto;
        }
        table {
            width: 100%;
            border-collapse: collapse;
        }
        th {
            background: #667eea;
            color: white;
            padding: 12px;
            text-align: left;
            text-transform: uppercase;
            font-size: 0.85em;
        }
        td {
            padding: 10px 12px;
            border-bottom: 1px solid #dee2e6;
        }
        tbody tr:hover {
            background: #f1f3ff;
        }
        .appid, .pageid {
            font-family: monospace;
        }
        .appname {
            font-weight: 600;
            color: #495057;
        }
        .state-on {
            color: #28a745;
            font-weight: bold;
        }
        .state-off {
            color: #dc3545;
            font-weight: bold;
        }
        .source {
            font-family: monospace;
            color: #6c757d;
        }
        .search-box {
            margin-bottom: 20px;
        }
        .search-box input {
            width: 100%;
            padding: 12px;
            border: 2px solid #dee2e6;
            border-radius: 8px;
            font-size: 1em;
        }
        .search-box input:focus {
            outline: none;
            border-color: #667eea;
        }
        .search-result {
            margin-top: 8px;
            color: #667eea;
        }
        .unrun-section {
            margin-bottom: 30px;
        }
        .unrun-table {
            table-layout: fixed;
        }
        .unrun-table th {
            background: #adb5bd;
        }
        .footer {
            text-align: center;
            padding: 20px;
            color: #6c757d;
            font-size: 0.9em;
        }
        "#
    }

    /// Tab switching, table search and click-to-sort headers
    fn generate_script() -> &'static str {
        r#"
        function switchTab(tabName, tab) {
            document.querySelectorAll('.tab-content').forEach(function(content) {
                content.classList.remove('active');
            });
            document.querySelectorAll('.tab').forEach(function(t) {
                t.classList.remove('active');
            });
            document.getElementById(tabName + '-content').classList.add('active');
            tab.classList.add('active');
        }

        function filterTable(inputId, tableId, resultId) {
            var filter = document.getElementById(inputId).value.toUpperCase();
            var rows = document.getElementById(tableId).querySelectorAll('tbody tr');
            var visibleCount = 0;
            rows.forEach(function(row) {
                var found = row.textContent.toUpperCase().indexOf(filter) > -1;
                row.style.display = found ? '' : 'none';
                if (found) {
                    visibleCount++;
                }
            });
            var resultDiv = document.getElementById(resultId);
            if (filter.length > 0) {
                resultDiv.style.display = 'block';
                resultDiv.textContent = 'Found ' + visibleCount + ' matched';
            } else {
                resultDiv.style.display = 'none';
            }
        }

        var sortDirection = {};
        document.querySelectorAll('table.sortable th').forEach(function(th, index) {
            if (th.cellIndex === 0) {
                return;
            }
            th.style.cursor = 'pointer';
            th.onclick = function() {
                var table = th.closest('table');
                var rows = Array.from(table.querySelectorAll('tbody tr'));
                var col = th.cellIndex;
                sortDirection[index] = !sortDirection[index];
                rows.sort(function(a, b) {
                    var aVal = a.children[col].textContent.trim();
                    var bVal = b.children[col].textContent.trim();
                    return sortDirection[index] ? aVal.localeCompare(bVal) : bVal.localeCompare(aVal);
                });
                var body = table.querySelector('tbody');
                rows.forEach(function(row) {
                    body.appendChild(row);
                });
            };
        });
        "#
    }

    /// Stat card; `value` is already-escaped markup
    fn stat_card(value: &str, label: &str) -> String {
        format!(
            "                <div class=\"stat-card\"><h3>{}</h3><p>{}</p></div>\n",
            value,
            Self::escape_html(label)
        )
    }

    fn time_range_card(range: &TimeRange) -> String {
        let value = format!(
            "{}<br>{}",
            Self::escape_html(range.first_or_na()),
            Self::escape_html(range.last_or_na())
        );
        Self::stat_card(&value, &format!("Time Range (Total Run: {})", range.duration))
    }

    fn search_box(input_id: &str, table_id: &str, result_id: &str, placeholder: &str) -> String {
        format!(
            "            <div class=\"search-box\">\n\
             \x20               <input type=\"text\" id=\"{input_id}\" placeholder=\"{placeholder}\" onkeyup=\"filterTable('{input_id}', '{table_id}', '{result_id}')\">\n\
             \x20               <div id=\"{result_id}\" class=\"search-result\" style=\"display: none;\"></div>\n\
             \x20           </div>\n"
        )
    }

    /// Table header row from column names
    fn generate_header(columns: &[&str]) -> String {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| format!("<th>{}</th>", Self::escape_html(c)))
            .collect();
        format!("<tr>{}</tr>", cells.join(""))
    }

    /// Opening `<tr>` carrying the full log line as its hover title
    fn open_row<R: LogRecord>(record: &R) -> String {
        format!("<tr title=\"{}\">", Self::escape_html(record.raw_line()))
    }

    fn format_app_row(index: usize, record: &AppCreationRecord) -> String {
        format!(
            "{}<td>{}</td><td>{}</td><td><span class=\"appid\">0x{:04X}</span></td><td><span class=\"pageid\">{}</span></td><td><span class=\"appname\">{}</span></td></tr>",
            Self::open_row(record),
            index,
            Self::escape_html(&record.timestamp),
            record.app_id,
            record.page_id,
            Self::escape_html(&record.app_name)
        )
    }

    fn state_class(state: &str) -> &'static str {
        if state == "ON" {
            "state-on"
        } else {
            "state-off"
        }
    }

    fn format_screen_row(index: usize, record: &ScreenTransitionRecord) -> String {
        format!(
            "{}<td>{}</td><td>{}</td><td><span class=\"{}\">{}</span></td><td><span class=\"{}\">{}</span></td><td><span class=\"source\">{}</span></td></tr>",
            Self::open_row(record),
            index,
            Self::escape_html(&record.timestamp),
            Self::state_class(&record.from_state),
            Self::escape_html(&record.from_state),
            Self::state_class(&record.to_state),
            Self::escape_html(&record.to_state),
            Self::escape_html(&record.source)
        )
    }

    fn render_unrun_apps(summary: &AppIdSummary) -> String {
        let unrun = summary.unrun_apps();
        let mut html = String::new();

        html.push_str("            <div class=\"unrun-section\">\n");
        html.push_str(&format!(
            "                <h3>Unrun Applications ({})</h3>\n",
            unrun.len()
        ));
        html.push_str("                <table class=\"unrun-table\">\n");
        html.push_str("                    <thead>");
        html.push_str(&Self::generate_header(&["#", "AppID", "App Name"]));
        html.push_str("</thead>\n");
        html.push_str("                    <tbody>\n");
        for (i, app) in unrun.iter().enumerate() {
            html.push_str(&format!(
                "                        <tr><td class=\"index\">{}</td><td class=\"appid\">0x{:04X}</td><td class=\"appname\">{}</td></tr>\n",
                i + 1,
                app.app_id,
                Self::escape_html(app.app_name)
            ));
        }
        html.push_str("                    </tbody>\n");
        html.push_str("                </table>\n");
        html.push_str("            </div>\n");

        html
    }

    fn render_appid_tab(section: &HtmlAppIdSection<'_>, active: bool) -> String {
        let summary = section.summary;
        let mut html = String::new();

        html.push_str(&format!(
            "        <div id=\"appid-content\" class=\"tab-content{}\">\n",
            if active { " active" } else { "" }
        ));
        html.push_str(&Self::render_unrun_apps(summary));

        html.push_str("            <div class=\"stats\">\n");
        html.push_str(&Self::stat_card(&summary.total.to_string(), "Total"));
        html.push_str(&Self::stat_card(
            &format!("{} / {}", summary.distinct_apps(), app_ids::len()),
            "Run Apps: Run / Total",
        ));
        html.push_str(&Self::time_range_card(&summary.time_range));
        html.push_str("            </div>\n");

        html.push_str(&Self::search_box(
            "searchAppid",
            "appidTable",
            "searchResultAppid",
            "Search by AppID, PageID, or App Name...",
        ));

        html.push_str("            <div class=\"table-container\">\n");
        html.push_str("                <table id=\"appidTable\" class=\"sortable\">\n");
        html.push_str("                    <thead>");
        html.push_str(&Self::generate_header(&[
            "#",
            "Timestamps",
            "AppID",
            "PageID",
            "App Name",
        ]));
        html.push_str("</thead>\n");
        html.push_str("                    <tbody>\n");
        for (i, record) in section.records.iter().enumerate() {
            html.push_str("                        ");
            html.push_str(&Self::format_app_row(i + 1, record));
            html.push('\n');
        }
        html.push_str("                    </tbody>\n");
        html.push_str("                </table>\n");
        html.push_str("            </div>\n");
        html.push_str("        </div>\n");

        html
    }

    fn render_screen_tab(section: &HtmlScreenSection<'_>, active: bool) -> String {
        let summary = section.summary;
        let mut html = String::new();

        html.push_str(&format!(
            "        <div id=\"screen-content\" class=\"tab-content{}\">\n",
            if active { " active" } else { "" }
        ));

        html.push_str("            <div class=\"stats\">\n");
        html.push_str(&Self::stat_card(&summary.total.to_string(), "Total"));
        html.push_str(&Self::stat_card(
            &format!("{} / {}", summary.on_count(), summary.off_count()),
            "ON / OFF",
        ));
        html.push_str(&Self::time_range_card(&summary.time_range));
        html.push_str("            </div>\n");

        html.push_str(&Self::search_box(
            "searchScreen",
            "screenTable",
            "searchResultScreen",
            "Search by state or source...",
        ));

        html.push_str("            <div class=\"table-container\">\n");
        html.push_str("                <table id=\"screenTable\" class=\"sortable\">\n");
        html.push_str("                    <thead>");
        html.push_str(&Self::generate_header(&["#", "Timestamps", "From", "To", "Source"]));
        html.push_str("</thead>\n");
        html.push_str("                    <tbody>\n");
        for (i, record) in section.records.iter().enumerate() {
            html.push_str("                        ");
            html.push_str(&Self::format_screen_row(i + 1, record));
            html.push('\n');
        }
        html.push_str("                    </tbody>\n");
        html.push_str("                </table>\n");
        html.push_str("            </div>\n");
        html.push_str("        </div>\n");

        html
    }

    fn render_tabs(&self) -> String {
        let mut tabs = Vec::new();
        if self.appid.is_some() {
            tabs.push(("appid", "AppID Analysis"));
        }
        if self.screen.is_some() {
            tabs.push(("screen", "Screen State"));
        }

        let mut html = String::from("        <div class=\"tabs\">\n");
        for (i, (id, label)) in tabs.iter().enumerate() {
            html.push_str(&format!(
                "            <div class=\"tab{}\" onclick=\"switchTab('{}', this)\">{}</div>\n",
                if i == 0 { " active" } else { "" },
                id,
                label
            ));
        }
        html.push_str("        </div>\n");
        html
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>Log Analysis - MiWear</title>\n");
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <div class=\"container\">\n");
        html.push_str("        <div class=\"header\">\n");
        html.push_str("            <h1>Log Analysis - MiWear</h1>\n");
        html.push_str("            <p>Interactive visualization of log data</p>\n");
        html.push_str("        </div>\n");

        html.push_str(&self.render_tabs());

        if let Some(section) = &self.appid {
            html.push_str(&Self::render_appid_tab(section, true));
        }
        if let Some(section) = &self.screen {
            html.push_str(&Self::render_screen_tab(section, self.appid.is_none()));
        }

        html.push_str("        <div class=\"footer\">\n");
        html.push_str("            Generated by MiWear Log Analyzer | Click on table headers to sort\n");
        html.push_str("        </div>\n");
        html.push_str("    </div>\n");

        html.push_str("    <script>");
        html.push_str(Self::generate_script());
        html.push_str("</script>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_html())
            .with_context(|| format!("Failed to write HTML file {}", path.display()))
    }
}
