/*!
 * Console summary for dirdump
 *
 * Renders the end-of-run tables with the tabled library: the processed files
 * (largest first) and the overall scan totals.
 */

use std::collections::HashMap;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{FileReportInfo, ScanStatistics};
use crate::utils::format_file_size;

/// Above this many files only the largest ones are listed
const FILE_LIST_LIMIT: usize = 15;
const TOP_FILES: usize = 10;

/// Everything shown in the console summary
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Scanned root
    pub root: String,
    /// Output file path
    pub output_file: String,
    /// Size of the written report in bytes
    pub output_size: Option<u64>,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Number of files processed
    pub files_processed: usize,
    /// Number of ignored entries
    pub files_ignored: usize,
    /// Number of directories visited
    pub directories_scanned: usize,
    /// Number of ignore patterns loaded
    pub patterns_loaded: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Details for each file
    pub file_details: HashMap<String, FileReportInfo>,
}

impl ScanReport {
    /// Collect the report fields from a finished scan
    pub fn from_statistics(
        root: String,
        output_file: String,
        output_size: Option<u64>,
        duration: Duration,
        stats: ScanStatistics,
    ) -> Self {
        Self {
            root,
            output_file,
            output_size,
            duration,
            files_processed: stats.files_processed,
            files_ignored: stats.files_ignored,
            directories_scanned: stats.directories_scanned,
            patterns_loaded: stats.patterns_loaded,
            total_lines: stats.total_lines,
            file_details: stats.file_details,
        }
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    /// Plain lines, one metric per line
    Plain,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on scan statistics
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
            ReportFormat::Plain => self.generate_plain_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the last path segments that fit in `max_len`
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn summary_rows(&self, report: &ScanReport) -> Vec<(String, String)> {
        let mut rows = vec![
            ("📂 Scanned Root".to_string(), report.root.clone()),
            ("💾 Output File".to_string(), report.output_file.clone()),
            (
                "⏱️ Process Time".to_string(),
                format!("{:.4?}", report.duration),
            ),
            (
                "📄 Files Processed".to_string(),
                self.format_number(report.files_processed),
            ),
            (
                "🚫 Files Ignored".to_string(),
                self.format_number(report.files_ignored),
            ),
            (
                "📁 Directories".to_string(),
                self.format_number(report.directories_scanned),
            ),
            (
                "🔍 Ignore Patterns".to_string(),
                report.patterns_loaded.to_string(),
            ),
            (
                "📝 Total Lines".to_string(),
                self.format_number(report.total_lines),
            ),
        ];

        if let Some(size) = report.output_size {
            rows.push(("📦 Output Size".to_string(), format_file_size(size)));
        }

        rows
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows: Vec<SummaryRow> = self
            .summary_rows(report)
            .into_iter()
            .map(|(key, value)| SummaryRow { key, value })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a files table using the tabled crate
    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,
        }

        // Largest first, ties broken by path so the listing is stable
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(pa, a), (pb, b)| b.chars.cmp(&a.chars).then_with(|| pa.cmp(pb)));

        let files_to_show = if files.len() > FILE_LIST_LIMIT {
            &files[..TOP_FILES]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let summary_title = "✅  SCAN COMPLETE";

        if report.file_details.is_empty() {
            return format!("{}\n{}", summary_title, summary_table);
        }

        let files_table = self.create_files_table(report);
        let files_title = if report.file_details.len() > FILE_LIST_LIMIT {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  PROCESSED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }

    fn generate_plain_report(&self, report: &ScanReport) -> String {
        self.summary_rows(report)
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
