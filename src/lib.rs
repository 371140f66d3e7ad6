/*!
 * dirdump - Dump a directory tree and its file contents into one text report
 *
 * Entries excluded by the root `.gitignore`, and anything inside a `.git`
 * directory, are left out of the report.
 */

pub mod config;
pub mod error;
pub mod matcher;
pub mod patterns;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{DirDumpError, Result};
pub use matcher::{fnmatch_path, Matcher};
pub use patterns::{Pattern, PatternKind, PatternSet};
pub use reader::read_file_content;
pub use report::{ReportFormat, Reporter, ScanReport};
pub use scanner::Scanner;
pub use types::{EntryKind, FileReportInfo, ScanStatistics};
pub use utils::format_file_size;
pub use writer::ReportWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
