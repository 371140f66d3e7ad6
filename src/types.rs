/*!
 * Core types shared by the scanner, writer and reporter
 */

use std::collections::HashMap;

/// Kind of filesystem entry as seen by the traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory that may be descended into
    Directory,
    /// Symlink to a directory: matched as a directory, never descended or emitted
    LinkedDirectory,
    /// Anything else: regular files and symlinks to files
    File,
}

impl EntryKind {
    /// Whether directory-only patterns apply to the entry
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::LinkedDirectory)
    }
}

/// Information about a processed file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Counters and bookkeeping produced by a single scan
#[derive(Debug, Clone, Default)]
pub struct ScanStatistics {
    /// Number of files whose content was emitted
    pub files_processed: usize,
    /// Number of ignored entries (pruned directories count once)
    pub files_ignored: usize,
    /// Number of directories visited, the root included
    pub directories_scanned: usize,
    /// Number of patterns loaded from the ignore file
    pub patterns_loaded: usize,
    /// Total number of lines across processed files
    pub total_lines: usize,
    /// Total number of characters across processed files
    pub total_chars: usize,
    /// Relative paths of emitted files, in emission order
    pub kept: Vec<String>,
    /// Relative paths of ignored entries, in encounter order
    pub ignored: Vec<String>,
    /// Details for each emitted file, keyed by relative path
    pub file_details: HashMap<String, FileReportInfo>,
}
