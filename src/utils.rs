/*!
 * Utility functions for dirdump
 */

/// Name of the ignore file read from the scan root
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Name of the report written to the current working directory
pub const OUTPUT_FILE_NAME: &str = "directory_contents.txt";

/// Path component that is always excluded
pub const GIT_DIR_NAME: &str = ".git";

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Replace Windows separators with forward slashes
pub fn normalize_separators(s: &str) -> String {
    s.replace('\\', "/")
}

/// Horizontal rule of `width` copies of `ch`
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}
