/*!
 * Text report writer for dirdump
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::error::{Result, ResultExt};
use crate::types::ScanStatistics;
use crate::utils::rule;

const TITLE_RULE: usize = 80;
const DIRECTORY_RULE: usize = 60;
const FILE_RULE: usize = 40;

/// Writes the flat text report, section by section, as the scan proceeds
pub struct ReportWriter<W: Write> {
    out: W,
}

impl ReportWriter<BufWriter<File>> {
    /// Create (or truncate) the report file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Title block naming the scanned root
    pub fn write_header(&mut self, root: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "Directory Structure and File Contents for: {}",
            root.display()
        )?;
        writeln!(self.out, "Generated: {}", Local::now().to_rfc3339())?;
        writeln!(self.out, "{}", rule('=', TITLE_RULE))?;
        writeln!(self.out)
    }

    /// Section header for a directory below the root
    pub fn write_directory(&mut self, relative_path: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "📁 DIRECTORY: {}", relative_path)?;
        writeln!(self.out, "{}", rule('-', DIRECTORY_RULE))
    }

    /// One file block: name, absolute path, then the content
    pub fn write_file(&mut self, name: &str, path: &Path, content: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "📄 FILE: {}", name)?;
        writeln!(self.out, "📍 Path: {}", path.display())?;
        writeln!(self.out, "{}", rule('-', FILE_RULE))?;

        self.out.write_all(content.as_bytes())?;
        if !content.is_empty() && !content.ends_with('\n') {
            writeln!(self.out)?;
        }

        writeln!(self.out, "{}", rule('-', FILE_RULE))?;
        writeln!(self.out)
    }

    /// Trailing totals
    pub fn write_summary(&mut self, stats: &ScanStatistics) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out)?;
        writeln!(self.out, "SUMMARY:")?;
        writeln!(self.out, "Total files processed: {}", stats.files_processed)?;
        writeln!(self.out, "Total files ignored: {}", stats.files_ignored)
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
