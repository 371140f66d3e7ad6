/*!
 * Directory traversal and report emission
 */

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Result;
use crate::matcher::Matcher;
use crate::patterns::PatternSet;
use crate::reader::read_file_content;
use crate::types::{EntryKind, FileReportInfo, ScanStatistics};
use crate::writer::ReportWriter;

/// Depth-first scanner that writes every kept file into a report
pub struct Scanner {
    /// Canonical scan root
    root: PathBuf,
    /// Ignore decisions for entries under `root`
    matcher: Matcher,
    /// Absolute path of the report, skipped if it lies inside the tree
    output_path: Option<PathBuf>,
    /// Progress display
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a scanner for `config.target_dir`, loading its ignore file
    pub fn new(config: &Config, progress: Arc<ProgressBar>) -> Result<Self> {
        let root = fs::canonicalize(&config.target_dir)?;
        let patterns = PatternSet::load(&root);
        Ok(Self::with_patterns(root, patterns, &config.output_file, progress))
    }

    /// Create a scanner with an explicit pattern set; `root` must be absolute
    pub fn with_patterns(
        root: PathBuf,
        patterns: PatternSet,
        output_file: &Path,
        progress: Arc<ProgressBar>,
    ) -> Self {
        Self {
            output_path: resolve_output_path(output_file),
            matcher: Matcher::new(root.clone(), patterns),
            root,
            progress,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Walk the tree and write the full report, header to summary
    pub fn scan<W: Write>(&self, writer: &mut ReportWriter<W>) -> Result<ScanStatistics> {
        let mut stats = ScanStatistics {
            patterns_loaded: self.matcher.patterns().len(),
            ..Default::default()
        };

        writer.write_header(&self.root)?;
        self.scan_directory(&self.root, writer, &mut stats)?;
        writer.write_summary(&stats)?;

        Ok(stats)
    }

    /// Emit one directory: prune its ignored subdirectories, write its own
    /// header and files, then descend into the subdirectories that remain.
    fn scan_directory<W: Write>(
        &self,
        dir: &Path,
        writer: &mut ReportWriter<W>,
        stats: &mut ScanStatistics,
    ) -> Result<()> {
        stats.directories_scanned += 1;

        let (dirs, files): (Vec<_>, Vec<_>) = self
            .list_children(dir)?
            .into_iter()
            .map(|e| (entry_kind(&e), e))
            .partition(|(kind, _)| kind.is_dir());

        self.progress
            .set_message(format!("Scanning: {} ({} files)", dir.display(), files.len()));

        let mut kept_dirs = Vec::with_capacity(dirs.len());
        for (kind, entry) in dirs {
            if self.matcher.is_ignored(entry.path(), true) {
                self.record_ignored(entry.path(), stats);
            } else if kind == EntryKind::LinkedDirectory {
                debug!(path = %entry.path().display(), "not following directory symlink");
            } else {
                kept_dirs.push(entry);
            }
        }

        let rel = self.display_path(dir);
        if rel != "." {
            writer.write_directory(&rel)?;
        }

        for (_, entry) in files {
            let path = entry.path();
            if self.is_output_file(path) {
                debug!(path = %path.display(), "skipping the report file");
                continue;
            }
            if self.matcher.is_ignored(path, false) {
                self.record_ignored(path, stats);
                continue;
            }
            self.process_file(path, writer, stats)?;
        }

        for entry in kept_dirs {
            self.scan_directory(entry.path(), writer, stats)?;
        }

        Ok(())
    }

    /// Immediate children of `dir` in file-name order.
    ///
    /// Failing to list the root is fatal; below the root, unreadable
    /// directories and entries are logged and skipped.
    fn list_children(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let mut children = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => children.push(entry),
                Err(e) if dir == self.root.as_path() => return Err(e.into()),
                Err(e) => warn!("Error listing {}: {}", dir.display(), e),
            }
        }
        Ok(children)
    }

    /// Read one kept file and append it to the report
    fn process_file<W: Write>(
        &self,
        path: &Path,
        writer: &mut ReportWriter<W>,
        stats: &mut ScanStatistics,
    ) -> Result<()> {
        self.progress.inc(1);

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.progress.set_message(format!("Reading: {}", file_name));

        let content = read_file_content(path);
        writer.write_file(&file_name, path, &content)?;

        let info = FileReportInfo {
            lines: content.lines().count(),
            chars: content.chars().count(),
        };
        let rel = self.display_path(path);

        stats.files_processed += 1;
        stats.total_lines += info.lines;
        stats.total_chars += info.chars;
        stats.file_details.insert(rel.clone(), info);
        stats.kept.push(rel);

        Ok(())
    }

    fn record_ignored(&self, path: &Path, stats: &mut ScanStatistics) {
        stats.files_ignored += 1;
        stats.ignored.push(self.display_path(path));
    }

    /// Relative path when resolvable, otherwise the path as given
    fn display_path(&self, path: &Path) -> String {
        self.matcher
            .relative_path(path)
            .unwrap_or_else(|_| path.display().to_string())
    }

    fn is_output_file(&self, path: &Path) -> bool {
        self.output_path.as_deref() == Some(path)
    }
}

/// Classify an entry without following symlinks for descent
fn entry_kind(entry: &DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_symlink() && entry.path().is_dir() {
        EntryKind::LinkedDirectory
    } else {
        EntryKind::File
    }
}

/// Absolute form of the report path with its parent directory canonicalized
fn resolve_output_path(output_file: &Path) -> Option<PathBuf> {
    let absolute = if output_file.is_absolute() {
        output_file.to_path_buf()
    } else {
        env::current_dir().ok()?.join(output_file)
    };
    let file_name = absolute.file_name()?.to_owned();
    let parent = fs::canonicalize(absolute.parent()?).ok()?;
    Some(parent.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Pattern;
    use tempfile::tempdir;

    fn scanner_for(root: &Path, patterns: &[&str]) -> Scanner {
        let root = fs::canonicalize(root).unwrap();
        let set = patterns.iter().map(|p| Pattern::new(*p)).collect();
        Scanner::with_patterns(
            root,
            set,
            Path::new("/nonexistent/report.txt"),
            Arc::new(ProgressBar::hidden()),
        )
    }

    fn run(scanner: &Scanner) -> (ScanStatistics, String) {
        let mut writer = ReportWriter::new(Vec::new());
        let stats = scanner.scan(&mut writer).unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        (stats, out)
    }

    #[test]
    fn test_files_before_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a").join("inner.txt"), "inner").unwrap();
        fs::write(dir.path().join("z.txt"), "top").unwrap();

        let (stats, out) = run(&scanner_for(dir.path(), &[]));
        assert_eq!(stats.kept, vec!["z.txt", "a/inner.txt"]);
        assert_eq!(stats.directories_scanned, 2);

        let top = out.find("📄 FILE: z.txt").unwrap();
        let header = out.find("📁 DIRECTORY: a").unwrap();
        let inner = out.find("📄 FILE: inner.txt").unwrap();
        assert!(top < header && header < inner);
    }

    #[test]
    fn test_pruned_directory_counts_once() {
        let dir = tempdir().unwrap();
        let deps = dir.path().join("deps");
        fs::create_dir_all(deps.join("nested")).unwrap();
        fs::write(deps.join("one.txt"), "1").unwrap();
        fs::write(deps.join("nested").join("two.txt"), "2").unwrap();
        fs::write(dir.path().join("keep.txt"), "keep").unwrap();

        let (stats, out) = run(&scanner_for(dir.path(), &["deps/"]));
        assert_eq!(stats.files_ignored, 1);
        assert_eq!(stats.ignored, vec!["deps"]);
        assert_eq!(stats.kept, vec!["keep.txt"]);
        assert!(!out.contains("DIRECTORY: deps"));
        assert!(!out.contains("one.txt"));
    }

    #[test]
    fn test_ignored_files_are_counted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app.log"), "noise").unwrap();
        fs::write(dir.path().join("app.rs"), "fn main() {}").unwrap();

        let (stats, out) = run(&scanner_for(dir.path(), &[".log"]));
        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.files_ignored, 1);
        assert!(out.contains("fn main() {}"));
        assert!(!out.contains("noise"));
        assert!(out.ends_with("Total files processed: 1\nTotal files ignored: 1\n"));
    }

    #[test]
    fn test_statistics_track_lines_and_chars() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("two.txt"), "ab\ncd\n").unwrap();

        let (stats, _) = run(&scanner_for(dir.path(), &[]));
        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.total_chars, 6);
        assert_eq!(
            stats.file_details.get("two.txt"),
            Some(&FileReportInfo { lines: 2, chars: 6 })
        );
    }

    #[test]
    fn test_report_file_inside_tree_is_skipped() {
        let dir = tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::write(root.join("directory_contents.txt"), "old report").unwrap();
        fs::write(root.join("data.txt"), "data").unwrap();

        let scanner = Scanner::with_patterns(
            root.clone(),
            PatternSet::empty(),
            &root.join("directory_contents.txt"),
            Arc::new(ProgressBar::hidden()),
        );
        let (stats, out) = run(&scanner);
        assert_eq!(stats.kept, vec!["data.txt"]);
        assert_eq!(stats.files_ignored, 0);
        assert!(!out.contains("old report"));
    }

    #[test]
    fn test_new_loads_root_ignore_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "secret\n").unwrap();
        let config = Config::new(dir.path(), dir.path().join("out.txt"));

        let scanner = Scanner::new(&config, Arc::new(ProgressBar::hidden())).unwrap();
        assert_eq!(scanner.matcher().patterns().len(), 1);
        assert_eq!(scanner.root(), fs::canonicalize(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_is_not_emitted_or_followed() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("real").join("a.txt"), "alpha").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let (stats, out) = run(&scanner_for(dir.path(), &[]));
        assert_eq!(stats.kept, vec!["real/a.txt"]);
        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.files_ignored, 0);
        assert!(!out.contains("📄 FILE: link"));
        assert!(!out.contains("DIRECTORY: link"));
        assert!(!out.contains("[Error reading file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_matches_directory_patterns() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let (stats, _) = run(&scanner_for(dir.path(), &["link/"]));
        assert_eq!(stats.ignored, vec!["link"]);
        assert_eq!(stats.files_ignored, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_symlink_is_read_as_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("target.txt"), "linked content").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("alias.txt"))
            .unwrap();

        let (stats, out) = run(&scanner_for(dir.path(), &[]));
        assert_eq!(stats.kept, vec!["alias.txt", "target.txt"]);
        assert_eq!(out.matches("linked content").count(), 2);
    }

    #[test]
    fn test_unlistable_root_is_fatal() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("vanished");
        fs::create_dir(&root).unwrap();
        let config = Config::new(&root, dir.path().join("out.txt"));
        let scanner = Scanner::new(&config, Arc::new(ProgressBar::hidden())).unwrap();
        fs::remove_dir(&root).unwrap();

        let mut writer = ReportWriter::new(Vec::new());
        assert!(matches!(
            scanner.scan(&mut writer),
            Err(crate::error::DirDumpError::Walk(_))
        ));
    }

    #[test]
    fn test_unlistable_subdirectory_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("top.txt"), "top").unwrap();
        let scanner = scanner_for(dir.path(), &[]);
        let mut writer = ReportWriter::new(Vec::new());
        let mut stats = ScanStatistics::default();

        // A child that disappears between listing and descent only logs a warning
        scanner
            .scan_directory(&scanner.root().join("gone"), &mut writer, &mut stats)
            .unwrap();
        assert_eq!(stats.files_processed, 0);
    }

    #[test]
    fn test_new_fails_for_missing_root() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().join("missing"), "out.txt");
        assert!(Scanner::new(&config, Arc::new(ProgressBar::hidden())).is_err());
    }
}
