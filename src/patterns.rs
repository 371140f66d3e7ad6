/*!
 * Ignore patterns loaded from the scan root
 *
 * Patterns are kept in file order. Each line of the ignore file becomes one
 * [`Pattern`] whose shape is decided once, at load time, from its literal
 * form. There is no negation: a `!` prefix is just part of the pattern text.
 */

use std::fs;
use std::io;
use std::path::Path;
use std::slice;

use tracing::{debug, warn};

use crate::error::{DirDumpError, Result};
use crate::utils::{normalize_separators, IGNORE_FILE_NAME};

/// How a pattern is compared against a candidate path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    /// Trailing `/`: matches a directory by its relative path, or anything below it
    DirectoryOnly(String),
    /// Leading `*/`, prefix removed
    SingleStar(String),
    /// Leading `**/`, prefix removed
    DoubleStar(String),
    /// Any other pattern, separators normalized
    Plain(String),
}

impl PatternKind {
    /// Shape of a pattern used as a path glob (no directory-only handling)
    pub fn glob(pattern: &str) -> Self {
        let pattern = normalize_separators(pattern);
        if let Some(rest) = pattern.strip_prefix("*/") {
            PatternKind::SingleStar(rest.to_string())
        } else if let Some(rest) = pattern.strip_prefix("**/") {
            PatternKind::DoubleStar(rest.to_string())
        } else {
            PatternKind::Plain(pattern)
        }
    }

    /// Suffix/substring comparison against an already-normalized candidate.
    ///
    /// This is not glob expansion: `*` and `?` have no meaning past the
    /// prefix, and any pattern that occurs inside the candidate matches, so
    /// `log` matches `src/catalog.txt`.
    pub fn matches_glob(&self, candidate: &str) -> bool {
        match self {
            PatternKind::SingleStar(rest) => {
                candidate.ends_with(rest.as_str()) || candidate.contains(rest.as_str())
            }
            PatternKind::DoubleStar(rest) => candidate.contains(rest.as_str()),
            PatternKind::Plain(pattern) => {
                candidate == pattern
                    || candidate.ends_with(&format!("/{}", pattern))
                    || candidate.contains(pattern.as_str())
            }
            PatternKind::DirectoryOnly(_) => false,
        }
    }
}

/// A single exclusion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    kind: PatternKind,
}

impl Pattern {
    /// Build a pattern from one trimmed line of the ignore file
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = if raw.ends_with('/') {
            PatternKind::DirectoryOnly(raw.trim_end_matches('/').to_string())
        } else {
            PatternKind::glob(&raw)
        };
        Self { raw, kind }
    }

    /// The pattern exactly as written in the file
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn is_directory_only(&self) -> bool {
        matches!(self.kind, PatternKind::DirectoryOnly(_))
    }

    /// Whether this pattern excludes an entry.
    ///
    /// `relative_path` must already use `/` separators; `basename` is the
    /// final component of the entry.
    pub fn matches(&self, relative_path: &str, basename: &str, is_dir: bool) -> bool {
        match &self.kind {
            PatternKind::DirectoryOnly(stem) => {
                is_dir
                    && (relative_path == stem
                        || relative_path
                            .strip_prefix(stem.as_str())
                            .map_or(false, |rest| rest.starts_with('/')))
            }
            glob => {
                glob.matches_glob(&normalize_separators(relative_path))
                    || glob.matches_glob(&normalize_separators(basename))
            }
        }
    }
}

/// Ordered, immutable collection of patterns for one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// An empty set: nothing but `.git` is ignored
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse ignore-file text: one pattern per line, blank lines and `#`
    /// comments skipped, surrounding whitespace trimmed.
    pub fn parse(text: &str) -> Self {
        let patterns = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Pattern::new)
            .collect();
        Self { patterns }
    }

    /// Load `<root>/.gitignore`.
    ///
    /// Never fails: a missing file gives an empty set, any other read error
    /// is logged and also gives an empty set.
    pub fn load(root: &Path) -> Self {
        match Self::try_load(root) {
            Ok(Some(set)) => {
                debug!(count = set.len(), root = %root.display(), "loaded ignore patterns");
                set
            }
            Ok(None) => Self::empty(),
            Err(e) => {
                warn!("Could not read {}: {}", IGNORE_FILE_NAME, e);
                Self::empty()
            }
        }
    }

    /// Read and parse the ignore file, `Ok(None)` when it does not exist
    pub fn try_load(root: &Path) -> Result<Option<Self>> {
        let path = root.join(IGNORE_FILE_NAME);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(Self::parse(&String::from_utf8_lossy(&bytes)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DirDumpError::ConfigRead { path, source }),
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Pattern> for PatternSet {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}
