/*!
 * Ignore decisions for paths under the scan root
 */

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{DirDumpError, Result};
use crate::patterns::{PatternKind, PatternSet};
use crate::utils::{normalize_separators, GIT_DIR_NAME};

/// Decides whether entries below `root` are excluded from the report
#[derive(Debug, Clone)]
pub struct Matcher {
    root: PathBuf,
    patterns: PatternSet,
}

impl Matcher {
    pub fn new(root: impl Into<PathBuf>, patterns: PatternSet) -> Self {
        Self {
            root: root.into(),
            patterns,
        }
    }

    /// Build a matcher from the ignore file found in `root`
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let patterns = PatternSet::load(&root);
        Self::new(root, patterns)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// `path` relative to the root with `/` separators; the root itself is `"."`
    pub fn relative_path(&self, path: &Path) -> Result<String> {
        let rel = path
            .strip_prefix(&self.root)
            .map_err(|_| DirDumpError::PathResolution {
                path: path.to_path_buf(),
                root: self.root.clone(),
            })?;

        let parts: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(Ok(name.to_string_lossy().into_owned())),
                Component::CurDir => None,
                _ => Some(Err(())),
            })
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| DirDumpError::PathResolution {
                path: path.to_path_buf(),
                root: self.root.clone(),
            })?;

        if parts.is_empty() {
            Ok(".".to_string())
        } else {
            Ok(normalize_separators(&parts.join("/")))
        }
    }

    /// Whether the entry at `path` is excluded.
    ///
    /// `.git` anywhere in the given path is always excluded, even above the
    /// root. Otherwise the root is never excluded and the first matching
    /// pattern wins. A path that cannot be resolved against the root is kept.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if has_git_component(path) {
            return true;
        }

        let rel = match self.relative_path(path) {
            Ok(rel) => rel,
            Err(e) => {
                warn!("Error checking ignore for {}: {}", path.display(), e);
                return false;
            }
        };

        if rel == "." {
            return false;
        }

        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.patterns
            .iter()
            .any(|pattern| pattern.matches(&rel, &basename, is_dir))
    }
}

/// Whether any component of `path` is the `.git` directory
fn has_git_component(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == GIT_DIR_NAME))
}

/// Suffix/substring match of `candidate` against a single pattern.
///
/// Both sides have `\` normalized to `/` first. A `*/` or `**/` prefix is
/// removed before comparing; after that any occurrence of the pattern inside
/// the candidate is a match.
pub fn fnmatch_path(candidate: &str, pattern: &str) -> bool {
    PatternKind::glob(pattern).matches_glob(&normalize_separators(candidate))
}
