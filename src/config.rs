/*!
 * Configuration handling for dirdump
 */

use std::env;
use std::path::PathBuf;

use clap::Parser;

use crate::error::Result;
use crate::utils::OUTPUT_FILE_NAME;
use crate::{bail, ensure};

/// Command-line arguments for dirdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dirdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dump a directory tree and its file contents into a single text report",
    long_about = "Walks a directory, skips entries excluded by the root .gitignore and any .git \
                  directory, and writes every remaining file into directory_contents.txt."
)]
pub struct Args {
    /// Directory to scan (defaults to the current directory)
    pub directory_path: Option<PathBuf>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,

    /// Report file path
    pub output_file: PathBuf,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let target_dir = match args.directory_path {
            Some(path) => path,
            None => env::current_dir()?,
        };

        Ok(Self {
            target_dir,
            output_file: PathBuf::from(OUTPUT_FILE_NAME),
        })
    }

    /// Configuration for scanning `target_dir` into `output_file`
    pub fn new(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: output_file.into(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.exists(),
            PathNotFound,
            "Directory '{}' does not exist.",
            self.target_dir.display()
        );

        ensure!(
            self.target_dir.is_dir(),
            Config,
            "'{}' is not a directory.",
            self.target_dir.display()
        );

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                bail!(
                    PathNotFound,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirDumpError;
    use tempfile::tempdir;

    #[test]
    fn test_args_default_to_current_dir() {
        let args = Args::parse_from(["dirdump"]);
        assert!(args.directory_path.is_none());

        let config = Config::from_args(args).unwrap();
        assert_eq!(config.target_dir, env::current_dir().unwrap());
        assert_eq!(config.output_file, PathBuf::from("directory_contents.txt"));
    }

    #[test]
    fn test_args_positional_directory() {
        let args = Args::parse_from(["dirdump", "/tmp/project"]);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.target_dir, PathBuf::from("/tmp/project"));
    }

    #[test]
    fn test_args_reject_flags() {
        assert!(Args::try_parse_from(["dirdump", "--threads", "4"]).is_err());
        assert!(Args::try_parse_from(["dirdump", "a", "b"]).is_err());
    }

    #[test]
    fn test_validate_missing_directory() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().join("missing"), "out.txt");
        assert!(matches!(
            config.validate(),
            Err(DirDumpError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_validate_file_is_not_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let config = Config::new(&file, "out.txt");
        assert!(matches!(config.validate(), Err(DirDumpError::Config(_))));
    }

    #[test]
    fn test_validate_missing_output_directory() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path(), dir.path().join("nope").join("out.txt"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DirDumpError::PathNotFound(_)));
        assert!(err.to_string().contains("Output directory not found"));
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path(), dir.path().join("out.txt"));
        assert!(config.validate().is_ok());
    }
}
