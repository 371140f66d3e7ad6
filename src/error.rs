//! Global error handling for dirdump
//!
//! Every fallible operation in the crate returns [`Result`]. Most of these
//! errors are recovered close to where they happen (an unreadable ignore file
//! becomes an empty pattern set, an unresolvable path is kept, an unreadable
//! file becomes a placeholder); only fatal ones reach `main`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Global error type for dirdump operations
#[derive(Error, Debug)]
pub enum DirDumpError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The ignore file exists but could not be read
    #[error("Could not read {}: {}", .path.display(), .source)]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A path could not be expressed relative to the scan root
    #[error("Cannot resolve {} relative to {}", .path.display(), .root.display())]
    PathResolution { path: PathBuf, root: PathBuf },

    /// A file could not be read as text
    #[error("Cannot read {}: {}", .path.display(), .reason)]
    ContentRead { path: PathBuf, reason: String },

    /// The scan root could not be listed
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for dirdump operations
pub type Result<T> = std::result::Result<T, DirDumpError>;

/// Creates a DirDumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::DirDumpError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            DirDumpError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

impl From<DirDumpError> for io::Error {
    fn from(err: DirDumpError) -> Self {
        match err {
            DirDumpError::Io(e) => e,
            DirDumpError::PathNotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
