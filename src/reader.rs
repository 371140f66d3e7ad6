/*!
 * Reading file contents as text
 *
 * The reader never fails: anything that cannot be shown as text is replaced
 * with a bracketed placeholder so the report stays complete.
 */

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{DirDumpError, Result};

/// Number of leading bytes inspected by the binary heuristic
const SNIFF_LEN: usize = 8192;

/// Share of control bytes above which content is treated as binary
const BINARY_RATIO: f32 = 0.1;

/// Read a file as text.
///
/// Valid UTF-8 is used as is; anything else is decoded as Latin-1 unless it
/// looks binary. Binary content and I/O failures produce a placeholder
/// instead of an error.
pub fn read_file_content(path: &Path) -> String {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unreadable file");
            return format!("[Error reading file: {}]", e);
        }
    };

    match decode(path, &bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "binary file");
            match e {
                DirDumpError::ContentRead { reason, .. } => {
                    format!("[Binary file or cannot read: {}]", reason)
                }
                other => format!("[Binary file or cannot read: {}]", other),
            }
        }
    }
}

/// Decode raw bytes, UTF-8 first and Latin-1 as the fallback.
///
/// Latin-1 maps every byte, so the fallback is refused for bytes that look
/// binary; valid UTF-8 is always accepted.
pub fn decode(path: &Path, bytes: &[u8]) -> Result<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    if looks_binary(bytes) {
        return Err(DirDumpError::ContentRead {
            path: path.to_path_buf(),
            reason: "binary content detected".to_string(),
        });
    }

    Ok(decode_latin1(bytes))
}

/// ISO-8859-1: every byte maps to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Heuristic for non-text content: a NUL byte, or too many control bytes,
/// in the first few kilobytes.
pub fn looks_binary(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    // Control characters outside tab, newline, vertical tab, form feed, carriage return
    let binary_count = sample
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();
    binary_count as f32 / sample.len() as f32 >= BINARY_RATIO
}
