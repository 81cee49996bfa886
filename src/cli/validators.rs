//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::config::MarkerEncoding;

/// Parse a marker encoding name (`utf-16`, `utf16le`, `UTF-8`, ...).
pub fn parse_encoding(s: &str) -> Result<MarkerEncoding, String> {
    s.parse()
}

/// Parse a marker file extension, accepting an optional leading dot.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.trim().trim_start_matches('.');

    if ext.is_empty() {
        return Err("extension cannot be empty".to_string());
    }

    if ext.contains(['/', '\\']) {
        return Err(format!("'{s}' is not a bare file extension"));
    }

    Ok(ext.to_string())
}

/// Parse a size in megabytes.
pub fn parse_size_mb(s: &str) -> Result<u64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid size in megabytes"))
}
