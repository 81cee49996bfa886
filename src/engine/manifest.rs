//! Concat manifest for lossless joining.
//!
//! The manifest is a temporary file in the `ffmpeg` concat demuxer format
//! (`file '<path>'` per line). It is deleted when the value is dropped.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Ordered list of files to join, backed by a temporary file.
#[derive(Debug)]
pub struct ConcatManifest {
    file: NamedTempFile,
    entries: Vec<PathBuf>,
}

impl ConcatManifest {
    /// Write a manifest listing `clips` in the given order.
    ///
    /// Paths are made absolute so the manifest's own location does not
    /// affect how they resolve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestWrite`] if the temporary file cannot be
    /// created or written.
    pub fn write(clips: &[PathBuf]) -> Result<Self> {
        let entries = clips
            .iter()
            .map(std::path::absolute)
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|source| Error::ManifestWrite { source })?;

        let mut file = tempfile::Builder::new()
            .prefix("marksplit-concat-")
            .suffix(".txt")
            .tempfile()
            .map_err(|source| Error::ManifestWrite { source })?;

        file.write_all(render(&entries).as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| Error::ManifestWrite { source })?;

        Ok(Self { file, entries })
    }

    /// Location of the manifest file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Listed files, in join order.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

/// Render manifest text for the given paths.
fn render(entries: &[PathBuf]) -> String {
    entries
        .iter()
        .map(|path| format!("file '{}'\n", escape(&path.to_string_lossy())))
        .collect()
}

/// Quote a path for the concat demuxer: `'` becomes `'\''`.
fn escape(path: &str) -> String {
    path.replace('\'', r"'\''")
}
