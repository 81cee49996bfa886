//! Video discovery and per-video path resolution.

use crate::config::MarkerEncoding;
use crate::constants::VIDEO_EXTENSIONS;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Options for processing a single video.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Output directory (None = same as the video).
    pub output_dir: Option<PathBuf>,
    /// Marker file extension, without the dot.
    pub marker_extension: String,
    /// Marker file text encoding.
    pub encoding: MarkerEncoding,
    /// Join the clips into one merged file.
    pub merge: bool,
    /// Show clip progress bars.
    pub progress_enabled: bool,
}

/// Determine the output directory for a video.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Marker file paired with a video: same directory, same stem.
pub fn marker_path_for(video: &Path, extension: &str) -> PathBuf {
    video.with_extension(extension)
}

/// Create `dir` (and parents) if missing.
///
/// # Errors
///
/// Returns [`Error::OutputDirCreateFailed`] if the directory cannot be
/// created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| Error::OutputDirCreateFailed {
        path: dir.to_path_buf(),
        source,
    })
}

/// List the video files directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched.
///
/// # Errors
///
/// Returns [`Error::DirectoryRead`] if the directory cannot be listed.
pub fn discover_videos(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut videos = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_video_file(&path) {
            videos.push(path);
        }
    }

    videos.sort();
    Ok(videos)
}

/// Collect videos from a mix of files and directories.
///
/// Files are taken as given when they carry a video extension; directories
/// contribute their direct video children.
///
/// # Errors
///
/// Returns [`Error::DirectoryRead`] if a directory cannot be listed.
pub fn collect_input_videos(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut videos = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_video_file(path) {
                videos.push(path.clone());
            } else {
                warn!("Skipping non-video file: {}", path.display());
            }
        } else if path.is_dir() {
            videos.extend(discover_videos(path)?);
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(videos)
}

/// Check if a file carries a supported video extension.
fn is_video_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        VIDEO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}
