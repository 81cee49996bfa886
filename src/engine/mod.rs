//! External media engine boundary.
//!
//! Extraction and merging never decode or encode media themselves; they ask
//! a [`MediaEngine`] to stream-copy packets. [`FfmpegEngine`] is the
//! production implementation, shelling out to `ffmpeg` and `ffprobe`.

mod command;
mod ffmpeg;
mod manifest;

pub use command::{ToolCommand, ToolOutput};
pub use ffmpeg::{FfmpegEngine, concat_args, extract_args, parse_probe_duration};
pub use manifest::ConcatManifest;

use std::path::Path;

use crate::error::Result;

/// One bounded stream-copy extraction.
#[derive(Debug, Clone, Copy)]
pub struct ExtractRequest<'a> {
    /// Source video.
    pub source: &'a Path,
    /// Window start in seconds.
    pub start_seconds: f64,
    /// Window end in seconds.
    pub end_seconds: f64,
    /// File to create.
    pub output: &'a Path,
}

/// Operations the segmentation engine needs from a media toolkit.
pub trait MediaEngine {
    /// Duration of a media file in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be probed.
    fn probe_duration(&self, path: &Path) -> Result<f64>;

    /// Copy the first video and first audio stream of the requested window
    /// into a new file without re-encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine reports failure or times out.
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<()>;

    /// Join the files listed in `manifest`, in order, into `output` without
    /// re-encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine reports failure or times out.
    fn concat(&self, manifest: &ConcatManifest, output: &Path) -> Result<()>;
}
