//! Segment extraction.

use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::engine::{ExtractRequest, MediaEngine};
use crate::error::Result;
use crate::markers::ExtractionRange;
use crate::warning::{Outcome, Warning};

/// Produces one stream-copied clip per extraction range.
pub struct SegmentExtractor<'a, E: MediaEngine + ?Sized> {
    engine: &'a E,
    /// Directory receiving the clips.
    output_dir: PathBuf,
}

impl<'a, E: MediaEngine + ?Sized> SegmentExtractor<'a, E> {
    /// Create an extractor writing into `output_dir`.
    #[must_use]
    pub fn new(engine: &'a E, output_dir: PathBuf) -> Self {
        Self { engine, output_dir }
    }

    /// Where the clip for `range` of `video` is written.
    #[must_use]
    pub fn clip_path(&self, video: &Path, range: &ExtractionRange) -> PathBuf {
        self.output_dir.join(range.clip_file_name(&video_stem(video)))
    }

    /// Extract one range and return the clip path.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the clip could not be produced.
    pub fn extract(&self, video: &Path, range: &ExtractionRange) -> Result<PathBuf> {
        let output = self.clip_path(video, range);
        self.extract_window(video, range.start_seconds, range.end_seconds, &output)?;
        Ok(output)
    }

    /// Extract an arbitrary window of `video` into `output`.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the file could not be produced.
    pub fn extract_window(
        &self,
        video: &Path,
        start_seconds: f64,
        end_seconds: f64,
        output: &Path,
    ) -> Result<()> {
        self.engine.extract(&ExtractRequest {
            source: video,
            start_seconds,
            end_seconds,
            output,
        })
    }

    /// Extract every range in order.
    ///
    /// A failed range becomes a [`Warning::ExtractionFailed`] and is left
    /// out of the returned clip list; the remaining ranges still run. The
    /// clip list keeps the order of `ranges`.
    pub fn extract_all(
        &self,
        video: &Path,
        ranges: &[ExtractionRange],
        pb: &ProgressBar,
    ) -> Outcome<Vec<PathBuf>> {
        let mut outcome = Outcome::new(Vec::with_capacity(ranges.len()));

        for range in ranges {
            let output = self.clip_path(video, range);
            pb.set_message(file_name(&output));

            match self.extract_window(video, range.start_seconds, range.end_seconds, &output) {
                Ok(()) => {
                    info!(
                        "Created clip: {} ({:.3}s-{:.3}s)",
                        output.display(),
                        range.start_seconds,
                        range.end_seconds
                    );
                    outcome.value.push(output);
                }
                Err(e) => {
                    warn!("Error creating clip {}: {e}", output.display());
                    outcome.warn(Warning::ExtractionFailed {
                        output,
                        reason: e.to_string(),
                    });
                }
            }

            pb.inc(1);
        }

        outcome
    }
}

/// File stem of a video, lossily converted for use in names.
pub(crate) fn video_stem(video: &Path) -> String {
    video
        .file_stem()
        .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
