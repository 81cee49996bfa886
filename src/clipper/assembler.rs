//! Sequence assembly.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::constants::naming;
use crate::engine::{ConcatManifest, MediaEngine};
use crate::warning::{Outcome, Warning};

use super::extractor::video_stem;

/// Merged output file name for a video stem.
///
/// Format: `{stem} - BSE - merged_video.mp4`.
#[must_use]
pub fn merged_file_name(video_stem: &str) -> String {
    format!(
        "{video_stem}{}.{}",
        naming::MERGED_SUFFIX,
        naming::OUTPUT_EXTENSION
    )
}

/// Joins the clips of one video into a single file without re-encoding.
pub struct SequenceAssembler<'a, E: MediaEngine + ?Sized> {
    engine: &'a E,
    /// Directory receiving the merged file.
    output_dir: PathBuf,
}

impl<'a, E: MediaEngine + ?Sized> SequenceAssembler<'a, E> {
    /// Create an assembler writing into `output_dir`.
    #[must_use]
    pub fn new(engine: &'a E, output_dir: PathBuf) -> Self {
        Self { engine, output_dir }
    }

    /// Where the merged file for `video` is written.
    #[must_use]
    pub fn merged_path(&self, video: &Path) -> PathBuf {
        self.output_dir.join(merged_file_name(&video_stem(video)))
    }

    /// Merge `clips`, in the given order, into the video's merged file.
    ///
    /// Returns `None` with [`Warning::NothingToMerge`] for an empty clip
    /// list (the engine is not invoked), and `None` with
    /// [`Warning::MergeFailed`] if the manifest or the engine fails. A
    /// partially written output is left in place and never reported as a
    /// result.
    pub fn merge(&self, video: &Path, clips: &[PathBuf]) -> Outcome<Option<PathBuf>> {
        if clips.is_empty() {
            info!("Nothing to merge for {}", video.display());
            return Outcome::with_warnings(None, vec![Warning::NothingToMerge]);
        }

        let output = self.merged_path(video);
        let result = ConcatManifest::write(clips)
            .and_then(|manifest| self.engine.concat(&manifest, &output));

        match result {
            Ok(()) => {
                info!("Merged {} clips into {}", clips.len(), output.display());
                Outcome::new(Some(output))
            }
            Err(e) => {
                warn!("Error merging videos into {}: {e}", output.display());
                let reason = e.to_string();
                Outcome::with_warnings(None, vec![Warning::MergeFailed { output, reason }])
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::ExtractRequest;
    use crate::error::{Error, Result};
    use std::cell::RefCell;

    #[derive(Default)]
    struct ConcatRecorder {
        manifests: RefCell<Vec<(Vec<PathBuf>, PathBuf)>>,
        fail: bool,
    }

    impl MediaEngine for ConcatRecorder {
        fn probe_duration(&self, _path: &Path) -> Result<f64> {
            Ok(0.0)
        }

        fn extract(&self, _request: &ExtractRequest<'_>) -> Result<()> {
            Ok(())
        }

        fn concat(&self, manifest: &ConcatManifest, output: &Path) -> Result<()> {
            assert!(manifest.path().exists());
            self.manifests
                .borrow_mut()
                .push((manifest.entries().to_vec(), output.to_path_buf()));
            if self.fail {
                return Err(Error::Engine {
                    tool: "ffmpeg".to_string(),
                    message: "concat failed".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_merged_file_name() {
        assert_eq!(merged_file_name("trip"), "trip - BSE - merged_video.mp4");
    }

    #[test]
    fn test_empty_clip_list_does_not_invoke_engine() {
        let engine = ConcatRecorder::default();
        let assembler = SequenceAssembler::new(&engine, PathBuf::from("/out"));

        let outcome = assembler.merge(Path::new("trip.mp4"), &[]);

        assert_eq!(outcome.value, None);
        assert_eq!(outcome.warnings, vec![Warning::NothingToMerge]);
        assert!(engine.manifests.borrow().is_empty());
    }

    #[test]
    fn test_merge_passes_clips_in_order() {
        let engine = ConcatRecorder::default();
        let assembler = SequenceAssembler::new(&engine, PathBuf::from("/out"));
        let clips = vec![
            PathBuf::from("/out/trip_clip_3_to_4.mp4"),
            PathBuf::from("/out/trip_clip_1_to_2.mp4"),
        ];

        let outcome = assembler.merge(Path::new("/videos/trip.mp4"), &clips);

        let expected = PathBuf::from("/out/trip - BSE - merged_video.mp4");
        assert_eq!(outcome.value, Some(expected.clone()));
        assert!(outcome.warnings.is_empty());
        assert_eq!(engine.manifests.borrow()[0], (clips, expected));
    }

    #[test]
    fn test_engine_failure_is_a_warning() {
        let engine = ConcatRecorder {
            fail: true,
            ..ConcatRecorder::default()
        };
        let assembler = SequenceAssembler::new(&engine, PathBuf::from("/out"));

        let outcome = assembler.merge(Path::new("trip.mp4"), &[PathBuf::from("/out/a.mp4")]);

        assert_eq!(outcome.value, None);
        assert!(matches!(
            &outcome.warnings[..],
            [Warning::MergeFailed { reason, .. }] if reason.contains("concat failed")
        ));
    }
}
