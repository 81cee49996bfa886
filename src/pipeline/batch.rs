//! Sequential processing of a list of videos.

use crate::engine::MediaEngine;
use crate::output::{VideoEntry, VideoStatus, progress};
use crate::pipeline::{ProcessOptions, marker_path_for, process_video};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

/// Totals for one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Videos whose markers were read.
    pub processed: usize,
    /// Videos without a marker file, or that failed.
    pub skipped: usize,
    /// Clips written across all videos.
    pub total_clips: usize,
    /// Warnings across all videos.
    pub total_warnings: usize,
    /// Per-video details, in processing order.
    pub videos: Vec<VideoEntry>,
}

/// Process `videos` one at a time, in the given order.
///
/// A video without a marker file is skipped; a file-level error on one
/// video is logged and never stops the others.
pub fn process_batch<E: MediaEngine + ?Sized>(
    videos: &[PathBuf],
    options: &ProcessOptions,
    engine: &E,
) -> BatchSummary {
    let total_start = Instant::now();
    let mut summary = BatchSummary::default();
    let file_progress = progress::create_file_progress(videos.len(), options.progress_enabled);

    for video in videos {
        let marker_file = marker_path_for(video, &options.marker_extension);
        if !marker_file.is_file() {
            info!(
                "Skipping {}: no marker file {}",
                video.display(),
                marker_file.display()
            );
            summary.skipped += 1;
            summary.videos.push(skipped_entry(video, None));
            progress::inc_progress(file_progress.as_ref());
            continue;
        }

        match process_video(video, options, engine) {
            Ok(report) => {
                for warning in &report.warnings {
                    warn!("{}: {warning}", video.display());
                }
                summary.processed += 1;
                summary.total_clips += report.clips.len();
                summary.total_warnings += report.warnings.len();
                summary.videos.push(VideoEntry {
                    video: report.video,
                    status: VideoStatus::Processed,
                    duration_seconds: report.duration_seconds,
                    markers: report.markers,
                    clips: report.clips,
                    merged: report.merged,
                    warnings: report.warnings,
                    error: None,
                });
            }
            Err(e) => {
                error!("Failed to process {}: {e}", video.display());
                summary.skipped += 1;
                summary.videos.push(skipped_entry(video, Some(e.to_string())));
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    info!(
        "Complete: {} processed, {} skipped, {} clips, {} warnings in {:.2}s",
        summary.processed,
        summary.skipped,
        summary.total_clips,
        summary.total_warnings,
        total_start.elapsed().as_secs_f64()
    );

    summary
}

fn skipped_entry(video: &Path, error: Option<String>) -> VideoEntry {
    VideoEntry {
        video: video.to_path_buf(),
        status: if error.is_some() {
            VideoStatus::Failed
        } else {
            VideoStatus::Skipped
        },
        duration_seconds: None,
        markers: 0,
        clips: Vec::new(),
        merged: None,
        warnings: Vec::new(),
        error,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::MarkerEncoding;
    use crate::engine::{ConcatManifest, ExtractRequest};
    use crate::error::Result;
    use std::fs;
    use tempfile::TempDir;

    struct AcceptAll;

    impl MediaEngine for AcceptAll {
        fn probe_duration(&self, _path: &Path) -> Result<f64> {
            Ok(10.0)
        }

        fn extract(&self, _request: &ExtractRequest<'_>) -> Result<()> {
            Ok(())
        }

        fn concat(&self, _manifest: &ConcatManifest, _output: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_batch_skips_videos_without_markers() {
        let dir = TempDir::new().unwrap();
        let with = dir.path().join("a.mp4");
        let without = dir.path().join("b.mp4");
        let broken = dir.path().join("c.mp4");
        fs::write(&with, b"v").unwrap();
        fs::write(&without, b"v").unwrap();
        fs::write(&broken, b"v").unwrap();
        let utf16: Vec<u8> = "0=0\n1=1000\n2=2000\n3=3000\n"
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .collect();
        fs::write(dir.path().join("a.pbf"), utf16).unwrap();
        // odd byte count after the BOM
        fs::write(dir.path().join("c.pbf"), [0xFF, 0xFE, 0x00]).unwrap();

        let options = ProcessOptions {
            output_dir: None,
            marker_extension: "pbf".to_string(),
            encoding: MarkerEncoding::Utf16,
            merge: false,
            progress_enabled: false,
        };

        let summary = process_batch(&[with, without, broken], &options, &AcceptAll);

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.total_clips, 2);
        assert_eq!(summary.videos[0].status, VideoStatus::Processed);
        assert_eq!(summary.videos[1].status, VideoStatus::Skipped);
        assert_eq!(summary.videos[2].status, VideoStatus::Failed);
        assert!(summary.videos[2].error.is_some());
    }
}
