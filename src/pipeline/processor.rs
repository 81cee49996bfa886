//! Single video processing pipeline.

use crate::clipper::{SegmentExtractor, SequenceAssembler};
use crate::engine::MediaEngine;
use crate::error::{Error, Result};
use crate::markers::{pair_markers, read_marker_file};
use crate::output::progress;
use crate::pipeline::{ProcessOptions, ensure_dir, marker_path_for, output_dir_for};
use crate::warning::Warning;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Process a single video: read its markers, extract one clip per range
/// and optionally merge the clips.
///
/// Per-line, per-range and merge problems are collected as warnings in the
/// returned report.
///
/// # Errors
///
/// Returns [`Error::VideoNotFound`] if the video is missing, the marker
/// reader's error if the marker file is missing or undecodable, and
/// [`Error::OutputDirCreateFailed`] if the output directory cannot be
/// created. None of these affect other videos.
pub fn process_video<E: MediaEngine + ?Sized>(
    video: &Path,
    options: &ProcessOptions,
    engine: &E,
) -> Result<VideoReport> {
    let start_time = Instant::now();

    if !video.is_file() {
        return Err(Error::VideoNotFound {
            path: video.to_path_buf(),
        });
    }

    let marker_file = marker_path_for(video, &options.marker_extension);
    let (markers, mut warnings) = {
        let outcome = read_marker_file(&marker_file, options.encoding)?;
        (outcome.value, outcome.warnings)
    };

    let duration_seconds = match engine.probe_duration(video) {
        Ok(duration) => {
            info!(
                "Processing {} (duration: {duration:.2} s)",
                video.display()
            );
            Some(duration)
        }
        Err(e) => {
            debug!("Duration probe failed for {}: {e}", video.display());
            info!("Processing {}", video.display());
            None
        }
    };

    for marker in markers.iter() {
        debug!(
            "Marker {} at {:.3}s",
            marker.index, marker.timestamp_seconds
        );
    }

    let mut report = VideoReport {
        video: video.to_path_buf(),
        marker_file,
        duration_seconds,
        markers: markers.len(),
        clips: Vec::new(),
        merged: None,
        warnings: Vec::new(),
    };

    if markers.is_empty() {
        info!("No markers found in {}", report.marker_file.display());
        report.warnings = warnings;
        return Ok(report);
    }

    let ranges = pair_markers(&markers).drain_into(&mut warnings);
    info!(
        "Read {} markers, {} extraction ranges",
        markers.len(),
        ranges.len()
    );

    let output_dir = output_dir_for(video, options.output_dir.as_deref());
    ensure_dir(&output_dir)?;

    let file_name = video
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let pb = progress::create_clip_progress(ranges.len(), file_name, options.progress_enabled);

    let extractor = SegmentExtractor::new(engine, output_dir.clone());
    report.clips = extractor
        .extract_all(video, &ranges, &pb)
        .drain_into(&mut warnings);
    pb.finish_and_clear();

    if options.merge {
        let assembler = SequenceAssembler::new(engine, output_dir);
        report.merged = assembler
            .merge(video, &report.clips)
            .drain_into(&mut warnings);
    }

    report.warnings = warnings;
    info!(
        "Created {} of {} clips from {} in {:.2}s",
        report.clips.len(),
        ranges.len(),
        video.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Result of processing a single video.
#[derive(Debug, Clone)]
pub struct VideoReport {
    /// Processed video.
    pub video: PathBuf,
    /// Marker file that was read.
    pub marker_file: PathBuf,
    /// Probed duration, if `ffprobe` answered.
    pub duration_seconds: Option<f64>,
    /// Number of markers read.
    pub markers: usize,
    /// Clips written, in extraction order.
    pub clips: Vec<PathBuf>,
    /// Merged output, if produced.
    pub merged: Option<PathBuf>,
    /// Everything that was skipped along the way.
    pub warnings: Vec<Warning>,
}
