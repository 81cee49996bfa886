//! Split command execution.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::Error;
use crate::cli::SplitArgs;
use crate::config::{Config, OutputMode, SplitConfig, validate_split};
use crate::engine::MediaEngine;
use crate::output::{ResultType, UniformPartEntry, UniformSplitPayload, emit_json_result};
use crate::pipeline::{collect_input_videos, ensure_dir};

use super::extractor::video_stem;
use super::{SegmentExtractor, SizeCheck, check_size, part_file_name, plan_uniform_parts};

/// Execute the split command.
///
/// Videos outside the configured size bounds, or whose duration cannot be
/// probed, are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the settings are invalid, an input directory cannot
/// be read or the output directory cannot be created.
pub fn execute<E: MediaEngine + ?Sized>(
    args: &SplitArgs,
    config: &Config,
    engine: &E,
    output_mode: OutputMode,
    progress_enabled: bool,
) -> Result<(), Error> {
    let settings = resolve_settings(args, config)?;
    let is_json = output_mode.is_structured();

    let videos = collect_input_videos(&args.inputs)?;
    if videos.is_empty() {
        info!("No video files found");
    }

    let mut total_files = 0;
    let mut all_parts: Vec<UniformPartEntry> = Vec::new();

    for video in &videos {
        match split_video(video, &settings, engine, progress_enabled && !is_json) {
            Ok(Some(parts)) => {
                total_files += 1;
                all_parts.extend(parts);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to split {}: {e}", video.display()),
        }
    }

    if is_json {
        let payload = UniformSplitPayload {
            result_type: ResultType::UniformSplit,
            output_dir: settings.output_dir.clone(),
            total_files,
            total_parts: all_parts.len(),
            parts: all_parts,
        };
        emit_json_result(&payload);
        return Ok(());
    }

    info!(
        "Split {total_files} of {} videos into {} parts in {}",
        videos.len(),
        all_parts.len(),
        settings.output_dir.display()
    );

    Ok(())
}

/// Config values overridden by command-line flags, then validated.
fn resolve_settings(args: &SplitArgs, config: &Config) -> Result<SplitConfig, Error> {
    let mut merged = config.clone();
    let split = &mut merged.split;
    if let Some(parts) = args.parts {
        split.parts = parts;
    }
    if let Some(min) = args.min_size_mb {
        split.min_size_mb = min;
    }
    if let Some(max) = args.max_size_mb {
        split.max_size_mb = max;
    }
    if let Some(output) = &args.output {
        split.output_dir.clone_from(output);
    }

    validate_split(&merged)?;
    Ok(merged.split)
}

/// Split one video. `Ok(None)` means it was skipped.
fn split_video<E: MediaEngine + ?Sized>(
    video: &Path,
    settings: &SplitConfig,
    engine: &E,
    progress_enabled: bool,
) -> Result<Option<Vec<UniformPartEntry>>, Error> {
    let size = std::fs::metadata(video)?.len();
    match check_size(size, settings.min_size_mb, settings.max_size_mb) {
        SizeCheck::Within => {}
        SizeCheck::TooSmall => {
            warn!(
                "Skipping {}: smaller than {} MB",
                video.display(),
                settings.min_size_mb
            );
            return Ok(None);
        }
        SizeCheck::TooLarge => {
            warn!(
                "Skipping {}: larger than {} MB",
                video.display(),
                settings.max_size_mb
            );
            return Ok(None);
        }
    }

    let duration = match engine.probe_duration(video) {
        Ok(duration) => duration,
        Err(e) => {
            warn!("Skipping {}: could not read duration: {e}", video.display());
            return Ok(None);
        }
    };

    let windows = plan_uniform_parts(duration, settings.parts);
    if windows.is_empty() {
        warn!("Skipping {}: zero duration", video.display());
        return Ok(None);
    }

    info!(
        "Splitting {} ({duration:.2} s) into {} parts",
        video.display(),
        windows.len()
    );

    ensure_dir(&settings.output_dir)?;
    let extractor = SegmentExtractor::new(engine, settings.output_dir.clone());
    let stem = video_stem(video);

    let pb = if progress_enabled {
        let pb = ProgressBar::new(windows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} parts ({msg})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut entries = Vec::with_capacity(windows.len());
    for window in &windows {
        let output = settings.output_dir.join(part_file_name(&stem, window.number));
        pb.set_message(format!("part {}", window.number));

        match extractor.extract_window(video, window.start_seconds, window.end_seconds, &output) {
            Ok(()) => {
                pb.println(format!(
                    "  {:.1}s-{:.1}s -> {}",
                    window.start_seconds,
                    window.end_seconds,
                    output.file_name().unwrap_or_default().to_string_lossy()
                ));
                entries.push(UniformPartEntry {
                    source: video.to_path_buf(),
                    number: window.number,
                    start_time: window.start_seconds,
                    end_time: window.end_seconds,
                    output_file: output,
                });
            }
            Err(e) => {
                warn!("Error creating part {}: {e}", output.display());
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(Some(entries))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::engine::{ConcatManifest, ExtractRequest};
    use crate::error::Result;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FixedDuration {
        duration: f64,
        windows: RefCell<Vec<(f64, f64, PathBuf)>>,
    }

    impl MediaEngine for FixedDuration {
        fn probe_duration(&self, _path: &Path) -> Result<f64> {
            Ok(self.duration)
        }

        fn extract(&self, request: &ExtractRequest<'_>) -> Result<()> {
            self.windows.borrow_mut().push((
                request.start_seconds,
                request.end_seconds,
                request.output.to_path_buf(),
            ));
            Ok(())
        }

        fn concat(&self, _manifest: &ConcatManifest, _output: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn settings(output_dir: PathBuf, min_size_mb: u64) -> SplitConfig {
        SplitConfig {
            parts: 2,
            min_size_mb,
            max_size_mb: 10,
            output_dir,
        }
    }

    #[test]
    fn test_split_video_writes_equal_parts() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("talk.mp4");
        std::fs::write(&video, b"tiny").unwrap();
        let out = dir.path().join("parts");
        let engine = FixedDuration {
            duration: 90.0,
            windows: RefCell::new(Vec::new()),
        };

        let parts = split_video(&video, &settings(out.clone(), 0), &engine, false)
            .unwrap()
            .unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].output_file, out.join("talk - part 2.mp4"));
        assert!(out.is_dir());
        let windows = engine.windows.borrow();
        assert_eq!((windows[0].0, windows[0].1), (0.0, 45.0));
        assert_eq!((windows[1].0, windows[1].1), (45.0, 90.0));
    }

    #[test]
    fn test_split_video_skips_small_file() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("talk.mp4");
        std::fs::write(&video, b"tiny").unwrap();
        let engine = FixedDuration {
            duration: 90.0,
            windows: RefCell::new(Vec::new()),
        };

        let result = split_video(&video, &settings(dir.path().join("p"), 1), &engine, false);

        assert!(result.unwrap().is_none());
        assert!(engine.windows.borrow().is_empty());
    }

    #[test]
    fn test_resolve_settings_applies_overrides() {
        let args = SplitArgs {
            inputs: vec![PathBuf::from("a.mp4")],
            parts: Some(6),
            min_size_mb: Some(1),
            max_size_mb: None,
            output: Some(PathBuf::from("out")),
        };
        let resolved = resolve_settings(&args, &Config::default()).unwrap();
        assert_eq!(resolved.parts, 6);
        assert_eq!(resolved.min_size_mb, 1);
        assert_eq!(resolved.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_resolve_settings_rejects_inverted_bounds() {
        let args = SplitArgs {
            inputs: vec![PathBuf::from("a.mp4")],
            parts: None,
            min_size_mb: Some(500),
            max_size_mb: Some(100),
            output: None,
        };
        assert!(matches!(
            resolve_settings(&args, &Config::default()),
            Err(Error::ConfigValidation { .. })
        ));
    }
}
