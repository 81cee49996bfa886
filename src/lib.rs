//! Marksplit - lossless video clipping driven by bookmark files.
//!
//! This crate reads player bookmark files next to videos, pairs the
//! bookmarks into extraction windows and cuts stream-copied clips with
//! `ffmpeg`, optionally joining them into one merged file.

#![warn(missing_docs)]

pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod markers;
pub mod output;
pub mod pipeline;
pub mod warning;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, MarksArgs};
use config::{
    Config, OutputMode, config_file_path, load_config_file, load_default_config, save_config,
    validate_config,
};
use engine::{FfmpegEngine, MediaEngine};
use output::{
    ConfigPayload, MarkerSplitPayload, ProbeEntry, ProbePayload, ResultType, emit_json_result,
};
use pipeline::{ProcessOptions, discover_videos, process_batch};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for marksplit CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = ctrlc::set_handler(|| {
        warn!("Interrupted");
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => config_file_path().ok(),
    };
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => load_default_config()?,
    };
    apply_overrides(&mut config, &cli.marks);
    validate_config(&config)?;

    let progress_enabled = !cli.quiet && !cli.marks.no_progress && !cli.output_mode.is_structured();

    match cli.command {
        Some(Command::Config { action }) => {
            handle_config_command(action, config_path.as_deref(), &config, cli.output_mode)
        }
        Some(Command::Split(args)) => {
            let engine = FfmpegEngine::from_config(&config.engine)?;
            clipper::command::execute(&args, &config, &engine, cli.output_mode, progress_enabled)
        }
        Some(Command::Probe { files }) => {
            let engine = FfmpegEngine::from_config(&config.engine)?;
            handle_probe_command(&files, &engine, cli.output_mode);
            Ok(())
        }
        None => split_by_markers(&cli.marks.dir, &config, cli.output_mode, progress_enabled),
    }
}

/// Fold command-line flags into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &MarksArgs) {
    if let Some(encoding) = args.encoding {
        config.markers.encoding = encoding;
    }
    if let Some(extension) = &args.extension {
        config.markers.extension.clone_from(extension);
    }
    if let Some(timeout) = args.timeout {
        config.engine.timeout_secs = timeout;
    }
    if args.overwrite {
        config.engine.overwrite = true;
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = Some(dir.clone());
    }
    if args.merge {
        config.output.merge = true;
    }
}

/// Process every video in `dir` that has a marker file.
fn split_by_markers(
    dir: &Path,
    config: &Config,
    output_mode: OutputMode,
    progress_enabled: bool,
) -> Result<()> {
    let videos = discover_videos(dir)?;

    let summary = if videos.is_empty() {
        info!("No video files found in {}", dir.display());
        pipeline::BatchSummary::default()
    } else {
        info!("Found {} video file(s) to process", videos.len());
        let engine = FfmpegEngine::from_config(&config.engine)?;
        let options = ProcessOptions {
            output_dir: config.output.dir.clone(),
            marker_extension: config.markers.extension.clone(),
            encoding: config.markers.encoding,
            merge: config.output.merge,
            progress_enabled,
        };
        process_batch(&videos, &options, &engine)
    };

    if output_mode.is_structured() {
        let payload = MarkerSplitPayload {
            result_type: ResultType::MarkerSplit,
            directory: dir.to_path_buf(),
            processed: summary.processed,
            skipped: summary.skipped,
            total_clips: summary.total_clips,
            videos: summary.videos,
        };
        emit_json_result(&payload);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout is reserved for results
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_probe_command<E: MediaEngine + ?Sized>(
    files: &[PathBuf],
    engine: &E,
    output_mode: OutputMode,
) {
    let entries: Vec<ProbeEntry> = files
        .iter()
        .map(|path| match engine.probe_duration(path) {
            Ok(duration) => ProbeEntry {
                path: path.clone(),
                duration_seconds: Some(duration),
                error: None,
            },
            Err(e) => {
                warn!("Could not probe {}: {e}", path.display());
                ProbeEntry {
                    path: path.clone(),
                    duration_seconds: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    if output_mode.is_structured() {
        emit_json_result(&ProbePayload {
            result_type: ResultType::Probe,
            files: entries,
        });
        return;
    }

    for entry in entries {
        if let Some(duration) = entry.duration_seconds {
            println!("{}\t{duration:.2}", entry.path.display());
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(
    action: ConfigAction,
    config_path: Option<&Path>,
    config: &Config,
    output_mode: OutputMode,
) -> Result<()> {
    let path = config_path.ok_or(Error::ConfigDirNotFound)?;

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            if output_mode.is_structured() {
                let value = serde_json::to_value(config).map_err(|e| Error::Internal {
                    message: format!("failed to serialize configuration: {e}"),
                })?;
                emit_json_result(&ConfigPayload {
                    result_type: ResultType::Config,
                    config_path: path.to_path_buf(),
                    config: value,
                });
            } else {
                let text = toml::to_string_pretty(config)
                    .map_err(|e| Error::ConfigSerialize { source: e })?;
                println!("# {}", path.display());
                println!("{text}");
            }
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(args: &[&str]) -> MarksArgs {
        let argv = std::iter::once("marksplit").chain(args.iter().copied());
        Cli::try_parse_from(argv).map(|cli| cli.marks).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = Config::default();
        apply_overrides(
            &mut config,
            &marks(&["--merge", "--timeout", "5", "--extension", "txt", "-o", "out"]),
        );

        assert!(config.output.merge);
        assert_eq!(config.engine.timeout_secs, 5);
        assert_eq!(config.markers.extension, "txt");
        assert_eq!(config.output.dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_no_flags_keep_config_values() {
        let mut config = Config::default();
        config.output.merge = true;
        config.engine.timeout_secs = 42;
        apply_overrides(&mut config, &marks(&[]));

        assert!(config.output.merge);
        assert_eq!(config.engine.timeout_secs, 42);
    }
}
