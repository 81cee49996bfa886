//! `ffmpeg` / `ffprobe` backed [`MediaEngine`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{Error, Result};

use super::{ConcatManifest, ExtractRequest, MediaEngine, ToolCommand, ToolOutput};

/// Media engine that shells out to the `ffmpeg` command-line tools.
///
/// The [`MediaEngine`] trait is blocking; each call runs the async
/// [`ToolCommand`] on a private single-threaded runtime.
#[derive(Debug)]
pub struct FfmpegEngine {
    ffmpeg: PathBuf,
    ffprobe: Option<PathBuf>,
    timeout: Duration,
    overwrite: bool,
    runtime: tokio::runtime::Runtime,
}

impl FfmpegEngine {
    /// Build an engine from configuration.
    ///
    /// Explicit tool paths win; otherwise `ffmpeg` and `ffprobe` are looked
    /// up on `PATH`. A missing `ffprobe` only disables duration probing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if `ffmpeg` cannot be located, or
    /// [`Error::Internal`] if the runtime cannot be created.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let ffmpeg = resolve_tool("ffmpeg", config.ffmpeg.as_ref()).ok_or(Error::ToolNotFound {
            tool: "ffmpeg".to_string(),
        })?;
        let ffprobe = resolve_tool("ffprobe", config.ffprobe.as_ref());
        if ffprobe.is_none() {
            debug!("ffprobe not found; durations will not be displayed");
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Internal {
                message: format!("failed to create async runtime: {e}"),
            })?;

        Ok(Self {
            ffmpeg,
            ffprobe,
            timeout: config.timeout(),
            overwrite: config.overwrite,
            runtime,
        })
    }

    fn run(&self, program: &Path, args: Vec<String>) -> Result<ToolOutput> {
        let mut cmd = ToolCommand::new(program);
        cmd.args(args).timeout(self.timeout);
        self.runtime.block_on(cmd.execute())
    }
}

impl MediaEngine for FfmpegEngine {
    fn probe_duration(&self, path: &Path) -> Result<f64> {
        let ffprobe = self.ffprobe.as_ref().ok_or(Error::ToolNotFound {
            tool: "ffprobe".to_string(),
        })?;

        let args = [
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "json",
        ]
        .into_iter()
        .map(String::from)
        .chain(std::iter::once(path.to_string_lossy().to_string()))
        .collect();

        let output = self.run(ffprobe, args)?;
        parse_probe_duration(&output.stdout).map_err(|reason| Error::ProbeOutput {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn extract(&self, request: &ExtractRequest<'_>) -> Result<()> {
        self.run(&self.ffmpeg, extract_args(request, self.overwrite))
            .map(|_| ())
    }

    fn concat(&self, manifest: &ConcatManifest, output: &Path) -> Result<()> {
        self.run(&self.ffmpeg, concat_args(manifest.path(), output, self.overwrite))
            .map(|_| ())
    }
}

fn resolve_tool(name: &str, explicit: Option<&PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.clone()),
        None => which::which(name).ok(),
    }
}

/// Flags shared by every invocation: no terminal input, errors only, and an
/// explicit overwrite policy so ffmpeg never prompts.
fn common_args(overwrite: bool) -> Vec<String> {
    vec![
        "-nostdin".to_string(),
        if overwrite { "-y" } else { "-n" }.to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
    ]
}

/// Build the `ffmpeg` arguments for a stream-copy extraction.
///
/// Copies the first video stream and the first audio stream (if any),
/// keeps container metadata, drops chapters, writes a fast-start MP4,
/// ignores unknown streams and shifts negative timestamps to zero.
#[must_use]
pub fn extract_args(request: &ExtractRequest<'_>, overwrite: bool) -> Vec<String> {
    let source = request.source.to_string_lossy();
    let output = request.output.to_string_lossy();
    let start = format_seconds(request.start_seconds);
    let end = format_seconds(request.end_seconds);

    let mut args = common_args(overwrite);
    args.extend(
        [
            "-i",
            source.as_ref(),
            "-ss",
            start.as_str(),
            "-to",
            end.as_str(),
            "-avoid_negative_ts",
            "auto",
            "-map",
            "0:v:0",
            "-c:v",
            "copy",
            "-map",
            "0:a:0?",
            "-c:a",
            "copy",
            "-map_metadata",
            "0",
            "-map_chapters",
            "-1",
            "-movflags",
            "+faststart",
            "-ignore_unknown",
            "-f",
            "mp4",
            output.as_ref(),
        ]
        .map(String::from),
    );
    args
}

/// Build the `ffmpeg` arguments for a stream-copy concat of a manifest.
#[must_use]
pub fn concat_args(manifest: &Path, output: &Path, overwrite: bool) -> Vec<String> {
    let manifest = manifest.to_string_lossy();
    let output = output.to_string_lossy();

    let mut args = common_args(overwrite);
    args.extend(
        [
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
            manifest.as_ref(),
            "-c",
            "copy",
            output.as_ref(),
        ]
        .map(String::from),
    );
    args
}

fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.3}")
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Read `format.duration` from `ffprobe -of json` output.
///
/// # Errors
///
/// Returns a description of the problem if the JSON is invalid or carries
/// no usable duration.
pub fn parse_probe_duration(json: &str) -> std::result::Result<f64, String> {
    let output: ProbeOutput =
        serde_json::from_str(json).map_err(|e| format!("ffprobe JSON parse error: {e}"))?;

    let duration = output
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| "duration not found in probe output".to_string())?;

    duration
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| format!("invalid duration '{duration}'"))
}
