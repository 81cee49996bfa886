//! Configuration type definitions.

use crate::constants::{
    DEFAULT_ENGINE_TIMEOUT_SECS, DEFAULT_MARKER_EXTENSION, split as split_defaults,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Marker file settings.
    #[serde(default)]
    pub markers: MarkerConfig,

    /// External media engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Uniform split settings.
    #[serde(default)]
    pub split: SplitConfig,
}

/// Marker file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Text encoding of marker files.
    pub encoding: MarkerEncoding,

    /// Marker file extension, without the leading dot.
    pub extension: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            encoding: MarkerEncoding::default(),
            extension: DEFAULT_MARKER_EXTENSION.to_string(),
        }
    }
}

/// Text encoding used to decode marker files.
///
/// The encoding is a deployment constant; it is never guessed from content
/// beyond honouring a byte-order mark where the encoding allows one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarkerEncoding {
    /// UTF-16 with optional byte-order mark, little-endian when absent.
    #[default]
    Utf16,
    /// UTF-16 little-endian.
    Utf16le,
    /// UTF-16 big-endian.
    Utf16be,
    /// UTF-8 with optional byte-order mark.
    Utf8,
}

impl std::fmt::Display for MarkerEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf16 => write!(f, "utf-16"),
            Self::Utf16le => write!(f, "utf-16le"),
            Self::Utf16be => write!(f, "utf-16be"),
            Self::Utf8 => write!(f, "utf-8"),
        }
    }
}

impl std::str::FromStr for MarkerEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "").as_str() {
            "utf16" => Ok(Self::Utf16),
            "utf16le" => Ok(Self::Utf16le),
            "utf16be" => Ok(Self::Utf16be),
            "utf8" => Ok(Self::Utf8),
            other => Err(format!("unknown marker encoding: {other}")),
        }
    }
}

/// External media engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Explicit path to `ffmpeg` (looked up on `PATH` when unset).
    pub ffmpeg: Option<PathBuf>,

    /// Explicit path to `ffprobe` (looked up on `PATH` when unset).
    pub ffprobe: Option<PathBuf>,

    /// Maximum wall-clock time for one engine invocation, in seconds.
    pub timeout_secs: u64,

    /// Let the engine replace existing output files.
    pub overwrite: bool,
}

impl EngineConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg: None,
            ffprobe: None,
            timeout_secs: DEFAULT_ENGINE_TIMEOUT_SECS,
            overwrite: false,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for clips and merged files (None = next to each video).
    pub dir: Option<PathBuf>,

    /// Merge clips after extraction.
    pub merge: bool,
}

/// Uniform split settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Number of equal parts per video.
    pub parts: u32,

    /// Minimum source size in megabytes.
    pub min_size_mb: u64,

    /// Maximum source size in megabytes.
    pub max_size_mb: u64,

    /// Directory receiving the parts.
    pub output_dir: PathBuf,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            parts: split_defaults::DEFAULT_PARTS,
            min_size_mb: split_defaults::DEFAULT_MIN_SIZE_MB,
            max_size_mb: split_defaults::DEFAULT_MAX_SIZE_MB,
            output_dir: PathBuf::from(split_defaults::DEFAULT_OUTPUT_DIR),
        }
    }
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    /// Human-readable logs and progress bars.
    #[default]
    Human,
    /// A single JSON result envelope.
    Json,
}

impl OutputMode {
    /// Whether output is machine-readable.
    #[must_use]
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}
