//! CLI argument definitions.

use crate::config::{MarkerEncoding, OutputMode};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::split::SplitArgs;
use super::validators::{parse_encoding, parse_extension};

/// Cut videos into lossless clips at bookmarked positions.
#[derive(Debug, Parser)]
#[command(name = "marksplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for marker-driven splitting (the default mode).
    #[command(flatten)]
    pub marks: MarksArgs,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "MARKSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors; hide progress bars.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output mode for results.
    #[arg(long, value_enum, default_value_t = OutputMode::Human, global = true)]
    pub output_mode: OutputMode,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Split videos into equal-length parts.
    Split(SplitArgs),
    /// Print the duration of media files.
    Probe {
        /// Files to probe.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for marker-driven splitting.
#[derive(Debug, Args)]
pub struct MarksArgs {
    /// Directory to scan for videos and their marker files.
    #[arg(short, long, default_value = ".", env = "MARKSPLIT_DIR")]
    pub dir: PathBuf,

    /// Merge the clips of each video into one file.
    #[arg(long)]
    pub merge: bool,

    /// Output directory (default: same as each video).
    #[arg(short, long, env = "MARKSPLIT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Marker file text encoding (utf-16, utf-16le, utf-16be, utf-8).
    #[arg(long, value_parser = parse_encoding, env = "MARKSPLIT_ENCODING")]
    pub encoding: Option<MarkerEncoding>,

    /// Marker file extension.
    #[arg(long, value_parser = parse_extension, env = "MARKSPLIT_MARKER_EXTENSION")]
    pub extension: Option<String>,

    /// Timeout for one ffmpeg invocation, in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..),
          env = "MARKSPLIT_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Let ffmpeg replace existing output files.
    #[arg(long)]
    pub overwrite: bool,

    /// Hide progress bars.
    #[arg(long)]
    pub no_progress: bool,
}
