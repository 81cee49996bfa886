//! CLI for the equal-parts split subcommand.

use std::path::PathBuf;

use clap::Args;

use super::validators::parse_size_mb;

/// Arguments for the split subcommand.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Video files or directories to split.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Number of equal parts per video.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..),
          env = "MARKSPLIT_SPLIT_PARTS")]
    pub parts: Option<u32>,

    /// Skip videos smaller than this many megabytes.
    #[arg(long, value_parser = parse_size_mb)]
    pub min_size_mb: Option<u64>,

    /// Skip videos larger than this many megabytes.
    #[arg(long, value_parser = parse_size_mb)]
    pub max_size_mb: Option<u64>,

    /// Output directory for the parts.
    #[arg(short, long, env = "MARKSPLIT_SPLIT_OUTPUT_DIR")]
    pub output: Option<PathBuf>,
}
