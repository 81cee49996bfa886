//! Lossless clip extraction and reassembly.
//!
//! This module turns extraction windows into clip files through a
//! [`crate::engine::MediaEngine`], optionally joins them into one merged
//! file, and plans the equal-length windows used by uniform splitting.

pub mod command;
mod assembler;
mod extractor;
mod uniform;

pub use assembler::{SequenceAssembler, merged_file_name};
pub use extractor::SegmentExtractor;
pub use uniform::{SizeCheck, UniformPart, check_size, part_file_name, plan_uniform_parts};
