//! Processing pipeline components.

mod batch;
mod coordinator;
mod processor;

pub use batch::{BatchSummary, process_batch};
pub use coordinator::{
    ProcessOptions, collect_input_videos, discover_videos, ensure_dir, marker_path_for,
    output_dir_for,
};
pub use processor::{VideoReport, process_video};
