//! Progress display and structured JSON results.

pub mod json_envelope;
pub mod progress;
mod reporter;

pub use json_envelope::{
    ConfigPayload, MarkerSplitPayload, ProbeEntry, ProbePayload, ResultType, UniformPartEntry,
    UniformSplitPayload, VideoEntry, VideoStatus,
};
pub use reporter::emit_json_result;
