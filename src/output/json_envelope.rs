//! JSON envelope types for CLI output.
//!
//! Structured output lets marksplit be driven by scripts: every result is a
//! single envelope on stdout.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::warning::Warning;

/// Envelope format version.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping all CLI output events.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T> {
    /// API specification version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Final result.
    Result,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Marker-driven clip extraction over a directory.
    MarkerSplit,
    /// Equal-parts split.
    UniformSplit,
    /// Duration probe.
    Probe,
    /// Configuration display.
    Config,
}

/// Per-video status in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Markers were read and ranges extracted.
    Processed,
    /// No marker file, or nothing to do.
    Skipped,
    /// A file-level error stopped this video.
    Failed,
}

// ============================================================================
// Result Payloads
// ============================================================================

/// Payload for a marker split batch.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerSplitPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Directory that was scanned.
    pub directory: PathBuf,
    /// Videos that were processed.
    pub processed: usize,
    /// Videos that were skipped or failed.
    pub skipped: usize,
    /// Total clips written.
    pub total_clips: usize,
    /// Per-video details, in processing order.
    pub videos: Vec<VideoEntry>,
}

/// One video in a marker split batch.
#[derive(Debug, Clone, Serialize)]
pub struct VideoEntry {
    /// Video file.
    pub video: PathBuf,
    /// Outcome for this video.
    pub status: VideoStatus,
    /// Probed duration, if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Number of markers read.
    pub markers: usize,
    /// Clips written, in extraction order.
    pub clips: Vec<PathBuf>,
    /// Merged output, if one was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<PathBuf>,
    /// Non-fatal problems.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
    /// File-level error message, for failed videos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload for an equal-parts split.
#[derive(Debug, Clone, Serialize)]
pub struct UniformSplitPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Output directory for parts.
    pub output_dir: PathBuf,
    /// Sources that were split.
    pub total_files: usize,
    /// Parts written.
    pub total_parts: usize,
    /// Parts written, in order.
    pub parts: Vec<UniformPartEntry>,
}

/// A single written part.
#[derive(Debug, Clone, Serialize)]
pub struct UniformPartEntry {
    /// Source video.
    pub source: PathBuf,
    /// 1-based part number.
    pub number: u32,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
    /// Output file path.
    pub output_file: PathBuf,
}

/// Payload for probe results.
#[derive(Debug, Clone, Serialize)]
pub struct ProbePayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// One entry per requested file.
    pub files: Vec<ProbeEntry>,
}

/// Probe result for one file.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeEntry {
    /// Probed file.
    pub path: PathBuf,
    /// Duration in seconds, if the probe succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Probe error, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload for config show.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Config file location.
    pub config_path: PathBuf,
    /// Effective configuration.
    pub config: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serialization() {
        let payload = ProbePayload {
            result_type: ResultType::Probe,
            files: vec![ProbeEntry {
                path: PathBuf::from("a.mp4"),
                duration_seconds: Some(12.5),
                error: None,
            }],
        };
        let envelope = JsonEnvelope::new(EventType::Result, payload);

        let json = serde_json::to_string(&envelope).expect("serialize");
        assert!(json.contains("\"spec_version\":\"1.0\""));
        assert!(json.contains("\"event\":\"result\""));
        assert!(json.contains("\"result_type\":\"probe\""));
        assert!(json.contains("\"duration_seconds\":12.5"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_result_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ResultType::MarkerSplit).expect("serialize"),
            "\"marker_split\""
        );
        assert_eq!(
            serde_json::to_string(&ResultType::UniformSplit).expect("serialize"),
            "\"uniform_split\""
        );
    }

    #[test]
    fn test_video_entry_includes_warnings() {
        let entry = VideoEntry {
            video: PathBuf::from("v.mp4"),
            status: VideoStatus::Processed,
            duration_seconds: None,
            markers: 3,
            clips: vec![PathBuf::from("v_clip_2_to_3.mp4")],
            merged: None,
            warnings: vec![Warning::UnpairedMarker { index: 0 }],
            error: None,
        };

        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(json.contains("\"status\":\"processed\""));
        assert!(json.contains("\"kind\":\"unpaired_marker\""));
        assert!(!json.contains("\"merged\""));
    }
}
