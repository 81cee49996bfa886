//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "marksplit";

/// Default marker file extension (`PotPlayer` bookmark files).
pub const DEFAULT_MARKER_EXTENSION: &str = "pbf";

/// Default timeout for a single external engine invocation, in seconds.
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 3600;

/// Milliseconds per second, used when converting marker values.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Video file extensions considered during directory discovery.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov"];

/// Marker file syntax.
pub mod marker_syntax {
    /// Separator between marker index and value.
    pub const KEY_SEPARATOR: char = '=';
    /// Separator between the millisecond value and the label.
    pub const LABEL_SEPARATOR: char = '*';
}

/// Output naming.
pub mod naming {
    /// Infix between the video stem and the marker numbers of a clip.
    pub const CLIP_INFIX: &str = "_clip_";
    /// Infix between the two marker numbers of a clip.
    pub const CLIP_TO: &str = "_to_";
    /// Suffix appended to the video stem for the merged output.
    pub const MERGED_SUFFIX: &str = " - BSE - merged_video";
    /// Infix for uniformly split parts.
    pub const PART_INFIX: &str = " - part ";
    /// Container extension for every produced file.
    pub const OUTPUT_EXTENSION: &str = "mp4";
}

/// Uniform split defaults.
pub mod split {
    /// Default number of equal parts.
    pub const DEFAULT_PARTS: u32 = 4;
    /// Default minimum source size in megabytes.
    pub const DEFAULT_MIN_SIZE_MB: u64 = 100;
    /// Default maximum source size in megabytes.
    pub const DEFAULT_MAX_SIZE_MB: u64 = 2000;
    /// Default output directory for split parts.
    pub const DEFAULT_OUTPUT_DIR: &str = "output_parts";
    /// Bytes per megabyte.
    pub const BYTES_PER_MB: u64 = 1024 * 1024;
}
