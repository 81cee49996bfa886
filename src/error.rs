//! Error types for marksplit.

use std::path::PathBuf;

/// Result type alias for marksplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for marksplit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Marker file does not exist.
    #[error("marker file not found: {path}")]
    MarkerNotFound {
        /// Path to the missing marker file.
        path: PathBuf,
    },

    /// Failed to read marker file.
    #[error("failed to read marker file '{path}'")]
    MarkerRead {
        /// Path to the marker file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Marker file bytes are not valid in the configured encoding.
    #[error("marker file '{path}' is not valid {encoding}: {reason}")]
    MarkerDecode {
        /// Path to the marker file.
        path: PathBuf,
        /// Configured encoding name.
        encoding: String,
        /// Description of the decoding failure.
        reason: String,
    },

    /// Source video does not exist.
    #[error("video file not found: {path}")]
    VideoNotFound {
        /// Path to the missing video.
        path: PathBuf,
    },

    /// External media tool could not be located.
    #[error("{tool} not found (install it or set engine.{tool} in the config file)")]
    ToolNotFound {
        /// Tool name.
        tool: String,
    },

    /// External media engine invocation failed.
    #[error("{tool} failed: {message}")]
    Engine {
        /// Tool name.
        tool: String,
        /// Description of the failure.
        message: String,
    },

    /// Probe output could not be interpreted.
    #[error("failed to read duration of '{path}': {reason}")]
    ProbeOutput {
        /// Path to the probed file.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Failed to write concat manifest.
    #[error("failed to write concat manifest")]
    ManifestWrite {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a directory during discovery.
    #[error("failed to read directory '{path}'")]
    DirectoryRead {
        /// Path to the directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
