//! Recoverable problems collected while processing a video.
//!
//! File-level failures are [`crate::Error`] values. Everything that only
//! skips a line, a marker, a segment or the merge step is a [`Warning`],
//! carried next to the successful result in an [`Outcome`].

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A recoverable problem that did not stop processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A marker file line did not match `INDEX=MILLIS[*LABEL]`.
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },
    /// An index appeared more than once; the later value was kept.
    DuplicateIndex {
        /// Marker index.
        index: u32,
        /// 1-based line number of the overriding occurrence.
        line: usize,
    },
    /// Odd marker count; this marker had no partner.
    UnpairedMarker {
        /// Marker index.
        index: u32,
    },
    /// A marker pair would produce a window that ends before it starts.
    InvertedRange {
        /// Index supplying the start timestamp.
        start_index: u32,
        /// Index supplying the end timestamp.
        end_index: u32,
        /// Start timestamp in seconds.
        start_seconds: f64,
        /// End timestamp in seconds.
        end_seconds: f64,
    },
    /// The engine failed to produce one clip.
    ExtractionFailed {
        /// Clip that was not produced.
        output: PathBuf,
        /// Engine error text.
        reason: String,
    },
    /// The merge step was requested but no clips exist.
    NothingToMerge,
    /// The engine failed to produce the merged output.
    MergeFailed {
        /// Merged output that was not produced.
        output: PathBuf,
        /// Engine error text.
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line, content } => {
                write!(f, "skipped malformed marker line {line}: '{content}'")
            }
            Self::DuplicateIndex { index, line } => {
                write!(f, "marker {index} redefined on line {line}, keeping the later value")
            }
            Self::UnpairedMarker { index } => {
                write!(f, "marker {index} has no partner and was dropped")
            }
            Self::InvertedRange {
                start_index,
                end_index,
                start_seconds,
                end_seconds,
            } => write!(
                f,
                "markers {} and {} give an inverted range ({start_seconds:.3}s > {end_seconds:.3}s), skipped",
                start_index + 1,
                end_index + 1
            ),
            Self::ExtractionFailed { output, reason } => {
                write!(f, "error creating clip {}: {reason}", output.display())
            }
            Self::NothingToMerge => write!(f, "nothing to merge"),
            Self::MergeFailed { output, reason } => {
                write!(f, "error merging into {}: {reason}", output.display())
            }
        }
    }
}

/// A result together with the warnings produced while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    /// The successful payload.
    pub value: T,
    /// Problems encountered along the way.
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    /// Wrap a value with an empty warning list.
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Wrap a value with the given warnings.
    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// Record a warning.
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Move this outcome's warnings into `sink` and return the value.
    pub fn drain_into(self, sink: &mut Vec<Warning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_display_uses_one_based_numbers() {
        let warning = Warning::InvertedRange {
            start_index: 2,
            end_index: 3,
            start_seconds: 9.0,
            end_seconds: 1.0,
        };
        let text = warning.to_string();
        assert!(text.contains("markers 3 and 4"));
        assert!(text.contains("9.000s > 1.000s"));
    }

    #[test]
    fn test_drain_into_moves_warnings() {
        let outcome = Outcome::with_warnings(7, vec![Warning::NothingToMerge]);
        let mut sink = Vec::new();
        assert_eq!(outcome.drain_into(&mut sink), 7);
        assert_eq!(sink, vec![Warning::NothingToMerge]);
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let json = serde_json::to_value(Warning::UnpairedMarker { index: 4 }).unwrap_or_default();
        assert_eq!(json["kind"], "unpaired_marker");
        assert_eq!(json["index"], 4);
    }
}
