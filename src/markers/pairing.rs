//! Marker pairing.
//!
//! Marker indices are sorted in descending order and consumed two at a
//! time. Within each pair the first (larger) index supplies the end of the
//! window and the second (smaller) index supplies its start, so with
//! markers 1..=4 the content between 1 and 2 and between 3 and 4 is
//! selected while the content between 2 and 3 is not. Ranges keep this
//! descending processing order; clip names and merge order depend on it.

use crate::constants::naming;
use crate::warning::{Outcome, Warning};

use super::MarkerSet;

/// A window of source content destined to become one clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionRange {
    /// Window start in seconds.
    pub start_seconds: f64,
    /// Window end in seconds, never before `start_seconds`.
    pub end_seconds: f64,
    /// Marker index supplying the start.
    pub start_index: u32,
    /// Marker index supplying the end.
    pub end_index: u32,
}

impl ExtractionRange {
    /// Length of the window in seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }

    /// Clip file name for this range.
    ///
    /// Format: `{stem}_clip_{from}_to_{to}.mp4`, with 1-based marker numbers.
    #[must_use]
    pub fn clip_file_name(&self, video_stem: &str) -> String {
        format!(
            "{video_stem}{}{}{}{}.{}",
            naming::CLIP_INFIX,
            u64::from(self.start_index) + 1,
            naming::CLIP_TO,
            u64::from(self.end_index) + 1,
            naming::OUTPUT_EXTENSION
        )
    }
}

/// Derive extraction ranges from a marker set.
///
/// Produces one range per complete pair, in descending pair order. A
/// trailing unpaired marker yields [`Warning::UnpairedMarker`]; a pair whose
/// start lies after its end is not emitted and yields
/// [`Warning::InvertedRange`].
#[must_use]
pub fn pair_markers(markers: &MarkerSet) -> Outcome<Vec<ExtractionRange>> {
    let indices = markers.indices_descending();
    let mut outcome = Outcome::new(Vec::with_capacity(indices.len() / 2));

    for pair in indices.chunks(2) {
        let &[even, odd] = pair else {
            outcome.warn(Warning::UnpairedMarker { index: pair[0] });
            continue;
        };

        let (Some(end_seconds), Some(start_seconds)) =
            (markers.timestamp(even), markers.timestamp(odd))
        else {
            continue;
        };

        if start_seconds > end_seconds {
            outcome.warn(Warning::InvertedRange {
                start_index: odd,
                end_index: even,
                start_seconds,
                end_seconds,
            });
            continue;
        }

        outcome.value.push(ExtractionRange {
            start_seconds,
            end_seconds,
            start_index: odd,
            end_index: even,
        });
    }

    outcome
}
