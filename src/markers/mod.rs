//! Marker files and the extraction ranges derived from them.
//!
//! A marker file is parsed into an ordered [`MarkerSet`], which the pairing
//! step turns into [`ExtractionRange`]s in descending marker order.

mod pairing;
mod parser;

pub use pairing::{ExtractionRange, pair_markers};
pub use parser::{Marker, MarkerSet, decode_marker_bytes, parse_markers, read_marker_file};
