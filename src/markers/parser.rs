//! Marker file parsing.
//!
//! Marker files are line-oriented: `INDEX=MILLIS*LABEL`, where `INDEX` is a
//! non-negative integer, `MILLIS` a non-negative millisecond count and
//! everything after the first `*` is an ignored label. Lines that do not
//! match are skipped individually and reported as warnings.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::MarkerEncoding;
use crate::constants::{MILLIS_PER_SECOND, marker_syntax};
use crate::error::{Error, Result};
use crate::warning::{Outcome, Warning};

/// One labeled timestamp from a marker file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Marker index as written in the file.
    pub index: u32,
    /// Timestamp in seconds.
    pub timestamp_seconds: f64,
}

/// All markers of one file, keyed by index.
///
/// Immutable once parsed; iteration is in ascending index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    markers: BTreeMap<u32, f64>,
}

impl MarkerSet {
    /// Number of markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the set holds no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Timestamp of the marker with the given index.
    #[must_use]
    pub fn timestamp(&self, index: u32) -> Option<f64> {
        self.markers.get(&index).copied()
    }

    /// Markers in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.markers.iter().map(|(&index, &timestamp_seconds)| Marker {
            index,
            timestamp_seconds,
        })
    }

    /// Marker indices, largest first.
    #[must_use]
    pub fn indices_descending(&self) -> Vec<u32> {
        self.markers.keys().rev().copied().collect()
    }

    /// Insert a marker, returning the previous timestamp for that index.
    fn insert(&mut self, index: u32, timestamp_seconds: f64) -> Option<f64> {
        self.markers.insert(index, timestamp_seconds)
    }
}

impl FromIterator<(u32, f64)> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            markers: iter.into_iter().collect(),
        }
    }
}

/// Read and parse a marker file.
///
/// # Errors
///
/// Returns [`Error::MarkerNotFound`] if the file does not exist,
/// [`Error::MarkerDecode`] if its bytes are not valid in `encoding`, and
/// [`Error::MarkerRead`] for other I/O failures. Malformed lines are not
/// errors; they are reported in the outcome's warnings.
pub fn read_marker_file(path: &Path, encoding: MarkerEncoding) -> Result<Outcome<MarkerSet>> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MarkerNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::MarkerRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let text = decode_marker_bytes(&bytes, encoding).map_err(|reason| Error::MarkerDecode {
        path: path.to_path_buf(),
        encoding: encoding.to_string(),
        reason,
    })?;

    Ok(parse_markers(&text))
}

/// Decode raw marker file bytes with the configured encoding.
///
/// A leading byte-order mark is removed. For [`MarkerEncoding::Utf16`] the
/// mark also selects the byte order; without one, little-endian is assumed.
///
/// # Errors
///
/// Returns a description of the problem if the bytes are not valid text in
/// the requested encoding.
pub fn decode_marker_bytes(bytes: &[u8], encoding: MarkerEncoding) -> std::result::Result<String, String> {
    let text = match encoding {
        MarkerEncoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())?,
        MarkerEncoding::Utf16 => match bytes {
            [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes)?,
            [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes)?,
            _ => decode_utf16(bytes, u16::from_le_bytes)?,
        },
        MarkerEncoding::Utf16le => decode_utf16(bytes, u16::from_le_bytes)?,
        MarkerEncoding::Utf16be => decode_utf16(bytes, u16::from_be_bytes)?,
    };

    Ok(match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> std::result::Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!("truncated data ({} bytes is not a whole number of code units)", bytes.len()));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();

    String::from_utf16(&units).map_err(|e| e.to_string())
}

/// Parse decoded marker text.
///
/// Never fails: every non-empty line that cannot be parsed yields a
/// [`Warning::MalformedLine`], and a repeated index keeps the later value
/// with a [`Warning::DuplicateIndex`].
#[must_use]
pub fn parse_markers(text: &str) -> Outcome<MarkerSet> {
    let mut outcome = Outcome::new(MarkerSet::default());

    for (line_idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let line_number = line_idx + 1;
        match parse_line(line) {
            Some((index, seconds)) => {
                if outcome.value.insert(index, seconds).is_some() {
                    outcome.warn(Warning::DuplicateIndex {
                        index,
                        line: line_number,
                    });
                }
            }
            None => outcome.warn(Warning::MalformedLine {
                line: line_number,
                content: line.to_string(),
            }),
        }
    }

    outcome
}

/// Parse one trimmed line into `(index, seconds)`.
fn parse_line(line: &str) -> Option<(u32, f64)> {
    let (key, value) = line.split_once(marker_syntax::KEY_SEPARATOR)?;

    let key = key.trim();
    if !is_ascii_number(key) {
        return None;
    }
    let index: u32 = key.parse().ok()?;

    let millis = value
        .split_once(marker_syntax::LABEL_SEPARATOR)
        .map_or(value, |(millis, _label)| millis);
    if !is_ascii_number(millis) {
        return None;
    }
    let millis: u64 = millis.parse().ok()?;

    #[allow(clippy::cast_precision_loss)]
    let seconds = millis as f64 / MILLIS_PER_SECOND;
    Some((index, seconds))
}

fn is_ascii_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
