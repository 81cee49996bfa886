//! Tests for marker file reading.

use std::io::Write;

use marksplit::config::MarkerEncoding;
use marksplit::error::Error;
use marksplit::markers::read_marker_file;
use marksplit::warning::Warning;
use tempfile::NamedTempFile;

fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

fn marker_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".pbf").unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_player_bookmark_file() {
    let text = "[Bookmark]\r\n0=1000*Start\r\n1=4000*End\r\n2=7000*Again\r\n3=10000*Stop\r\n";
    let file = marker_file(&utf16le_with_bom(text));

    let outcome = read_marker_file(file.path(), MarkerEncoding::Utf16).unwrap();

    assert_eq!(outcome.value.len(), 4);
    assert_eq!(outcome.value.timestamp(0), Some(1.0));
    assert_eq!(outcome.value.timestamp(3), Some(10.0));
    // the section header is the only malformed line
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn test_big_endian_bom_is_honoured() {
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend("5=2500\n".encode_utf16().flat_map(u16::to_be_bytes));
    let file = marker_file(&bytes);

    let outcome = read_marker_file(file.path(), MarkerEncoding::Utf16).unwrap();
    assert_eq!(outcome.value.timestamp(5), Some(2.5));
}

#[test]
fn test_every_malformed_line_is_reported() {
    let text = "abc\n=100\n1=\n2=x*label\n-1=5\n";
    let file = marker_file(text.as_bytes());

    let outcome = read_marker_file(file.path(), MarkerEncoding::Utf8).unwrap();

    assert!(outcome.value.is_empty());
    assert_eq!(outcome.warnings.len(), 5);
    assert!(
        outcome
            .warnings
            .iter()
            .all(|w| matches!(w, Warning::MalformedLine { .. }))
    );
}

#[test]
fn test_duplicate_index_keeps_last_value() {
    let file = marker_file(b"1=1000\n1=3000\n");

    let outcome = read_marker_file(file.path(), MarkerEncoding::Utf8).unwrap();

    assert_eq!(outcome.value.timestamp(1), Some(3.0));
    assert_eq!(
        outcome.warnings,
        vec![Warning::DuplicateIndex { index: 1, line: 2 }]
    );
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = read_marker_file(&dir.path().join("absent.pbf"), MarkerEncoding::Utf16);
    assert!(matches!(result, Err(Error::MarkerNotFound { .. })));
}

#[test]
fn test_invalid_bytes_are_a_decode_error() {
    let file = marker_file(&[0x30, 0x3D, 0xFF, 0xFE, 0xFD]);
    let result = read_marker_file(file.path(), MarkerEncoding::Utf8);
    assert!(matches!(result, Err(Error::MarkerDecode { .. })));
}
