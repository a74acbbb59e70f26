//! # Program Loading Tests
//!
//! Binary and text images read from disk, and text parsing errors.

use std::io::Write;
use std::path::Path;

use clockbus_core::sim::loader::{self, ImageFormat, parse_text_image};
use clockbus_core::{SAMPLE_PROGRAM, SimError};
use tempfile::{Builder, NamedTempFile};

/// Creates a temporary file with the given suffix and contents.
fn create_temp_file(suffix: &str, data: &[u8]) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_format_from_extension() {
    assert_eq!(ImageFormat::from_path(Path::new("a.bin")), ImageFormat::Binary);
    assert_eq!(ImageFormat::from_path(Path::new("a.BIN")), ImageFormat::Binary);
    assert_eq!(ImageFormat::from_path(Path::new("a.txt")), ImageFormat::Text);
    assert_eq!(ImageFormat::from_path(Path::new("program")), ImageFormat::Text);
}

#[test]
fn test_load_binary_image() {
    let file = create_temp_file(".bin", &SAMPLE_PROGRAM);
    let image = loader::load_image(file.path()).unwrap();
    assert_eq!(image, SAMPLE_PROGRAM);
}

#[test]
fn test_load_text_image() {
    let text = "# 42 + 73\n0, 8   # LOAD A #8\n2, 9\n3 0\n4 0\n0x2A 0x49\n";
    let file = create_temp_file(".txt", text.as_bytes());
    let image = loader::load_image(file.path()).unwrap();
    assert_eq!(image, SAMPLE_PROGRAM);
}

#[test]
fn test_load_as_overrides_extension() {
    let file = create_temp_file(".bin", b"3 0 4 0");
    let image = loader::load_image_as(file.path(), ImageFormat::Text).unwrap();
    assert_eq!(image, vec![3, 0, 4, 0]);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.bin");
    assert!(matches!(
        loader::load_image(&path),
        Err(SimError::Io { .. })
    ));
}

#[test]
fn test_parse_error_reports_line_and_token() {
    let err = parse_text_image("0 8\n# comment\n2 nine\n").unwrap_err();
    match err {
        SimError::ParseImage { line, token } => {
            assert_eq!(line, 3);
            assert_eq!(token, "nine");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_values_over_a_byte() {
    assert!(matches!(
        parse_text_image("300"),
        Err(SimError::ParseImage { line: 1, .. })
    ));
}

#[test]
fn test_parse_comment_only_text_is_empty() {
    assert_eq!(parse_text_image("# nothing\n\n  \n").unwrap(), Vec::<u8>::new());
}
