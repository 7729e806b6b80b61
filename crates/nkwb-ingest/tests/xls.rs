//! Failure modes of opening exports.

use std::fs;
use std::io::Write;
use std::path::Path;

use nkwb_ingest::{IngestError, list_export_files, open_sheet, read_export, read_exports};

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_export(&dir.path().join("absent.xls")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }), "{err}");
}

#[test]
fn garbage_container_is_corrupted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.xls");
    fs::write(&path, b"this is not a compound document, just text").unwrap();

    let err = read_export(&path).unwrap_err();
    assert!(err.is_corruption(), "{err}");
    assert!(err.to_string().contains("saving it again with Excel"));
}

#[test]
fn container_without_workbook_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.xls");
    let mut container = cfb::create(&path).unwrap();
    container
        .create_stream("/SummaryInformation")
        .unwrap()
        .write_all(b"metadata")
        .unwrap();
    container.flush().unwrap();
    drop(container);

    let err = open_sheet(&path).unwrap_err();
    assert!(matches!(err, IngestError::InvalidWorkbook { .. }), "{err}");
    assert!(!err.is_corruption());
}

#[test]
fn first_bad_file_aborts_multi_read() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("a.xls");
    fs::write(&bad, [0u8; 16]).unwrap();
    let missing = dir.path().join("b.xls");

    let err = read_exports(&[bad.as_path(), missing.as_path()]).unwrap_err();
    assert!(err.is_corruption(), "{err}");
}

#[test]
fn no_exports_merge_to_nothing() {
    let merged = read_exports::<&Path>(&[]).unwrap();
    assert!(merged.is_empty());
}

#[test]
fn discovery_feeds_the_reader() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.xls"), b"garbage").unwrap();
    fs::write(dir.path().join("readme.md"), b"# exports").unwrap();

    let files = list_export_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert!(read_exports(files.as_slice()).unwrap_err().is_corruption());
}
