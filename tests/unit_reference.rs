// Unit tests for the reference list loader.
//
// Covers field trimming, order preservation, blank-line handling, the
// malformed-record and file-access failure modes, and the documented
// pass-through of duplicate codes.

use std::io::Write;

use taxon::error::Error;
use taxon::reference::ReferenceList;

fn write_reference(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn loads_records_in_source_order() {
    let file = write_reference("0112;Raising of cattle\n6201;Custom software development\n");
    let list = ReferenceList::load(file.path()).unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list.entries()[0].code, "0112");
    assert_eq!(list.entries()[0].description, "Raising of cattle");
    assert_eq!(list.entries()[1].code, "6201");
}

#[test]
fn trims_both_fields_independently() {
    let file = write_reference("  0112  ;  Raising of cattle  \n");
    let list = ReferenceList::load(file.path()).unwrap();

    assert_eq!(list.entries()[0].code, "0112");
    assert_eq!(list.entries()[0].description, "Raising of cattle");
}

#[test]
fn skips_blank_lines() {
    let file = write_reference("0112;Raising of cattle\n\n   \n6201;Custom software development\n");
    let list = ReferenceList::load(file.path()).unwrap();
    assert_eq!(list.len(), 2);
}

#[test]
fn missing_file_is_file_access_error() {
    let err = ReferenceList::load("does/not/exist.csv").unwrap_err();
    assert!(
        matches!(err, Error::FileAccess { .. }),
        "expected FileAccess, got {err:?}"
    );
}

#[test]
fn line_without_semicolon_is_malformed() {
    let file = write_reference("0112;Raising of cattle\nno delimiter here\n");
    let err = ReferenceList::load(file.path()).unwrap_err();
    match err {
        Error::MalformedRecord { line, record, .. } => {
            assert_eq!(line, 2);
            assert_eq!(record, "no delimiter here");
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn line_with_extra_semicolon_is_malformed() {
    let file = write_reference("0112;Raising of cattle; and buffaloes\n");
    let err = ReferenceList::load(file.path()).unwrap_err();
    assert!(
        matches!(err, Error::MalformedRecord { line: 1, .. }),
        "expected MalformedRecord at line 1, got {err:?}"
    );
}

#[test]
fn duplicate_codes_pass_through() {
    let file = write_reference("0112;Raising of cattle\n0112;Cattle ranching\n");
    let list = ReferenceList::load(file.path()).unwrap();

    assert_eq!(list.len(), 2, "duplicates are the caller's problem, not the loader's");
    assert_eq!(list.entries()[0].description, "Raising of cattle");
    assert_eq!(list.entries()[1].description, "Cattle ranching");
}

#[test]
fn empty_file_loads_empty_list() {
    let file = write_reference("");
    let list = ReferenceList::load(file.path()).unwrap();
    assert!(list.is_empty());
}
