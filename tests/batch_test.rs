//! Integration tests for directory batch processing.

mod common;

use std::fs;

use common::{build_pdf, Line};
use pdfoutline::batch::{process_directory, process_directory_with, FileStatus};
use pdfoutline::{Error, JsonFormat, OutlineOptions};
use tempfile::TempDir;

fn valid_pdf() -> Vec<u8> {
    build_pdf(&[vec![
        Line::new("INTRODUCTION", 16.0, true, 50.0, 700.0),
        Line::new("Some body text", 10.0, false, 50.0, 680.0),
    ]])
}

#[test]
fn test_valid_and_corrupt_files() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("good.pdf"), valid_pdf()).unwrap();
    fs::write(input.path().join("bad.pdf"), b"%PDF-1.4\nthis is not a real pdf").unwrap();

    let report = process_directory(input.path(), output.path(), &OutlineOptions::default()).unwrap();

    assert_eq!(report.written, vec![output.path().join("good.json")]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("bad.pdf"));

    let written: Vec<_> = fs::read_dir(output.path()).unwrap().collect();
    assert_eq!(written.len(), 1);

    let json = fs::read_to_string(output.path().join("good.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["title"], "INTRODUCTION");
    assert_eq!(value["outline"][0]["level"], "H1");
    assert_eq!(value["outline"][0]["page"], 1);
    assert!(json.contains("\n  \"outline\": ["));
}

#[test]
fn test_compact_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("doc.pdf"), valid_pdf()).unwrap();

    let options = OutlineOptions::new().with_json_format(JsonFormat::Compact);
    process_directory(input.path(), output.path(), &options).unwrap();

    let json = fs::read_to_string(output.path().join("doc.json")).unwrap();
    assert!(!json.contains('\n'));
}

#[test]
fn test_missing_input_directory() {
    let root = TempDir::new().unwrap();
    let output = root.path().join("out");

    let result = process_directory(&root.path().join("nope"), &output, &OutlineOptions::default());

    assert!(matches!(result, Err(Error::InputDirMissing(_))));
    assert!(!output.exists());
}

#[test]
fn test_output_directory_is_created() {
    let input = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let output = root.path().join("nested").join("out");
    fs::write(input.path().join("doc.pdf"), valid_pdf()).unwrap();

    let report = process_directory(input.path(), &output, &OutlineOptions::default()).unwrap();

    assert!(report.is_success());
    assert!(output.join("doc.json").is_file());
}

#[test]
fn test_no_pdf_files() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("readme.txt"), b"hello").unwrap();

    let report = process_directory(input.path(), output.path(), &OutlineOptions::default()).unwrap();

    assert_eq!(report.total(), 0);
}

#[test]
fn test_progress_callback_order() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("b.pdf"), valid_pdf()).unwrap();
    fs::write(input.path().join("a.pdf"), b"junk").unwrap();

    let mut events = Vec::new();
    process_directory_with(
        input.path(),
        output.path(),
        &OutlineOptions::default(),
        |path, status| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            events.push((name, matches!(status, FileStatus::Written(_))));
        },
    )
    .unwrap();

    assert_eq!(
        events,
        vec![("a.pdf".to_string(), false), ("b.pdf".to_string(), true)]
    );
}
