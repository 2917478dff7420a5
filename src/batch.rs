//! Directory batch processing.
//!
//! Every `.pdf` file directly inside the input directory is turned into a
//! `<stem>.json` outline in the output directory. A file that fails is
//! logged and recorded, and the rest of the batch carries on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::outline::extract_outline_file;
use crate::parser::OutlineOptions;
use crate::render::to_json;

/// Outcome of one input file.
#[derive(Debug)]
pub enum FileStatus<'a> {
    /// The outline was written to this path
    Written(&'a Path),
    /// The file was skipped with this error
    Failed(&'a Error),
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Outline files written, in processing order
    pub written: Vec<PathBuf>,
    /// Input files that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Number of input files seen.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Whether every input file produced an outline.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// PDF files directly inside `dir`, sorted by path.
pub fn collect_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(has_pdf_extension);
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for an input PDF: same stem, `.json` extension.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input.file_name().map(PathBuf::from).unwrap_or_default();
    output_dir.join(name).with_extension("json")
}

/// Process every PDF in `input_dir`, writing outlines to `output_dir`.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &OutlineOptions,
) -> Result<BatchReport> {
    process_directory_with(input_dir, output_dir, options, |_, _| {})
}

/// Like [`process_directory`], calling `on_file` after each input file.
///
/// A missing input directory is the only per-run fatal condition besides
/// failing to create the output directory.
pub fn process_directory_with<F>(
    input_dir: &Path,
    output_dir: &Path,
    options: &OutlineOptions,
    mut on_file: F,
) -> Result<BatchReport>
where
    F: FnMut(&Path, FileStatus<'_>),
{
    if !input_dir.is_dir() {
        return Err(Error::InputDirMissing(input_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir)?;

    let files = collect_pdf_files(input_dir)?;
    let mut report = BatchReport::default();

    if files.is_empty() {
        log::warn!("No PDF files found in '{}'", input_dir.display());
        return Ok(report);
    }

    log::info!("Found {} PDF files to process", files.len());

    for input in files {
        match process_file(&input, output_dir, options) {
            Ok(output) => {
                log::info!("Saved outline to {}", output.display());
                on_file(&input, FileStatus::Written(&output));
                report.written.push(output);
            }
            Err(e) => {
                log::error!("Error processing {}: {}", input.display(), e);
                on_file(&input, FileStatus::Failed(&e));
                report.failed.push((input, e.to_string()));
            }
        }
    }

    log::info!(
        "Processed {} files: {} written, {} failed",
        report.total(),
        report.written.len(),
        report.failed.len()
    );

    Ok(report)
}

/// Extract one file's outline and write it next to the others.
pub fn process_file(input: &Path, output_dir: &Path, options: &OutlineOptions) -> Result<PathBuf> {
    let outline = extract_outline_file(input, options)?;
    let json = to_json(&outline, options.json_format)?;

    let output = output_path_for(input, output_dir);
    fs::write(&output, json)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_for() {
        let out = output_path_for(Path::new("/in/report.final.PDF"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/report.final.json"));
    }

    #[test]
    fn test_collect_pdf_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let files = collect_pdf_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = process_directory(
            &dir.path().join("missing"),
            &dir.path().join("out"),
            &OutlineOptions::default(),
        );
        assert!(matches!(result, Err(Error::InputDirMissing(_))));
    }

    #[test]
    fn test_corrupt_file_is_recorded() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("broken.pdf"), b"this is not a pdf").unwrap();

        let mut seen = Vec::new();
        let report = process_directory_with(
            input.path(),
            output.path(),
            &OutlineOptions::default(),
            |path, status| seen.push((path.to_path_buf(), matches!(status, FileStatus::Failed(_)))),
        )
        .unwrap();

        assert!(report.written.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_success());
        assert_eq!(seen.len(), 1);
        assert!(seen[0].1);
        assert!(!output.path().join("broken.json").exists());
    }
}
