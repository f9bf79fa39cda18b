//! Raw text persistence and file naming.
//!
//! Successful fetches land in `Raw_Data/{Subject}_Source_{N}.txt`, UTF-8,
//! one file per URL, N being the 1-based position of the URL in the seed
//! list. Each file starts with `Role Model:` and `Source URL:` header lines;
//! the curation phase reads the former to infer the subject.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{ColligoError, Result};

/// Default directory for raw text output.
pub const RAW_DATA_DIR: &str = "Raw_Data";

/// Makes a subject name safe for filenames: whitespace runs become single
/// underscores and anything outside `[A-Za-z0-9_-]` is dropped.
pub fn sanitize_subject(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Deterministic output filename for one seed URL.
pub fn raw_text_filename(subject: &str, index: usize) -> String {
    format!("{}_Source_{}.txt", sanitize_subject(subject), index)
}

/// Creates the output directory. Failure here is a batch-fatal
/// configuration error, not a per-URL outcome.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|e| ColligoError::Config(format!("cannot create output directory {}: {}", dir.display(), e)))
}

/// Writes one extracted text to its output file, overwriting any previous
/// run's file for the same subject and index.
pub fn write_raw_text(dir: &Path, subject: &str, index: usize, url: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(raw_text_filename(subject, index));
    let contents = format!("Role Model: {}\nSource URL: {}\n\n{}\n", subject.trim(), url, text);
    fs::write(&path, contents)?;
    Ok(path)
}
