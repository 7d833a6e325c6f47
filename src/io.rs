//! File helpers for rewriting Markdown documents.

use std::{fs, path::Path};

use tracing::info;

use crate::process::{FormatOpts, process_stream_opts};

/// Read a document as owned lines.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Rewrite a file in place.
///
/// # Errors
/// Returns an error if reading or writing the file fails.
pub fn rewrite(path: &Path, opts: &FormatOpts) -> std::io::Result<()> {
    let lines = read_lines(path)?;
    info!(path = %path.display(), lines = lines.len(), "rewriting");
    let fixed = process_stream_opts(&lines, opts);
    fs::write(path, fixed.join("\n") + "\n")
}
