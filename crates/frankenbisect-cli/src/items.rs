//! Line-item file I/O for the fbisect binary.
//!
//! Items are whole lines, kept verbatim; trailing newlines are normalized
//! to one per item on output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use frankenbisect_core::{BisectError, BisectResult};

/// Read an input file as an ordered sequence of line items.
///
/// # Errors
///
/// Returns `BisectError::Io` if the file cannot be read.
pub fn read_line_items(path: &Path) -> BisectResult<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents.lines().map(str::to_owned).collect())
}

/// Write the reduced items to a newly created persistent temp file and
/// return its path.
///
/// # Errors
///
/// Returns `BisectError::Io` if the file cannot be created, written, or
/// persisted.
pub fn write_line_items(items: &[String]) -> BisectResult<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("fbisect-")
        .suffix(".reduced")
        .tempfile()?;

    for item in items {
        writeln!(file, "{item}")?;
    }
    file.flush()?;

    let (_file, path) = file
        .keep()
        .map_err(|persist_error| BisectError::Io(persist_error.error))?;
    Ok(path)
}
