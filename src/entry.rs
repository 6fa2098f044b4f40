//! Entry file codec
//!
//! Reads and writes the JSON files that hold entries on disk, and creates
//! the directories they live in. An entry is a mapping from field name to
//! arbitrary JSON value; one entry file is the atomic unit of read/write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{NestError, Result};

/// Filename extension identifying an entry file
pub const ENTRY_SUFFIX: &str = ".json";

/// File mode for entry files (world-readable, owner-writable)
pub const FILE_MODE: u32 = 0o644;

/// Directory mode for key directories
pub const DIR_MODE: u32 = 0o755;

/// One entry: a mapping from field name to JSON value
pub type Entry = Map<String, Value>;

// =============================================================================
// Reading
// =============================================================================

/// Read the file at `path` and decode it as an arbitrary JSON value
pub fn read_value(path: &Path) -> Result<Value> {
    let data = fs::read(path)?;
    serde_json::from_slice(&data).map_err(|e| NestError::Decode(e.to_string()))
}

/// Read the entry file at `path` and decode it as a field map
pub fn read_entry(path: &Path) -> Result<Entry> {
    match read_value(path)? {
        Value::Object(map) => Ok(map),
        other => Err(NestError::Decode(format!(
            "expected a field map, got {}",
            type_name(&other)
        ))),
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Serialize `value` and write it to `path` in a single call
///
/// The write replaces the whole file content. There is no fsync and no
/// rename-swap: a crash mid-write leaves either the old or the new content.
pub fn write_entry(value: &Value, path: &Path) -> Result<()> {
    let data = serde_json::to_vec(value).map_err(|e| NestError::Encode(e.to_string()))?;

    let mut file = open_entry_file(path)?;
    file.write_all(&data)?;
    Ok(())
}

#[cfg(unix)]
fn open_entry_file(path: &Path) -> Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    Ok(fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(FILE_MODE)
        .open(path)?)
}

#[cfg(not(unix))]
fn open_entry_file(path: &Path) -> Result<fs::File> {
    Ok(fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}

// =============================================================================
// Directories
// =============================================================================

/// Create `path` as a directory with the standard mode, if it is absent
pub fn create_dir(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    mkdir(path)?;
    Ok(())
}

/// Create every directory in `segments` under `root`, returning the last path
///
/// Creation is idempotent: segments whose directories already exist are
/// skipped.
pub fn create_dir_chain(root: &Path, segments: &[String]) -> Result<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in segments {
        path.push(segment);
        create_dir(&path)?;
    }
    Ok(path)
}

#[cfg(unix)]
fn mkdir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().mode(DIR_MODE).create(path)
}

#[cfg(not(unix))]
fn mkdir(path: &Path) -> std::io::Result<()> {
    fs::DirBuilder::new().create(path)
}

// =============================================================================
// Value Model Helpers
// =============================================================================

/// Name of a JSON value's variant, for error messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
