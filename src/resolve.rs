//! Dual-addressing path resolution
//!
//! The same key string can address a whole entry file, one field inside an
//! entry file one level up, or (for delete) an entire directory subtree.
//! Which of these a segment sequence means is decided by probing the
//! filesystem, never by declared schema. Every probe splits the sequence
//! into (all-but-last, last) and checks one level up from the last segment.
//!
//! All three operations share this single resolver so the probe logic
//! exists exactly once; only the probes differ per mode.

use std::path::{Path, PathBuf};

use crate::entry::ENTRY_SUFFIX;

/// Which operation is resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Read,
    Write,
    Delete,
}

/// Where a segment sequence lands on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// The last segment names a whole entry file
    Entry(PathBuf),

    /// The last segment selects one field inside the entry file at `entry`
    Field { entry: PathBuf, field: String },

    /// A fresh entry file inside `dir`, which may not exist yet (write only)
    NewEntry { dir: PathBuf, entry: PathBuf },

    /// The last segment names a directory subtree (delete only)
    Subtree(PathBuf),
}

/// Append the entry suffix to a path
pub(crate) fn entry_file(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ENTRY_SUFFIX);
    PathBuf::from(name)
}

/// Resolve `segments` under `root` for the given mode
///
/// `segments` must be non-empty; the key parser guarantees this.
pub(crate) fn resolve(root: &Path, segments: &[String], mode: Mode) -> Resolution {
    let (last, parent) = segments
        .split_last()
        .expect("key parser yields at least one segment");

    let mut path = root.to_path_buf();
    for segment in parent {
        path.push(segment);
    }

    match mode {
        // Parent path exists: the last segment names a whole entry file
        // inside it. Otherwise the parent path is itself the entry file and
        // the last segment is a field within it.
        Mode::Read => {
            if path.exists() {
                Resolution::Entry(entry_file(&path.join(last)))
            } else {
                Resolution::Field {
                    entry: entry_file(&path),
                    field: last.clone(),
                }
            }
        }

        // An existing entry file at the parent path absorbs the write as one
        // field. Otherwise the parent path becomes a directory and the last
        // segment names a fresh entry file inside it.
        Mode::Write => {
            let entry = entry_file(&path);
            if entry.exists() {
                Resolution::Field {
                    entry,
                    field: last.clone(),
                }
            } else {
                Resolution::NewEntry {
                    entry: entry_file(&path.join(last)),
                    dir: path,
                }
            }
        }

        // An existing entry file at the parent path loses one field.
        // Otherwise the last segment names either a single entry file (no
        // directory present) or a whole subtree to remove recursively.
        Mode::Delete => {
            let entry = entry_file(&path);
            if entry.exists() {
                return Resolution::Field {
                    entry,
                    field: last.clone(),
                };
            }

            let target = path.join(last);
            if target.exists() {
                Resolution::Subtree(target)
            } else {
                Resolution::Entry(entry_file(&target))
            }
        }
    }
}
