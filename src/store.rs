//! Store Module
//!
//! The storage engine that coordinates all components.
//!
//! ## Responsibilities
//! - Hold the root path and configuration
//! - Serialize writers against readers with one whole-store lock
//! - Route every operation through key parsing and path resolution
//! - Expose the typed accessor surface

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::convert;
use crate::entry::{self, type_name, Entry};
use crate::error::{NestError, Result};
use crate::key::parse_key;
use crate::resolve::{resolve, Mode, Resolution};

/// How a delete resolved
///
/// The same call signature covers scalar field deletion and cascading
/// subtree removal; the outcome reports which one actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// One field was removed; the entry file keeps its remaining fields
    FieldRemoved,

    /// The entry file itself was removed
    EntryRemoved,

    /// A whole directory subtree was removed recursively
    SubtreeRemoved,
}

/// The main store
///
/// ## Concurrency Model: Whole-Store Reader/Writer Lock
///
/// - **Writes** (insert/insert_dir/delete): exclusive lock for the whole
///   mutation sequence; concurrent writes to unrelated keys serialize
/// - **Reads** (get_*/get_all_maps/get_len): shared lock for the whole
///   probe + read; readers proceed in parallel with each other and block
///   behind any in-flight write
///
/// Each store instance owns its lock; multiple independently constructed
/// stores in one process do not contend with each other.
#[derive(Debug)]
pub struct Store {
    /// Store configuration
    config: Config,

    /// Root directory; every key resolves beneath it
    root: PathBuf,

    /// Whole-store reader/writer lock
    lock: RwLock<()>,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// Creates the root directory if it does not exist. The parent of the
    /// root must already exist.
    pub fn open(config: Config) -> Result<Self> {
        let root = config.root_dir.clone();
        entry::create_dir(&root)?;

        tracing::debug!("Opened store at {}", root.display());

        Ok(Self {
            config,
            root,
            lock: RwLock::new(()),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified root directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().root_dir(path).build();
        Self::open(config)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a value under the addressed location
    ///
    /// Steps:
    /// 1. Parse the key and serialize the value
    /// 2. Acquire the exclusive lock
    /// 3. Create directories for every segment except the last two
    /// 4. Existing entry file at the target path: set one field and write
    ///    the entry back
    /// 5. Otherwise: ensure the target directory exists and write the raw
    ///    value as a fresh entry file named by the last segment
    ///
    /// In step 5 the stored file holds the value itself, not a field map;
    /// `get_map`/`get_struct` at that location require the value to be an
    /// object. May create zero or more directories and exactly one file;
    /// a failure mid-sequence is not rolled back.
    pub fn insert(&self, key: &str, value: impl Serialize) -> Result<()> {
        let segments = self.parse(key)?;
        let value = serde_json::to_value(value).map_err(|e| NestError::Encode(e.to_string()))?;

        let _guard = self.lock.write();

        if segments.len() >= 2 {
            entry::create_dir_chain(&self.root, &segments[..segments.len() - 2])?;
        }

        match resolve(&self.root, &segments, Mode::Write) {
            Resolution::Field { entry, field } => {
                tracing::debug!("insert {:?}: field in {}", key, entry.display());
                let mut map = entry::read_entry(&entry)?;
                map.insert(field, value);
                entry::write_entry(&Value::Object(map), &entry)
            }
            Resolution::NewEntry { dir, entry } => {
                tracing::debug!("insert {:?}: new entry {}", key, entry.display());
                entry::create_dir(&dir)?;
                entry::write_entry(&value, &entry)
            }
            _ => unreachable!("write mode resolves to Field or NewEntry"),
        }
    }

    /// Create every directory in the segment chain, idempotently
    ///
    /// No file writes; only the final error state is reported.
    pub fn insert_dir(&self, dirs: &str) -> Result<()> {
        let segments = self.parse(dirs)?;

        let _guard = self.lock.write();

        tracing::debug!("insert_dir {:?}", dirs);
        entry::create_dir_chain(&self.root, &segments)?;
        Ok(())
    }

    /// Delete the addressed field, entry file, or subtree
    ///
    /// Mirrors the read path's dual addressing:
    /// - an entry file at the parent path loses the field named by the
    ///   last segment (removing the file when its last field goes)
    /// - otherwise the last segment names an entry file to remove, or a
    ///   directory to remove recursively with everything beneath it
    ///
    /// The returned outcome reports which of the three removals happened.
    pub fn delete(&self, key: &str) -> Result<DeleteOutcome> {
        let segments = self.parse(key)?;

        let _guard = self.lock.write();

        let outcome = match resolve(&self.root, &segments, Mode::Delete) {
            Resolution::Field { entry, field } => {
                let mut map = entry::read_entry(&entry)?;
                map.remove(&field);

                if map.is_empty() {
                    fs::remove_file(&entry)?;
                    DeleteOutcome::EntryRemoved
                } else {
                    entry::write_entry(&Value::Object(map), &entry)?;
                    DeleteOutcome::FieldRemoved
                }
            }
            Resolution::Entry(path) => {
                fs::remove_file(&path)?;
                DeleteOutcome::EntryRemoved
            }
            Resolution::Subtree(path) => {
                fs::remove_dir_all(&path)?;
                DeleteOutcome::SubtreeRemoved
            }
            _ => unreachable!("delete mode resolves to Field, Entry, or Subtree"),
        };

        tracing::debug!("delete {:?}: {:?}", key, outcome);
        Ok(outcome)
    }

    // =========================================================================
    // Typed Accessors
    // =========================================================================

    /// Get the raw value at the key, untyped
    pub fn get_any(&self, key: &str) -> Result<Value> {
        let segments = self.parse(key)?;

        let _guard = self.lock.read();
        self.read_value(&segments)
    }

    /// Get an integer value at the key
    ///
    /// Accepts an integer number or a float with no fractional part; any
    /// other value fails with `TypeConversion`.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        match self.get_any(key)? {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                if let Some(f) = n.as_f64() {
                    if f.fract() == 0.0 {
                        return Ok(f as i64);
                    }
                }
                Err(NestError::TypeConversion {
                    expected: "integer",
                    actual: "number",
                })
            }
            other => Err(NestError::TypeConversion {
                expected: "integer",
                actual: type_name(&other),
            }),
        }
    }

    /// Get a float value at the key (any numeric value qualifies)
    pub fn get_float(&self, key: &str) -> Result<f64> {
        match self.get_any(key)? {
            Value::Number(n) => n.as_f64().ok_or(NestError::TypeConversion {
                expected: "float",
                actual: "number",
            }),
            other => Err(NestError::TypeConversion {
                expected: "float",
                actual: type_name(&other),
            }),
        }
    }

    /// Get a string value at the key
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.get_any(key)? {
            Value::String(s) => Ok(s),
            other => Err(NestError::TypeConversion {
                expected: "string",
                actual: type_name(&other),
            }),
        }
    }

    /// Get a boolean value at the key
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get_any(key)? {
            Value::Bool(b) => Ok(b),
            other => Err(NestError::TypeConversion {
                expected: "boolean",
                actual: type_name(&other),
            }),
        }
    }

    /// Get a field map value at the key
    pub fn get_map(&self, key: &str) -> Result<Entry> {
        match self.get_any(key)? {
            Value::Object(map) => Ok(map),
            other => Err(NestError::TypeConversion {
                expected: "object",
                actual: type_name(&other),
            }),
        }
    }

    /// Get a typed value at the key
    ///
    /// Fetches the field map and converts it into `T` via the canonical
    /// round trip; conversion failures propagate as `Decode`.
    pub fn get_struct<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let map = self.get_map(key)?;
        convert::map_to_struct(map)
    }

    // =========================================================================
    // Directory Accessors
    // =========================================================================

    /// Read every entry file directly inside the addressed directory
    ///
    /// The full segment path must be a readable directory. Subdirectories
    /// are skipped; every remaining file is decoded as an entry. Order
    /// follows the directory listing and is not guaranteed stable across
    /// filesystems.
    pub fn get_all_maps(&self, key: &str) -> Result<Vec<Entry>> {
        let segments = self.parse(key)?;

        let _guard = self.lock.read();

        let path = self.join(&segments);
        let mut entries = Vec::new();

        for dirent in fs::read_dir(&path)? {
            let file_path = dirent?.path();
            if file_path.is_dir() {
                continue;
            }
            entries.push(entry::read_entry(&file_path)?);
        }

        Ok(entries)
    }

    /// Count the direct children of the addressed directory
    ///
    /// Files and subdirectories both count.
    pub fn get_len(&self, key: &str) -> Result<usize> {
        let segments = self.parse(key)?;

        let _guard = self.lock.read();

        let path = self.join(&segments);
        let mut count = 0;
        for dirent in fs::read_dir(&path)? {
            dirent?;
            count += 1;
        }

        Ok(count)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Read primitive shared by all typed accessors (caller holds the lock)
    ///
    /// Parent path exists: the whole entry file named by the last segment
    /// is returned (a missing file is `EntryNotFound`). Otherwise the
    /// parent path is the entry file and the last segment selects one
    /// field in it (`EntryNotFound` when the file cannot be read as an
    /// entry, `ValueNotFound` when the field is absent).
    fn read_value(&self, segments: &[String]) -> Result<Value> {
        match resolve(&self.root, segments, Mode::Read) {
            Resolution::Entry(path) => {
                tracing::trace!("read entry {}", path.display());
                match entry::read_value(&path) {
                    Err(NestError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                        Err(NestError::EntryNotFound)
                    }
                    other => other,
                }
            }
            Resolution::Field { entry, field } => {
                tracing::trace!("read field {:?} of {}", field, entry.display());
                let map = entry::read_entry(&entry).map_err(|_| NestError::EntryNotFound)?;
                map.get(&field).cloned().ok_or(NestError::ValueNotFound)
            }
            _ => unreachable!("read mode resolves to Entry or Field"),
        }
    }

    /// Parse a key string with the configured divider
    fn parse(&self, key: &str) -> Result<Vec<String>> {
        parse_key(key, &self.config.divider)
    }

    /// Join segments under the root path
    fn join(&self, segments: &[String]) -> PathBuf {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the root directory path
    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// Get the configured key-segment divider
    pub fn divider(&self) -> &str {
        &self.config.divider
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
