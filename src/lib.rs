//! # NestKV
//!
//! A filesystem-backed, hierarchical key-value store with:
//! - Dotted key paths resolved against the directory tree
//! - One JSON entry file per leaf, holding a field → value map
//! - Whole-store reader/writer locking
//! - Typed accessors over an untyped JSON value model
//!
//! ## On-Disk Layout
//!
//! ```text
//! {root}/
//!   ├── users/                     <- directory segment
//!   │     ├── alice.json           <- entry file: {"age": 30, ...}
//!   │     └── bob.json
//!   └── settings.json              <- entry file at the root
//! ```
//!
//! A key like `users.alice.age` walks `users/`, opens `alice.json`, and
//! selects the `age` field. Whether a segment names a directory, an entry
//! file, or a field inside one is decided by probing the filesystem, not
//! by declared schema. The same probe drives insert, read, and delete.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod entry;
pub mod convert;
pub mod store;

mod resolve;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NestError, Result};
pub use config::Config;
pub use convert::{map_to_struct, struct_to_map};
pub use entry::Entry;
pub use store::{DeleteOutcome, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of NestKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
