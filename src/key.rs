//! Key parsing
//!
//! Splits a key string into an ordered sequence of path segments.

use crate::error::{NestError, Result};

/// Split `key` on `divider` into trimmed, non-empty segments
///
/// Fails with `InvalidKey` if the key is empty or any segment trims to
/// nothing (leading, trailing, or doubled dividers included).
pub fn parse_key(key: &str, divider: &str) -> Result<Vec<String>> {
    let mut segments = Vec::new();

    for piece in key.split(divider) {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err(NestError::InvalidKey(key.to_string()));
        }
        segments.push(piece.to_string());
    }

    Ok(segments)
}
