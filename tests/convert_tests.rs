//! Tests for struct conversion helpers
//!
//! These tests verify:
//! - Struct -> map -> struct round trips
//! - Rejection of non-object values
//! - Decode failures on shape mismatches

use nestkv::{map_to_struct, struct_to_map, NestError};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: i64,
    active: bool,
}

fn sample_profile() -> Profile {
    Profile {
        name: "alice".to_string(),
        age: 30,
        active: true,
    }
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_struct_to_map_fields() {
    let map = struct_to_map(&sample_profile()).unwrap();

    assert_eq!(map.get("name"), Some(&json!("alice")));
    assert_eq!(map.get("age"), Some(&json!(30)));
    assert_eq!(map.get("active"), Some(&json!(true)));
}

#[test]
fn test_round_trip_preserves_struct() {
    let profile = sample_profile();

    let map = struct_to_map(&profile).unwrap();
    let back: Profile = map_to_struct(map).unwrap();

    assert_eq!(back, profile);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_struct_to_map_rejects_scalar() {
    let err = struct_to_map(&42).unwrap_err();
    assert!(matches!(err, NestError::TypeConversion { .. }));
}

#[test]
fn test_struct_to_map_rejects_sequence() {
    let err = struct_to_map(&vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, NestError::TypeConversion { .. }));
}

#[test]
fn test_map_to_struct_missing_field() {
    let map = struct_to_map(&json!({"name": "alice"})).unwrap();

    let err = map_to_struct::<Profile>(map).unwrap_err();
    assert!(matches!(err, NestError::Decode(_)));
}

#[test]
fn test_map_to_struct_wrong_field_type() {
    let map = struct_to_map(&json!({"name": "alice", "age": "old", "active": true})).unwrap();

    let err = map_to_struct::<Profile>(map).unwrap_err();
    assert!(matches!(err, NestError::Decode(_)));
}
