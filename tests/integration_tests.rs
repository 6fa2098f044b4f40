//! Integration tests for NestKV
//!
//! End-to-end scenarios across insert, typed reads, struct conversion,
//! enumeration, delete, and reopening a store on the same root.

use nestkv::store::{DeleteOutcome, Store};
use nestkv::NestError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Device {
    name: String,
    port: i64,
    online: bool,
}

// =============================================================================
// Workflows
// =============================================================================

#[test]
fn test_device_registry_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();

    let gateway = Device {
        name: "gateway".to_string(),
        port: 8080,
        online: true,
    };
    let sensor = Device {
        name: "sensor".to_string(),
        port: 9090,
        online: false,
    };

    store.insert("devices.gateway", &gateway).unwrap();
    store.insert("devices.sensor", &sensor).unwrap();

    // Whole-entry reads come back as typed records
    let loaded: Device = store.get_struct("devices.gateway").unwrap();
    assert_eq!(loaded, gateway);

    // Field reads narrow individual values inside the entry
    assert_eq!(store.get_int("devices.sensor.port").unwrap(), 9090);
    assert!(!store.get_bool("devices.sensor.online").unwrap());

    // A field write updates the existing entry in place
    store.insert("devices.sensor.online", true).unwrap();
    let updated: Device = store.get_struct("devices.sensor").unwrap();
    assert!(updated.online);

    // Enumeration sees one map per entry file
    let maps = store.get_all_maps("devices").unwrap();
    assert_eq!(maps.len(), 2);
    assert_eq!(store.get_len("devices").unwrap(), 2);
}

#[test]
fn test_reopen_sees_persisted_data() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = Store::open_path(temp_dir.path()).unwrap();
        store.insert("settings.theme", "dark").unwrap();
        store.insert("settings.volume", 11).unwrap();
    }

    let store = Store::open_path(temp_dir.path()).unwrap();
    assert_eq!(store.get_string("settings.theme").unwrap(), "dark");
    assert_eq!(store.get_int("settings.volume").unwrap(), 11);
}

#[test]
fn test_entry_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();

    store
        .insert("jobs.cleanup", json!({"interval": 60, "enabled": true}))
        .unwrap();

    // Shrink the entry field by field; the file disappears with its last one
    assert_eq!(
        store.delete("jobs.cleanup.interval").unwrap(),
        DeleteOutcome::FieldRemoved
    );
    assert_eq!(
        store.delete("jobs.cleanup.enabled").unwrap(),
        DeleteOutcome::EntryRemoved
    );

    let err = store.get_any("jobs.cleanup").unwrap_err();
    assert!(matches!(err, NestError::EntryNotFound));

    // The parent directory survives the entry
    assert_eq!(store.get_len("jobs").unwrap(), 0);
}

#[test]
fn test_subtree_teardown() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();

    store.insert("tenants.acme.users.alice", json!({"admin": true})).unwrap();
    store.insert("tenants.acme.users.bob", json!({"admin": false})).unwrap();
    store.insert("tenants.other.users.carol", json!({"admin": true})).unwrap();

    // One call removes a tenant's whole subtree, the sibling is untouched
    assert_eq!(
        store.delete("tenants.acme").unwrap(),
        DeleteOutcome::SubtreeRemoved
    );

    assert!(matches!(
        store.get_any("tenants.acme.users.alice.admin").unwrap_err(),
        NestError::EntryNotFound
    ));
    assert!(store.get_bool("tenants.other.users.carol.admin").unwrap());
}
