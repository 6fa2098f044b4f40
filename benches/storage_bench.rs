//! Benchmarks for NestKV storage operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nestkv::Store;
use tempfile::TempDir;

fn storage_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();

    c.bench_function("insert_leaf", |b| {
        let mut i = 0u64;
        b.iter(|| {
            store
                .insert(&format!("bench.writes.key{}", i), black_box(i))
                .unwrap();
            i += 1;
        });
    });

    store.insert("bench.reads.value", 42).unwrap();
    c.bench_function("get_int_leaf", |b| {
        b.iter(|| black_box(store.get_int("bench.reads.value").unwrap()));
    });

    store
        .insert("bench.entry", serde_json::json!({"a": 1, "b": 2, "c": 3}))
        .unwrap();
    c.bench_function("get_map_entry", |b| {
        b.iter(|| black_box(store.get_map("bench.entry").unwrap()));
    });
}

criterion_group!(benches, storage_benchmarks);
criterion_main!(benches);
