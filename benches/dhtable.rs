#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use dhtable::DoubleHashTable;
use proptest::{prelude::{Strategy, any}, strategy::ValueTree, test_runner::TestRunner};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = any::<[(String, String); ITEMS_AMOUNT]>()
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut double_hash_table = DoubleHashTable::new();
    let mut rust_map = HashMap::new();
    group.bench_function("dhtable insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                double_hash_table.insert(key, value);
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("dhtable get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = double_hash_table.get(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
