//! Key assembly benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unitable_core::{
    assemble_indexed_value, assemble_primary_key_value, construct_key_value,
    AccessPatternOptions, KeyPath, KeyType, NormalizerKind,
};
use unitable_bench::user_document;

/// Benchmark primary key assembly.
fn bench_primary_key(c: &mut Criterion) {
    c.bench_function("primary_key", |b| {
        b.iter(|| {
            black_box(assemble_primary_key_value(
                black_box("users"),
                black_box("5f2b8c1e-2d7a-4c3e-9b1a-6e0f3d2c1b0a"),
            ))
        });
    });
}

/// Benchmark indexed value assembly across the three policies.
fn bench_indexed_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_value");

    group.bench_function("empty", |b| {
        b.iter(|| black_box(assemble_indexed_value(KeyType::Sort, black_box("users"), &[])));
    });

    let sparse = vec![None, None, None];
    group.bench_function("sparse", |b| {
        b.iter(|| {
            black_box(assemble_indexed_value(
                KeyType::Partition,
                black_box("users"),
                &sparse,
            ))
        });
    });

    let populated = vec![
        Some("chris@example.com".to_string()),
        None,
        Some("team-7".to_string()),
    ];
    group.bench_function("populated", |b| {
        b.iter(|| {
            black_box(assemble_indexed_value(
                KeyType::Partition,
                black_box("users"),
                &populated,
            ))
        });
    });

    group.finish();
}

/// Benchmark extraction plus assembly.
fn bench_construct(c: &mut Criterion) {
    let doc = user_document(1, 8);
    let paths = vec![KeyPath::parse("email"), KeyPath::parse("team.id")];
    let plain = AccessPatternOptions::new();
    let lowercase = AccessPatternOptions::new().normalizer_kind(NormalizerKind::Lowercase);

    let mut group = c.benchmark_group("construct_key_value");
    group.bench_function("plain", |b| {
        b.iter(|| {
            black_box(
                construct_key_value(KeyType::Partition, "users", &paths, &plain, black_box(&doc))
                    .unwrap(),
            )
        });
    });
    group.bench_function("lowercase", |b| {
        b.iter(|| {
            black_box(
                construct_key_value(
                    KeyType::Partition,
                    "users",
                    &paths,
                    &lowercase,
                    black_box(&doc),
                )
                .unwrap(),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_primary_key, bench_indexed_value, bench_construct);

criterion_main!(benches);
