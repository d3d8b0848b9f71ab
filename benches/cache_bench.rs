//! Benchmarks for the cache hot path and downstream-closure traversal

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashSet;
use temporal_cache::cache::{frame_key, CacheConfig, TemporalCache};
use temporal_cache::graph::DependencyGraph;

fn bench_cache_put_get(c: &mut Criterion) {
    let config = CacheConfig::builder()
        .max_size_bytes(64 * 1024 * 1024)
        .build();
    let mut cache = TemporalCache::new(config).unwrap();
    let mut i = 0usize;

    c.bench_function("cache_put_get_512_samples", |b| {
        b.iter(|| {
            let key = frame_key(i % 1000);
            cache.put(key.clone(), vec![0.0; 512], HashSet::new());
            black_box(cache.get(&key));
            i += 1;
        });
    });
}

fn bench_eviction_pressure(c: &mut Criterion) {
    // Capacity for ~16 frames; every put evicts
    let config = CacheConfig::builder().max_size_bytes(32 * 1024).build();
    let mut cache = TemporalCache::new(config).unwrap();
    let mut i = 0usize;

    c.bench_function("cache_put_under_eviction_pressure", |b| {
        b.iter(|| {
            cache.put(frame_key(i), vec![0.0; 512], HashSet::new());
            i += 1;
        });
    });
}

fn bench_affected_closure(c: &mut Criterion) {
    let mut graph = DependencyGraph::new();
    for i in 1..1000 {
        graph.add_dependency(&frame_key(i), &frame_key(i - 1));
    }

    let mid: HashSet<String> = [frame_key(500)].into_iter().collect();
    let tail: HashSet<String> = [frame_key(999)].into_iter().collect();

    c.bench_function("affected_nodes_chain_1000_from_mid", |b| {
        b.iter(|| black_box(graph.get_affected_nodes(&mid)));
    });

    c.bench_function("affected_nodes_chain_1000_from_tail", |b| {
        b.iter(|| black_box(graph.get_affected_nodes(&tail)));
    });
}

criterion_group!(
    benches,
    bench_cache_put_get,
    bench_eviction_pressure,
    bench_affected_closure
);
criterion_main!(benches);
