//! Benchmark for telemetry appends and snapshots.
//!
//! Run with: cargo bench --package tracescope_debug --bench append_benchmark

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tracescope_debug::DebugGraph;

fn benchmark_append(c: &mut Criterion) {
    let graph = DebugGraph::new("bench", Duration::from_secs(3600));

    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(1));
    group.bench_function("uncontended", |b| {
        let mut v = 0.0;
        b.iter(|| {
            v += 1.0;
            graph.append(black_box(v));
        });
    });
    group.finish();
}

fn benchmark_contended_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_contended");
    group.throughput(Throughput::Elements(4 * 1000));
    group.bench_function("4_threads_x_1000", |b| {
        b.iter(|| {
            let graph = Arc::new(DebugGraph::new("bench", Duration::from_secs(3600)));
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let graph = Arc::clone(&graph);
                    thread::spawn(move || {
                        for i in 0..1000u32 {
                            graph.append(f64::from(i));
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
            black_box(graph.len())
        });
    });
    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let graph = DebugGraph::new("bench", Duration::from_secs(3600));
    for i in 0..10_000u32 {
        graph.append(f64::from(i));
    }

    c.bench_function("snapshot_10k_window_1s", |b| {
        b.iter(|| black_box(graph.snapshot(black_box(Duration::from_secs(1)))));
    });
}

criterion_group!(benches, benchmark_append, benchmark_contended_append, benchmark_snapshot);
criterion_main!(benches);
