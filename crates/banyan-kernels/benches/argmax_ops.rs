//! Benchmarks for the argmax kernels
//!
//! Frames the worker/tile protocol against the sequential scan and the
//! rayon variant across input sizes and worker counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use banyan_core::Topology;
use banyan_kernels::ops::{argmax, reference};

fn input_of(size: usize) -> Vec<i32> {
    (0..size as i32).map(|i| (i * 31 + 12_345) % 65_537).collect()
}

fn benchmark_argmax_protocol(c: &mut Criterion) {
    let mut group = c.benchmark_group("argmax_protocol");

    for size in [4_096, 65_536, 1_048_576] {
        let input = input_of(size);
        group.throughput(Throughput::Elements(size as u64));

        for workers in [2, 4, 8] {
            let topo = Topology::new(workers, workers.min(4)).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("workers_{workers}"), size),
                &input,
                |b, input| {
                    b.iter(|| argmax::argmax(input, &topo).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn benchmark_argmax_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("argmax_reference");

    for size in [4_096, 65_536, 1_048_576] {
        let input = input_of(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &input, |b, input| {
            b.iter(|| reference::argmax_seq(input).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("rayon", size), &input, |b, input| {
            b.iter(|| reference::argmax_par(input).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_argmax_protocol, benchmark_argmax_reference);
criterion_main!(benches);
