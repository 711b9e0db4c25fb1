//! Top-k kernel demo
//!
//! Selects the K largest values of a generated input with the parallel
//! kernel, cross-checks against quickselect, and prints a JSON run
//! report.
//!
//! Run with:
//!   cargo run --example topk_demo --release

use std::time::Instant;

use banyan_core::Topology;
use banyan_kernels::ops::{select, topk};
use banyan_kernels::{KernelMetrics, RunReport};
use banyan_tracing::{init_global_tracing, TracingConfig};

const K: usize = 16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_global_tracing(&TracingConfig::from_env())?;

    let topo = Topology::from_env()?;
    let input: Vec<i32> = (0..1_000_000).map(|i| (i * 131 + 17) % 999_983).collect();

    let start = Instant::now();
    let top = topk::largest(&input, K, &topo)?;
    let metrics = KernelMetrics::new("topk_largest", input.len(), topo.num_workers(), start);

    let report = RunReport::for_topk(&metrics, topo.tile_size(), 0, K);
    println!("{}", report.to_json()?);
    println!("top-{K} = {top:?}");

    // The sequential baseline must agree.
    let mut scratch = input;
    let mut baseline = select::top_k_largest(&mut scratch, K)?.to_vec();
    baseline.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(top, baseline, "parallel and quickselect selections differ");
    println!("quickselect baseline agrees");

    Ok(())
}
