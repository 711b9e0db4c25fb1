//! Argmax kernel demo
//!
//! Runs the parallel argmax over a generated input and prints one JSON
//! run report per topology, plus the winning value and holders.
//!
//! Topology comes from the environment (`BANYAN_NUM_WORKERS`,
//! `BANYAN_TILE_SIZE`); logging from `BANYAN_TRACING_*`.
//!
//! Run with:
//!   cargo run --example argmax_demo --release

use std::time::Instant;

use banyan_core::Topology;
use banyan_kernels::ops::argmax::argmax;
use banyan_kernels::{KernelMetrics, RunReport};
use banyan_tracing::{init_global_tracing, TracingConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_global_tracing(&TracingConfig::from_env())?;

    let topo = Topology::from_env()?;
    let input: Vec<i32> = (0..1_000_000).map(|i| (i * 37 + 101) % 99_991).collect();

    let start = Instant::now();
    let result = argmax(&input, &topo)?;
    let metrics = KernelMetrics::new("argmax", input.len(), topo.num_workers(), start);

    let report = RunReport::for_extremes(&metrics, topo.tile_size(), 0, &result);
    println!("{}", report.to_json()?);
    println!(
        "best = {}, holders = {:?}{}",
        result.best,
        &result.holders[..result.holders.len().min(16)],
        if result.holders.len() > 16 { " ..." } else { "" }
    );

    Ok(())
}
