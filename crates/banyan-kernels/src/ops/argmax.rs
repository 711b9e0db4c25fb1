//! Parallel argmax/argmin with exact holder sets
//!
//! One invocation spawns `num_workers` scoped threads. Each worker stages
//! its contiguous partition into its tile's arena, scans it once keeping
//! the best value and every index achieving it, then enters the reduction
//! tree. Two group barriers separate the phases: all staging completes
//! before any scan starts, and all scans complete before the tree runs.
//!
//! Work partitioning never drops or duplicates winning indices: the
//! returned holder list is the exact set of positions achieving the best
//! value, whatever the topology.

use std::sync::Barrier;
use std::time::Instant;

use banyan_core::arena::{stage_partition, StagePolicy, TileArena};
use banyan_core::{ExtremeSlot, Extremum, LocalAggregator, ReductionTree, Topology};

use crate::error::{Error, Result};
use crate::instrumentation::KernelMetrics;

/// Result of an argmax/argmin kernel: the best value plus the exact set
/// of input positions achieving it, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extremes {
    pub best: i32,
    pub holders: Vec<u32>,
}

/// Outcome of a staged run: the result plus how many workers degraded to
/// an empty contribution (arena exhausted with fallback disabled).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtremeRun {
    pub extremes: Extremes,
    pub degraded_workers: u32,
}

struct WorkerOutcome {
    winner: Option<ExtremeSlot>,
    degraded: bool,
}

/// Maximum value of `input` and every index achieving it.
///
/// # Example
///
/// ```rust
/// use banyan_core::Topology;
/// use banyan_kernels::ops::argmax::argmax;
///
/// let topo = Topology::new(2, 2)?;
/// let result = argmax(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3], &topo)?;
/// assert_eq!(result.best, 9);
/// assert_eq!(result.holders, vec![5]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[tracing::instrument(skip(input), fields(n = input.len(), workers = topo.num_workers()))]
pub fn argmax(input: &[i32], topo: &Topology) -> Result<Extremes> {
    let policy = default_policy(input.len(), topo);
    Ok(extreme(input, topo, Extremum::Max, &policy)?.extremes)
}

/// Minimum value of `input` and every index achieving it.
#[tracing::instrument(skip(input), fields(n = input.len(), workers = topo.num_workers()))]
pub fn argmin(input: &[i32], topo: &Topology) -> Result<Extremes> {
    let policy = default_policy(input.len(), topo);
    Ok(extreme(input, topo, Extremum::Min, &policy)?.extremes)
}

/// [`argmax`] with an explicit staging policy; reports degraded workers.
pub fn argmax_staged(input: &[i32], topo: &Topology, policy: &StagePolicy) -> Result<ExtremeRun> {
    extreme(input, topo, Extremum::Max, policy)
}

/// [`argmin`] with an explicit staging policy; reports degraded workers.
pub fn argmin_staged(input: &[i32], topo: &Topology, policy: &StagePolicy) -> Result<ExtremeRun> {
    extreme(input, topo, Extremum::Min, policy)
}

fn default_policy(len: usize, topo: &Topology) -> StagePolicy {
    StagePolicy::sized_for(len, topo.num_workers(), topo.tile_size())
}

fn kernel_name(kind: Extremum) -> &'static str {
    match kind {
        Extremum::Max => "argmax",
        Extremum::Min => "argmin",
    }
}

fn extreme(
    input: &[i32],
    topo: &Topology,
    kind: Extremum,
    policy: &StagePolicy,
) -> Result<ExtremeRun> {
    let kernel = kernel_name(kind);
    if input.is_empty() {
        return Err(Error::EmptyInput { kernel });
    }
    let start = Instant::now();
    let workers = topo.num_workers();

    let arenas: Vec<TileArena> = (0..topo.num_tiles())
        .map(|_| TileArena::new(policy.arena_words_per_tile))
        .collect();
    let tree = ReductionTree::new(workers)?;
    let staged_barrier = Barrier::new(workers);
    let scanned_barrier = Barrier::new(workers);

    let outcomes: Vec<WorkerOutcome> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let tree = &tree;
                let arenas = &arenas;
                let staged_barrier = &staged_barrier;
                let scanned_barrier = &scanned_barrier;
                scope.spawn(move || {
                    let range = topo.partition(input.len(), worker);
                    let base_offset = range.start as u32;
                    let arena = &arenas[topo.tile_of(worker)];
                    let staged = stage_partition(arena, &input[range], policy);

                    // All partitions are resident before anyone scans.
                    staged_barrier.wait();

                    let slot = match &staged {
                        Ok(buffer) => LocalAggregator::scan(kind, buffer, base_offset),
                        // Degraded: this worker contributes no holders.
                        Err(_) => ExtremeSlot::empty(kind),
                    };

                    // All scans are complete before the tree reads slots.
                    scanned_barrier.wait();

                    let winner = tree.run(worker, slot, |acc, other| acc.merge(other, kind));
                    WorkerOutcome {
                        winner,
                        degraded: staged.is_err(),
                    }
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    });

    let degraded_workers = outcomes.iter().filter(|o| o.degraded).count() as u32;
    if degraded_workers > 0 {
        tracing::warn!(
            kernel,
            degraded_workers,
            "workers contributed empty results after arena exhaustion"
        );
    }

    let slot = outcomes
        .into_iter()
        .find_map(|o| o.winner)
        .expect("exactly one worker returns the reduced slot");

    let mut holders = slot.holders;
    holders.sort_unstable();

    let metrics = KernelMetrics::new(kernel, input.len(), workers, start);
    metrics.log();

    Ok(ExtremeRun {
        extremes: Extremes {
            best: slot.best,
            holders,
        },
        degraded_workers,
    })
}
