//! Parallel top-k selection
//!
//! Each worker keeps a bounded heap of the K best values over its
//! partition, reserving the heap's footprint against its tile arena the
//! way the argmax kernel reserves staging space. The reduction tree then
//! merges heaps pairwise (offer every element of one against the other's
//! root) until one heap holds the global top-k. O(K) per merge,
//! O(K log W) merge work total.

use std::sync::Barrier;
use std::time::Instant;

use banyan_core::arena::{StagePolicy, TileArena};
use banyan_core::{BoundedHeap, Keep, ReductionTree, Topology};

use crate::error::{Error, Result};
use crate::instrumentation::KernelMetrics;

/// Outcome of a staged top-k run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopkRun {
    /// Selected values, best-first.
    pub values: Vec<i32>,
    /// Workers that degraded to an empty contribution.
    pub degraded_workers: u32,
}

/// The `k` largest values of `input`, sorted descending.
///
/// # Example
///
/// ```rust
/// use banyan_core::Topology;
/// use banyan_kernels::ops::topk;
///
/// let topo = Topology::new(2, 2)?;
/// let top = topk::largest(&[5, 3, 8, 1, 9, 2], 3, &topo)?;
/// assert_eq!(top, vec![9, 8, 5]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[tracing::instrument(skip(input), fields(n = input.len(), k, workers = topo.num_workers()))]
pub fn largest(input: &[i32], k: usize, topo: &Topology) -> Result<Vec<i32>> {
    let policy = default_policy(k, topo);
    Ok(select(input, k, topo, Keep::Largest, &policy)?.values)
}

/// The `k` smallest values of `input`, sorted ascending.
#[tracing::instrument(skip(input), fields(n = input.len(), k, workers = topo.num_workers()))]
pub fn smallest(input: &[i32], k: usize, topo: &Topology) -> Result<Vec<i32>> {
    let policy = default_policy(k, topo);
    Ok(select(input, k, topo, Keep::Smallest, &policy)?.values)
}

/// [`largest`] with an explicit staging policy; reports degraded workers.
pub fn largest_staged(
    input: &[i32],
    k: usize,
    topo: &Topology,
    policy: &StagePolicy,
) -> Result<TopkRun> {
    select(input, k, topo, Keep::Largest, policy)
}

fn default_policy(k: usize, topo: &Topology) -> StagePolicy {
    StagePolicy {
        arena_words_per_tile: k * topo.tile_size(),
        allow_fallback: true,
    }
}

fn kernel_name(keep: Keep) -> &'static str {
    match keep {
        Keep::Largest => "topk_largest",
        Keep::Smallest => "topk_smallest",
    }
}

fn select(
    input: &[i32],
    k: usize,
    topo: &Topology,
    keep: Keep,
    policy: &StagePolicy,
) -> Result<TopkRun> {
    let kernel = kernel_name(keep);
    if input.is_empty() {
        return Err(Error::EmptyInput { kernel });
    }
    if k == 0 || k > input.len() {
        return Err(Error::InvalidK { k, n: input.len() });
    }
    let start = Instant::now();
    let workers = topo.num_workers();

    // Validates the capacity once; workers clone the empty template.
    let template = BoundedHeap::new(keep, k)?;

    let arenas: Vec<TileArena> = (0..topo.num_tiles())
        .map(|_| TileArena::new(policy.arena_words_per_tile))
        .collect();
    let tree = ReductionTree::new(workers)?;
    let scanned_barrier = Barrier::new(workers);

    let outcomes: Vec<(Option<BoundedHeap>, bool)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let tree = &tree;
                let arenas = &arenas;
                let scanned_barrier = &scanned_barrier;
                let template = &template;
                scope.spawn(move || {
                    let arena = &arenas[topo.tile_of(worker)];
                    let reservation = match arena.reserve(k) {
                        Ok(reservation) => Some(reservation),
                        Err(err) if policy.allow_fallback => {
                            tracing::warn!(
                                error = %err,
                                worker,
                                "tile arena exhausted, heap on process heap"
                            );
                            None
                        }
                        Err(_) => {
                            // Degraded: contribute the empty template.
                            scanned_barrier.wait();
                            let winner =
                                tree.run(worker, template.clone(), |acc, other| {
                                    acc.merge_from(&other)
                                });
                            return (winner, true);
                        }
                    };

                    let mut heap = template.clone();
                    for &value in &input[topo.partition(input.len(), worker)] {
                        heap.offer(value);
                    }

                    scanned_barrier.wait();
                    let winner = tree.run(worker, heap, |acc, other| acc.merge_from(&other));
                    // The reservation outlives the merge; budget returns here.
                    drop(reservation);
                    (winner, false)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    });

    let degraded_workers = outcomes.iter().filter(|(_, degraded)| *degraded).count() as u32;
    if degraded_workers > 0 {
        tracing::warn!(
            kernel,
            degraded_workers,
            "workers contributed empty heaps after arena exhaustion"
        );
    }

    let heap = outcomes
        .into_iter()
        .find_map(|(winner, _)| winner)
        .expect("exactly one worker returns the reduced heap");

    let metrics = KernelMetrics::new(kernel, input.len(), workers, start);
    metrics.log();

    Ok(TopkRun {
        values: heap.into_sorted_vec(),
        degraded_workers,
    })
}
