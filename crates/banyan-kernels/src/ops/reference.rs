//! Reference comparison variants
//!
//! Sequential and rayon-scheduled renditions of the same selections,
//! used by the benches to frame the protocol kernels and by tests as
//! independent cross-checks. The rayon variants lean on a work-stealing
//! runtime's own scheduling, in contrast to the fixed worker/tile
//! protocol of [`crate::ops::argmax`].

use rayon::prelude::*;

use banyan_core::{BoundedHeap, ExtremeSlot, Extremum, Keep, LocalAggregator};

use crate::error::{Error, Result};
use crate::ops::argmax::Extremes;

/// Chunk size for the rayon variants.
const PAR_CHUNK: usize = 4_096;

/// Sequential argmax over the whole input.
pub fn argmax_seq(input: &[i32]) -> Result<Extremes> {
    extreme_seq(input, Extremum::Max)
}

/// Sequential argmin over the whole input.
pub fn argmin_seq(input: &[i32]) -> Result<Extremes> {
    extreme_seq(input, Extremum::Min)
}

/// Rayon-parallel argmax: chunked scans merged by the runtime's reduce.
pub fn argmax_par(input: &[i32]) -> Result<Extremes> {
    extreme_par(input, Extremum::Max)
}

/// Rayon-parallel argmin.
pub fn argmin_par(input: &[i32]) -> Result<Extremes> {
    extreme_par(input, Extremum::Min)
}

/// Sequential top-k via a single bounded heap.
pub fn topk_seq(input: &[i32], k: usize, keep: Keep) -> Result<Vec<i32>> {
    if input.is_empty() {
        return Err(Error::EmptyInput { kernel: "topk_seq" });
    }
    if k == 0 || k > input.len() {
        return Err(Error::InvalidK { k, n: input.len() });
    }
    let mut heap = BoundedHeap::new(keep, k)?;
    for &value in input {
        heap.offer(value);
    }
    Ok(heap.into_sorted_vec())
}

fn extreme_seq(input: &[i32], kind: Extremum) -> Result<Extremes> {
    if input.is_empty() {
        return Err(Error::EmptyInput {
            kernel: "extreme_seq",
        });
    }
    let slot = LocalAggregator::scan(kind, input, 0);
    Ok(finish(slot))
}

fn extreme_par(input: &[i32], kind: Extremum) -> Result<Extremes> {
    if input.is_empty() {
        return Err(Error::EmptyInput {
            kernel: "extreme_par",
        });
    }
    let slot = input
        .par_chunks(PAR_CHUNK)
        .enumerate()
        .map(|(chunk_idx, chunk)| {
            LocalAggregator::scan(kind, chunk, (chunk_idx * PAR_CHUNK) as u32)
        })
        .reduce(
            || ExtremeSlot::empty(kind),
            |mut acc, other| {
                acc.merge(other, kind);
                acc
            },
        );
    Ok(finish(slot))
}

fn finish(slot: ExtremeSlot) -> Extremes {
    let mut holders = slot.holders;
    holders.sort_unstable();
    Extremes {
        best: slot.best,
        holders,
    }
}
