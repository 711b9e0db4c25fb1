//! # banyan-core - Tiled Reduction Substrate
//!
//! Concurrency building blocks for parallel selection kernels running on a
//! fixed worker/tile topology: a pool of W workers is split into tiles of
//! `tile_size` workers, each tile sharing one lock and one staging arena.
//!
//! ## Architecture
//!
//! A kernel invocation flows through three phases, separated by group
//! barriers:
//!
//! ```text
//! input partition → stage into tile arena (under tile lock)
//!                 → local scan (single writer per slot)
//!                 → reduction tree (log2(W) merge levels, one winner)
//! ```
//!
//! - [`Topology`] validates the worker/tile shape and assigns each worker a
//!   contiguous partition of the input.
//! - [`TileLock`] is the per-tile test-and-set lock guarding the tile's
//!   shared allocation state.
//! - [`TileArena`] accounts the tile's staging budget; exhaustion degrades
//!   to a reported process-heap fallback, never to a crash.
//! - [`ReductionTree`] merges per-worker partial results pairwise at
//!   doubling strides until exactly one worker holds the global result.
//! - [`ExtremeSlot`] and [`BoundedHeap`] are the partial results the tree
//!   merges: best-value-with-holders for argmax/argmin, fixed-capacity
//!   heaps for top-k.
//!
//! ## Ordering
//!
//! Slot handoff between workers relies on the acquire/release edge of the
//! tree's arrival counters: a merger only reads a neighbour slot after the
//! counter proves its writer is done. The final publish is `SeqCst` and all
//! parked workers are woken once the winner is known.

pub mod arena;
pub mod barrier;
pub mod error;
pub mod heap;
pub mod lock;
pub mod slot;
pub mod topology;

pub use arena::{Reservation, StagePolicy, TileArena};
pub use barrier::ReductionTree;
pub use error::{Error, Result};
pub use heap::{BoundedHeap, Keep};
pub use lock::TileLock;
pub use slot::{ExtremeSlot, Extremum, LocalAggregator};
pub use topology::Topology;
