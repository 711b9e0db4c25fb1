//! # banyan-kernels - Tiled Selection Kernels
//!
//! Parallel argmax/argmin and top-k kernels over a fixed worker/tile
//! topology, built on the [`banyan_core`] substrate.
//!
//! ## Architecture
//!
//! Every kernel invocation follows the same three-phase shape:
//!
//! ```text
//! partition → stage/reserve against the tile arena (under tile lock)
//!           → local scan (slot or bounded heap per worker)
//!           → logarithmic reduction tree → one global result
//! ```
//!
//! The worker pool is fixed for the invocation (`Topology::num_workers`
//! scoped threads), phases are separated by group barriers, and the
//! reduction tree guarantees exactly one winner after `log2(W)` merge
//! levels.
//!
//! ## Example
//!
//! ```rust
//! use banyan_core::Topology;
//! use banyan_kernels::ops;
//!
//! let topo = Topology::new(4, 2)?;
//! let input = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
//!
//! let max = ops::argmax(&input, &topo)?;
//! assert_eq!((max.best, max.holders.as_slice()), (9, &[5u32][..]));
//!
//! let top = ops::topk::largest(&input, 3, &topo)?;
//! assert_eq!(top, vec![9, 6, 5]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Degradation
//!
//! Arena exhaustion never aborts a run: with the default policy workers
//! fall back to the process heap (reported), and with fallback disabled
//! they contribute empty results and the `*_staged` entry points surface
//! the degraded-worker count.

pub mod error;
pub mod instrumentation;
pub mod ops;
pub mod report;

pub use error::{Error, Result};
pub use instrumentation::KernelMetrics;
pub use report::RunReport;
