//! Kernel entry points
//!
//! - [`argmax`] - parallel argmax/argmin with exact holder sets
//! - [`topk`] - parallel bounded-heap top-k selection
//! - [`select`] - sequential quickselect baseline
//! - [`reference`] - sequential and rayon comparison variants

pub mod argmax;
pub mod reference;
pub mod select;
pub mod topk;

pub use argmax::{argmax, argmin, ExtremeRun, Extremes};
