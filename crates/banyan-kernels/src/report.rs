//! Machine-readable run reports
//!
//! A [`RunReport`] is the serializable summary of one kernel invocation,
//! meant for the harness around the kernels (demo binaries, sweep
//! scripts) rather than for the kernels themselves. JSON keeps the
//! results easy to collect and diff across runs.

use serde::{Deserialize, Serialize};

use crate::instrumentation::KernelMetrics;
use crate::ops::argmax::Extremes;

/// Summary of one kernel run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Kernel name
    pub kernel: String,
    /// Input elements
    pub elements: usize,
    /// Worker count
    pub num_workers: usize,
    /// Workers per tile
    pub tile_size: usize,
    /// Wall-clock duration in microseconds
    pub duration_us: u64,
    /// Workers that degraded to an empty contribution
    pub degraded_workers: u32,
    /// Best value (argmax/argmin kernels)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<i32>,
    /// Number of positions achieving the best value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holders_len: Option<usize>,
    /// Selection size (top-k kernels)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

impl RunReport {
    /// Report for an argmax/argmin run.
    pub fn for_extremes(
        metrics: &KernelMetrics,
        tile_size: usize,
        degraded_workers: u32,
        extremes: &Extremes,
    ) -> Self {
        Self {
            kernel: metrics.kernel.to_string(),
            elements: metrics.elements,
            num_workers: metrics.workers,
            tile_size,
            duration_us: metrics.duration_us(),
            degraded_workers,
            best: Some(extremes.best),
            holders_len: Some(extremes.holders.len()),
            k: None,
        }
    }

    /// Report for a top-k run.
    pub fn for_topk(
        metrics: &KernelMetrics,
        tile_size: usize,
        degraded_workers: u32,
        k: usize,
    ) -> Self {
        Self {
            kernel: metrics.kernel.to_string(),
            elements: metrics.elements,
            num_workers: metrics.workers,
            tile_size,
            duration_us: metrics.duration_us(),
            degraded_workers,
            best: None,
            holders_len: None,
            k: Some(k),
        }
    }

    /// Serialize to a JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a report back from JSON.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
