//! Per-run kernel metrics
//!
//! Every public kernel logs one structured metrics event per invocation:
//! kernel name, input size, worker count, wall time, throughput. Events go
//! through `tracing`, so collection and filtering follow whatever
//! subscriber the embedding binary installed.

use std::time::Instant;

/// Metrics for one kernel invocation.
#[derive(Debug, Clone)]
pub struct KernelMetrics {
    /// Kernel name (argmax, argmin, topk_largest, ...)
    pub kernel: &'static str,
    /// Input elements processed
    pub elements: usize,
    /// Workers the invocation ran on
    pub workers: usize,
    /// Wall-clock duration (nanoseconds)
    pub duration_ns: u64,
}

impl KernelMetrics {
    /// Capture metrics for a kernel that started at `start`.
    pub fn new(kernel: &'static str, elements: usize, workers: usize, start: Instant) -> Self {
        Self {
            kernel,
            elements,
            workers,
            duration_ns: start.elapsed().as_nanos() as u64,
        }
    }

    /// Duration in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.duration_ns / 1_000
    }

    /// Throughput in millions of elements per second.
    pub fn throughput_meps(&self) -> f64 {
        if self.duration_ns == 0 {
            return 0.0;
        }
        // elements / (ns / 1e9) / 1e6 = elements * 1e3 / ns
        self.elements as f64 * 1_000.0 / self.duration_ns as f64
    }

    /// Emit the metrics event.
    pub fn log(&self) {
        tracing::debug!(
            target: "banyan::metrics",
            kernel = self.kernel,
            elements = self.elements,
            workers = self.workers,
            duration_us = self.duration_us(),
            throughput_meps = self.throughput_meps(),
            "kernel complete"
        );
    }
}
