//! Performance-focused tracing utilities
//!
//! RAII spans with automatic timing and threshold filtering. The
//! process-wide threshold is set once by
//! [`crate::init_global_tracing`]; spans faster than the threshold are
//! dropped silently.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

// Threshold in microseconds; negative means "log everything".
static THRESHOLD_US: AtomicI64 = AtomicI64::new(-1);

/// Set the process-wide performance threshold.
pub fn set_threshold_us(threshold_us: Option<u64>) {
    let encoded = match threshold_us {
        Some(us) => i64::try_from(us).unwrap_or(i64::MAX),
        None => -1,
    };
    THRESHOLD_US.store(encoded, Ordering::Relaxed);
}

/// Current process-wide performance threshold.
pub fn threshold_us() -> Option<u64> {
    let encoded = THRESHOLD_US.load(Ordering::Relaxed);
    (encoded >= 0).then_some(encoded as u64)
}

/// RAII guard that measures a duration and logs it on drop.
///
/// The span logs only when its duration exceeds the effective threshold:
/// the explicit one passed to [`PerformanceSpan::new`], or the
/// process-wide one otherwise.
///
/// # Example
///
/// ```rust
/// use banyan_tracing::performance::PerformanceSpan;
///
/// {
///     let _span = PerformanceSpan::new("scan_partition", Some(100));
///     // ... operation code ...
/// } // Logged only if the scan took more than 100 microseconds.
/// ```
pub struct PerformanceSpan {
    name: &'static str,
    threshold_us: Option<u64>,
    start: Instant,
}

impl PerformanceSpan {
    /// Create a span named `name` with an optional explicit threshold.
    pub fn new(name: &'static str, threshold_us: Option<u64>) -> Self {
        Self {
            name,
            threshold_us,
            start: Instant::now(),
        }
    }

    /// Elapsed time since span creation, in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl Drop for PerformanceSpan {
    fn drop(&mut self) {
        let elapsed_us = self.elapsed_us();
        let threshold = self.threshold_us.or_else(threshold_us);
        if let Some(min_us) = threshold {
            if elapsed_us < min_us {
                return;
            }
        }
        tracing::debug!(
            target: "banyan::perf",
            name = self.name,
            duration_us = elapsed_us,
            "perf span"
        );
    }
}
