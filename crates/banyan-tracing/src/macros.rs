//! Convenience macros for performance tracing

/// Create a performance span with automatic field capture.
///
/// Returns a [`crate::performance::PerformanceSpan`] guard that logs its
/// duration when dropped, subject to the process-wide threshold.
///
/// # Syntax
///
/// ```text
/// perf_span!("name")
/// perf_span!("name", field1 = value1, field2 = value2)
/// ```
///
/// # Example
///
/// ```rust
/// use banyan_tracing::perf_span;
///
/// {
///     let _span = perf_span!("local_scan", elements = 1024);
///     // ... operation code ...
/// } // Duration logged on drop.
/// ```
#[macro_export]
macro_rules! perf_span {
    ($name:expr) => {{
        $crate::performance::PerformanceSpan::new($name, None)
    }};
    ($name:expr, $($field:tt = $value:expr),+ $(,)?) => {{
        tracing::debug!(
            target: "banyan::perf",
            name = $name,
            $($field = $value),+
        );
        $crate::performance::PerformanceSpan::new($name, None)
    }};
}

/// Emit a standardized performance event at debug level.
///
/// # Example
///
/// ```rust
/// use banyan_tracing::perf_event;
///
/// perf_event!("arena_fallback", requested_words = 4096, tile = 3);
/// ```
#[macro_export]
macro_rules! perf_event {
    ($name:expr, $($field:tt = $value:expr),+ $(,)?) => {
        tracing::debug!(
            target: "banyan::perf",
            event = $name,
            $($field = $value),+
        );
    };
}
