//! Error types for kernel invocations

/// Result type for kernel invocations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when invoking a kernel
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The kernel requires at least one input element
    #[error("Empty input: {kernel} requires at least one element")]
    EmptyInput { kernel: &'static str },

    /// Selection size out of range for the input
    #[error("Invalid selection size: k={k} for input of {n} elements")]
    InvalidK { k: usize, n: usize },

    /// Substrate error (topology shape, arena budget, heap capacity)
    #[error(transparent)]
    Core(#[from] banyan_core::Error),
}
