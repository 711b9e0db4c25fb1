//! Error types for the reduction substrate

/// Result type for banyan-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running the substrate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Worker count must be a non-zero power of two
    #[error("Invalid worker count: {num_workers} (must be a non-zero power of two)")]
    InvalidWorkerCount { num_workers: usize },

    /// Tile size must be non-zero and divide the worker count
    #[error("Invalid tile size: {tile_size} for {num_workers} workers")]
    InvalidTileSize { num_workers: usize, tile_size: usize },

    /// A tile arena could not satisfy a reservation
    #[error("Tile arena exhausted: requested {requested} words, {available} available")]
    ArenaExhausted { requested: usize, available: usize },

    /// Heap capacity out of range
    #[error("Invalid heap capacity: {k} (must be in 1..={max})")]
    InvalidHeapCapacity { k: usize, max: usize },

    /// Malformed environment override
    #[error("Invalid environment value for {var}: {value}")]
    InvalidEnvValue { var: &'static str, value: String },
}
