//! Worker/tile topology and input partitioning
//!
//! A kernel invocation runs on a fixed pool of `num_workers` workers, split
//! into tiles of `tile_size` workers each. The shape is validated once at
//! construction; kernels then derive tile membership and contiguous input
//! partitions from it. Nothing here is resized mid-invocation.

use std::env;
use std::ops::Range;

use crate::error::{Error, Result};

/// Default worker count when no environment override is present.
pub const DEFAULT_NUM_WORKERS: usize = 8;

/// Default workers per tile.
pub const DEFAULT_TILE_SIZE: usize = 4;

/// Validated worker/tile shape for one kernel invocation.
///
/// The reduction tree requires a power-of-two worker count, and every tile
/// must be full, so `tile_size` has to divide `num_workers`.
///
/// # Example
///
/// ```rust
/// use banyan_core::Topology;
///
/// let topo = Topology::new(8, 4)?;
/// assert_eq!(topo.num_tiles(), 2);
/// assert_eq!(topo.tile_of(5), 1);
/// # Ok::<(), banyan_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    num_workers: usize,
    tile_size: usize,
}

impl Topology {
    /// Create a topology of `num_workers` workers in tiles of `tile_size`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerCount`] unless `num_workers` is a
    /// non-zero power of two, and [`Error::InvalidTileSize`] unless
    /// `tile_size` is non-zero and divides `num_workers`.
    pub fn new(num_workers: usize, tile_size: usize) -> Result<Self> {
        if num_workers == 0 || !num_workers.is_power_of_two() {
            return Err(Error::InvalidWorkerCount { num_workers });
        }
        if tile_size == 0 || num_workers % tile_size != 0 {
            return Err(Error::InvalidTileSize {
                num_workers,
                tile_size,
            });
        }
        Ok(Self {
            num_workers,
            tile_size,
        })
    }

    /// Build a topology from environment overrides.
    ///
    /// # Environment Variables
    ///
    /// - `BANYAN_NUM_WORKERS` - worker count (default 8)
    /// - `BANYAN_TILE_SIZE` - workers per tile (default 4, clamped to the
    ///   worker count when the default would exceed it)
    pub fn from_env() -> Result<Self> {
        let num_workers = read_env_usize("BANYAN_NUM_WORKERS")?.unwrap_or(DEFAULT_NUM_WORKERS);
        let tile_size = match read_env_usize("BANYAN_TILE_SIZE")? {
            Some(explicit) => explicit,
            None => DEFAULT_TILE_SIZE.min(num_workers),
        };
        Self::new(num_workers, tile_size)
    }

    /// Total number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Workers per tile.
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of tiles.
    pub fn num_tiles(&self) -> usize {
        self.num_workers / self.tile_size
    }

    /// Tile owning the given worker.
    pub fn tile_of(&self, worker: usize) -> usize {
        debug_assert!(worker < self.num_workers);
        worker / self.tile_size
    }

    /// Contiguous partition of an input of length `len` owned by `worker`.
    ///
    /// The remainder of `len / num_workers` is spread over the leading
    /// workers, one extra element each, so partitions differ in length by
    /// at most one. Trailing workers may own an empty range when
    /// `len < num_workers`.
    pub fn partition(&self, len: usize, worker: usize) -> Range<usize> {
        debug_assert!(worker < self.num_workers);
        let base = len / self.num_workers;
        let extra = len % self.num_workers;
        let start = worker * base + worker.min(extra);
        let size = base + usize::from(worker < extra);
        start..start + size
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_NUM_WORKERS,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

fn read_env_usize(var: &'static str) -> Result<Option<usize>> {
    match env::var(var) {
        Ok(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<usize>()
                .map(Some)
                .map_err(|_| Error::InvalidEnvValue { var, value: raw })
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_power_of_two_shapes() {
        for workers in [1, 2, 4, 8, 16, 256] {
            let topo = Topology::new(workers, 1).unwrap();
            assert_eq!(topo.num_tiles(), workers);
        }
        let topo = Topology::new(256, 4).unwrap();
        assert_eq!(topo.num_tiles(), 64);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            Topology::new(0, 1),
            Err(Error::InvalidWorkerCount { .. })
        ));
        assert!(matches!(
            Topology::new(6, 2),
            Err(Error::InvalidWorkerCount { .. })
        ));
        assert!(matches!(
            Topology::new(8, 0),
            Err(Error::InvalidTileSize { .. })
        ));
        assert!(matches!(
            Topology::new(8, 3),
            Err(Error::InvalidTileSize { .. })
        ));
    }

    #[test]
    fn tile_mapping() {
        let topo = Topology::new(8, 4).unwrap();
        assert_eq!(topo.tile_of(0), 0);
        assert_eq!(topo.tile_of(3), 0);
        assert_eq!(topo.tile_of(4), 1);
        assert_eq!(topo.tile_of(7), 1);
    }

    #[test]
    fn partitions_cover_input_exactly() {
        let topo = Topology::new(4, 2).unwrap();
        for len in [0, 1, 3, 4, 7, 10, 4096] {
            let mut next = 0;
            for worker in 0..topo.num_workers() {
                let range = topo.partition(len, worker);
                assert_eq!(range.start, next);
                next = range.end;
            }
            assert_eq!(next, len);
        }
    }

    #[test]
    fn partition_sizes_differ_by_at_most_one() {
        let topo = Topology::new(8, 4).unwrap();
        let sizes: Vec<usize> = (0..8).map(|w| topo.partition(10, w).len()).collect();
        assert_eq!(sizes, vec![2, 2, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn short_input_leaves_trailing_workers_empty() {
        let topo = Topology::new(8, 4).unwrap();
        assert_eq!(topo.partition(3, 0), 0..1);
        assert_eq!(topo.partition(3, 2), 2..3);
        assert!(topo.partition(3, 7).is_empty());
    }
}
