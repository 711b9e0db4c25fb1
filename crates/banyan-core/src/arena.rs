//! Tile staging arenas
//!
//! Each tile owns a fixed budget of staging words (one word = one `i32`)
//! shared by its workers. Workers reserve their partition's footprint from
//! the arena under the tile lock before copying data in, mirroring a
//! software-managed local memory: the budget is the scarce shared resource,
//! the buffers themselves are owned by the reserving worker until handoff.
//!
//! Exhaustion is not fatal. With the default policy the worker falls back
//! to the process heap and the event is reported; with fallback disabled
//! the reservation fails with a typed error and the caller degrades
//! explicitly (see the kernel drivers).

use std::cell::UnsafeCell;
use std::ops::Deref;

use crate::error::{Error, Result};
use crate::lock::TileLock;

/// Staging policy for one kernel invocation.
#[derive(Debug, Clone, Copy)]
pub struct StagePolicy {
    /// Arena budget per tile, in `i32` words.
    pub arena_words_per_tile: usize,
    /// Whether an exhausted arena degrades to the process heap.
    pub allow_fallback: bool,
}

impl StagePolicy {
    /// Policy whose arenas exactly fit every tile's partitions for an
    /// input of `len` elements split over `num_workers` workers in tiles
    /// of `tile_size`.
    pub fn sized_for(len: usize, num_workers: usize, tile_size: usize) -> Self {
        let per_worker = len.div_ceil(num_workers.max(1));
        Self {
            arena_words_per_tile: per_worker * tile_size,
            allow_fallback: true,
        }
    }
}

impl Default for StagePolicy {
    fn default() -> Self {
        // 64 KiB of i32 staging per tile.
        Self {
            arena_words_per_tile: 16_384,
            allow_fallback: true,
        }
    }
}

#[derive(Debug)]
struct ArenaState {
    used: usize,
    high_water: usize,
}

/// Per-tile staging budget guarded by the tile lock.
///
/// Reservations are RAII: dropping a [`Reservation`] returns its words to
/// the arena. The arena never hands out storage, only accounting; see the
/// module docs.
#[derive(Debug)]
pub struct TileArena {
    lock: TileLock,
    capacity: usize,
    state: UnsafeCell<ArenaState>,
}

// SAFETY: `state` is only read or written while the tile lock is held
// (every method acquires it first), which serializes all access.
unsafe impl Sync for TileArena {}

impl TileArena {
    /// Create an arena with a budget of `capacity` words.
    pub fn new(capacity: usize) -> Self {
        Self {
            lock: TileLock::new(),
            capacity,
            state: UnsafeCell::new(ArenaState {
                used: 0,
                high_water: 0,
            }),
        }
    }

    /// Total budget in words.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Words currently reserved.
    pub fn used(&self) -> usize {
        let _guard = self.lock.acquire();
        // SAFETY: tile lock held, see the Sync impl.
        unsafe { (*self.state.get()).used }
    }

    /// Largest reservation footprint seen so far.
    pub fn high_water(&self) -> usize {
        let _guard = self.lock.acquire();
        // SAFETY: tile lock held, see the Sync impl.
        unsafe { (*self.state.get()).high_water }
    }

    /// Reserve `words` from the tile budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArenaExhausted`] when the remaining budget is too
    /// small; the arena is left unchanged.
    pub fn reserve(&self, words: usize) -> Result<Reservation<'_>> {
        let _guard = self.lock.acquire();
        // SAFETY: tile lock held, see the Sync impl.
        let state = unsafe { &mut *self.state.get() };
        let available = self.capacity - state.used;
        if words > available {
            return Err(Error::ArenaExhausted {
                requested: words,
                available,
            });
        }
        state.used += words;
        state.high_water = state.high_water.max(state.used);
        Ok(Reservation { arena: self, words })
    }

    fn release(&self, words: usize) {
        let _guard = self.lock.acquire();
        // SAFETY: tile lock held, see the Sync impl.
        let state = unsafe { &mut *self.state.get() };
        debug_assert!(state.used >= words);
        state.used -= words;
    }
}

/// A slice of the tile budget held by one worker.
#[derive(Debug)]
pub struct Reservation<'a> {
    arena: &'a TileArena,
    words: usize,
}

impl Reservation<'_> {
    /// Reserved size in words.
    pub fn words(&self) -> usize {
        self.words
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.arena.release(self.words);
    }
}

/// A worker's staged copy of its input partition.
///
/// Holds the backing buffer together with the arena reservation covering
/// it, so the budget is returned exactly when the copy dies.
#[derive(Debug)]
pub struct StagedBuffer<'a> {
    data: Vec<i32>,
    _reservation: Option<Reservation<'a>>,
}

impl StagedBuffer<'_> {
    /// Whether this buffer fell back to the process heap.
    pub fn is_fallback(&self) -> bool {
        self._reservation.is_none()
    }
}

impl Deref for StagedBuffer<'_> {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.data
    }
}

/// Copy `src` into a staging buffer backed by `arena`.
///
/// On arena exhaustion the copy degrades to the process heap when the
/// policy allows it (reported via `tracing::warn!`), otherwise the error
/// propagates and the caller decides how to degrade.
pub fn stage_partition<'a>(
    arena: &'a TileArena,
    src: &[i32],
    policy: &StagePolicy,
) -> Result<StagedBuffer<'a>> {
    let reservation = match arena.reserve(src.len()) {
        Ok(reservation) => Some(reservation),
        Err(err) if policy.allow_fallback => {
            tracing::warn!(
                error = %err,
                capacity = arena.capacity(),
                "tile arena exhausted, staging on process heap"
            );
            None
        }
        Err(err) => return Err(err),
    };
    Ok(StagedBuffer {
        data: src.to_vec(),
        _reservation: reservation,
    })
}
