//! Sequential quickselect baseline
//!
//! Partition-based selection with a random pivot, expected O(n). The
//! partition orders descending (strictly-greater values left of the
//! pivot), so after selecting rank `k - 1` the prefix `[0, k)` holds the
//! k largest values in arbitrary order. This is the single-core
//! comparison path for the parallel top-k kernel.

use rand::Rng;

use crate::error::{Error, Result};

/// Rearrange `v` so its first `k` elements are the `k` largest, and
/// return them. Order within the prefix is arbitrary.
///
/// # Example
///
/// ```rust
/// use banyan_kernels::ops::select;
///
/// let mut v = [5, 3, 8, 1, 9, 2];
/// let mut top = select::top_k_largest(&mut v, 3)?.to_vec();
/// top.sort_unstable_by(|a, b| b.cmp(a));
/// assert_eq!(top, vec![9, 8, 5]);
/// # Ok::<(), banyan_kernels::Error>(())
/// ```
pub fn top_k_largest(v: &mut [i32], k: usize) -> Result<&[i32]> {
    if v.is_empty() {
        return Err(Error::EmptyInput {
            kernel: "quickselect",
        });
    }
    if k == 0 || k > v.len() {
        return Err(Error::InvalidK { k, n: v.len() });
    }
    let stop = v.len();
    quickselect(v, 0, stop, k - 1);
    Ok(&v[..k])
}

/// The `k`-th largest value of `v` (1-based: `k == 1` is the maximum).
pub fn kth_largest(v: &mut [i32], k: usize) -> Result<i32> {
    let prefix = top_k_largest(v, k)?;
    Ok(prefix[k - 1])
}

/// Place the element of descending rank `k` at position `k`, with every
/// greater element left of it.
fn quickselect(v: &mut [i32], start: usize, stop: usize, k: usize) {
    if stop - start <= 1 {
        return;
    }

    let pivot_index = start + rand::thread_rng().gen_range(0..stop - start);
    let pivot_index = partition(v, start, stop, pivot_index);

    if k == pivot_index {
        return;
    }
    if k < pivot_index {
        quickselect(v, start, pivot_index, k);
    } else {
        quickselect(v, pivot_index + 1, stop, k);
    }
}

/// Hoare-style descending partition: strictly-greater values end up left
/// of the pivot's final position, which is returned.
fn partition(v: &mut [i32], start: usize, stop: usize, pivot_index: usize) -> usize {
    let pivot_value = v[pivot_index];
    v.swap(pivot_index, stop - 1);

    let mut store_index = start;
    for i in start..stop {
        if v[i] > pivot_value {
            v.swap(store_index, i);
            store_index += 1;
        }
    }

    v.swap(store_index, stop - 1);
    store_index
}
