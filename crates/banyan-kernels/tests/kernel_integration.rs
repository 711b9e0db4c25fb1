//! Integration tests for the selection kernels
//!
//! Cross-checks the protocol kernels against the sequential and rayon
//! reference variants on deterministic pseudo-random inputs, across
//! topologies.

use banyan_core::Topology;
use banyan_kernels::ops::{self, reference, select, topk};

/// Small deterministic LCG so failures reproduce without a seed dump.
fn pseudo_random(len: usize, seed: u64) -> Vec<i32> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as i32 % 10_000
        })
        .collect()
}

#[test]
fn argmax_agrees_with_references_across_topologies() {
    for (len, seed) in [(1, 1), (17, 2), (1000, 3), (10_000, 4)] {
        let input = pseudo_random(len, seed);
        let expected = reference::argmax_seq(&input).unwrap();
        let expected_par = reference::argmax_par(&input).unwrap();
        assert_eq!(expected, expected_par, "len = {len}");

        for (workers, tile) in [(1, 1), (2, 2), (4, 2), (8, 4)] {
            let topo = Topology::new(workers, tile).unwrap();
            let result = ops::argmax(&input, &topo).unwrap();
            assert_eq!(
                result.best, expected.best,
                "len = {len} workers = {workers}"
            );
            assert_eq!(
                result.holders, expected.holders,
                "len = {len} workers = {workers}"
            );
        }
    }
}

#[test]
fn argmin_agrees_with_reference() {
    let input = pseudo_random(5_000, 7);
    let expected = reference::argmin_seq(&input).unwrap();
    let topo = Topology::new(8, 4).unwrap();
    let result = ops::argmin(&input, &topo).unwrap();
    assert_eq!(result.best, expected.best);
    assert_eq!(result.holders, expected.holders);
}

#[test]
fn topk_agrees_with_quickselect_and_heap() {
    let input = pseudo_random(2_048, 11);
    let topo = Topology::new(8, 4).unwrap();

    for k in [1, 3, 64, 500] {
        let parallel = topk::largest(&input, k, &topo).unwrap();

        let sequential =
            reference::topk_seq(&input, k, banyan_core::Keep::Largest).unwrap();
        assert_eq!(parallel, sequential, "k = {k}");

        let mut scratch = input.clone();
        let mut selected = select::top_k_largest(&mut scratch, k).unwrap().to_vec();
        selected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(parallel, selected, "k = {k}");
    }
}

#[test]
fn known_small_inputs() {
    let topo2 = Topology::new(2, 2).unwrap();
    let result = ops::argmax(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3], &topo2).unwrap();
    assert_eq!(result.best, 9);
    assert_eq!(result.holders, vec![5]);

    let topo1 = Topology::new(1, 1).unwrap();
    let result = ops::argmax(&[7, 7, 2, 7], &topo1).unwrap();
    assert_eq!(result.best, 7);
    assert_eq!(result.holders, vec![0, 1, 3]);

    let top = topk::largest(&[5, 3, 8, 1, 9, 2], 3, &topo2).unwrap();
    assert_eq!(top, vec![9, 8, 5]);
}

#[test]
fn negative_only_inputs() {
    let input = [-40, -7, -93, -7, -12];
    let topo = Topology::new(4, 2).unwrap();

    let max = ops::argmax(&input, &topo).unwrap();
    assert_eq!(max.best, -7);
    assert_eq!(max.holders, vec![1, 3]);

    let min = ops::argmin(&input, &topo).unwrap();
    assert_eq!(min.best, -93);
    assert_eq!(min.holders, vec![2]);
}

#[test]
fn repeated_invocations_are_stable() {
    // The same invocation repeated must give identical public results
    // despite nondeterministic merge arrival order inside the tree.
    let input = pseudo_random(4_096, 23);
    let topo = Topology::new(8, 2).unwrap();
    let first = ops::argmax(&input, &topo).unwrap();
    for _ in 0..10 {
        assert_eq!(ops::argmax(&input, &topo).unwrap(), first);
    }
}
