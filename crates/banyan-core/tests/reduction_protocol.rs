//! Integration tests for the reduction protocol
//!
//! These drive the substrate pieces together the way a kernel does:
//! per-worker scans into slots, a phase barrier, then the reduction tree,
//! across a range of worker counts.

use std::sync::Barrier;

use banyan_core::{
    ExtremeSlot, Extremum, LocalAggregator, ReductionTree, TileArena, Topology,
};

/// Full scan-then-reduce pass over `input` with `workers` workers.
fn scan_and_reduce(input: &[i32], workers: usize) -> ExtremeSlot {
    let topo = Topology::new(workers, 1).unwrap();
    let tree = ReductionTree::new(workers).unwrap();
    let barrier = Barrier::new(workers);

    let winners: Vec<Option<ExtremeSlot>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let tree = &tree;
                let barrier = &barrier;
                let topo = &topo;
                scope.spawn(move || {
                    let range = topo.partition(input.len(), worker);
                    let base = range.start as u32;
                    let slot = LocalAggregator::scan(Extremum::Max, &input[range], base);
                    barrier.wait();
                    tree.run(worker, slot, |acc, other| acc.merge(other, Extremum::Max))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(winners.iter().flatten().count(), 1, "exactly one winner");
    winners.into_iter().flatten().next().unwrap()
}

#[test]
fn winner_matches_sequential_scan_for_all_worker_counts() {
    let input: Vec<i32> = (0..1000).map(|i| (i * 31 + 17) % 257).collect();
    let expected = LocalAggregator::scan(Extremum::Max, &input, 0);

    for workers in [1, 2, 4, 8, 16] {
        let slot = scan_and_reduce(&input, workers);
        assert_eq!(slot.best, expected.best, "workers = {workers}");
        let mut holders = slot.holders.clone();
        holders.sort_unstable();
        let mut expected_holders = expected.holders.clone();
        expected_holders.sort_unstable();
        assert_eq!(holders, expected_holders, "workers = {workers}");
    }
}

#[test]
fn reduction_is_idempotent_over_fixed_slots() {
    // Re-running the reduction over the same per-worker slots must yield
    // the same winner value and holder set.
    let partitions: Vec<Vec<i32>> = vec![
        vec![3, 9, 1],
        vec![9, 2],
        vec![7, 9, 9],
        vec![0, 4],
    ];
    let slots: Vec<ExtremeSlot> = partitions
        .iter()
        .scan(0u32, |offset, partition| {
            let slot = LocalAggregator::scan(Extremum::Max, partition, *offset);
            *offset += partition.len() as u32;
            Some(slot)
        })
        .collect();

    let run = |slots: Vec<ExtremeSlot>| -> ExtremeSlot {
        let tree = ReductionTree::new(slots.len()).unwrap();
        let winners: Vec<Option<ExtremeSlot>> = std::thread::scope(|scope| {
            let handles: Vec<_> = slots
                .into_iter()
                .enumerate()
                .map(|(worker, slot)| {
                    let tree = &tree;
                    scope.spawn(move || {
                        tree.run(worker, slot, |acc, other| acc.merge(other, Extremum::Max))
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("worker panicked"))
                .collect()
        });
        winners.into_iter().flatten().next().unwrap()
    };

    let first = run(slots.clone());
    let second = run(slots);

    assert_eq!(first.best, second.best);
    let mut a = first.holders;
    let mut b = second.holders;
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
    assert_eq!(a, vec![1, 3, 6, 7]);
}

#[test]
fn empty_partitions_never_win() {
    // 8 workers, 2 elements: six workers hold sentinel slots.
    let slot = scan_and_reduce(&[-5, -3], 8);
    assert_eq!(slot.best, -3);
    assert_eq!(slot.holders, vec![1]);
}

#[test]
fn arena_budget_survives_a_full_invocation() {
    // Workers of one tile stage through the same arena concurrently; all
    // budget must come back once their buffers drop.
    let arena = TileArena::new(1024);
    let policy = banyan_core::StagePolicy {
        arena_words_per_tile: 1024,
        allow_fallback: false,
    };
    let data: Vec<i32> = (0..256).collect();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let arena = &arena;
            let policy = &policy;
            let chunk = &data[worker * 64..(worker + 1) * 64];
            scope.spawn(move || {
                let staged = banyan_core::arena::stage_partition(arena, chunk, policy)
                    .expect("budget fits all four workers");
                assert_eq!(staged.len(), 64);
            });
        }
    });

    assert_eq!(arena.used(), 0);
    assert_eq!(arena.high_water() % 64, 0);
}
