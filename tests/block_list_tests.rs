use bmssp::data_structures::BlockList;

const M: usize = 3;
const B: i32 = 50_000;

fn filled() -> BlockList<usize, i32> {
    let mut list = BlockList::new(M, B);
    for i in 0..6 {
        list.insert(i, (i as i32) * 5 + 2).unwrap();
    }
    list
}

#[test]
fn insert_pull_and_split() {
    let mut list = filled();
    assert_eq!(list.len(), 6);

    let (mut keys, threshold) = list.pull();
    keys.sort_unstable();

    assert!(!list.is_empty());
    assert_eq!(keys, vec![0, 1, 2]);
    // Smallest remaining pair is (3, 17).
    assert_eq!(threshold, 17);
    assert_eq!(list.len(), 3);

    let (d0_blocks, d1_blocks) = list.block_counts();
    assert_eq!(d0_blocks, 0);
    assert!(d1_blocks >= 1);
}

#[test]
fn duplicate_inserts_keep_the_smaller_value() {
    let mut list = filled();
    list.insert(0, 0).unwrap();
    list.insert(1, 50).unwrap();
    list.insert(3, 6).unwrap();

    assert_eq!(list.len(), 6);
    // Key 1 kept its original value; the larger replacement was a no-op.
    assert_eq!(list.get(&1), Some(7));
    assert_eq!(list.get(&3), Some(6));

    let (mut keys, threshold) = list.pull();
    keys.sort_unstable();
    assert_eq!(keys, vec![0, 1, 3]);
    assert_eq!(threshold, 12);
}

#[test]
fn remove_then_pull_drains_the_rest() {
    let mut list = filled();
    for i in 0..4 {
        list.remove(&i);
    }
    // Removing an absent key is a silent no-op.
    list.remove(&99);
    assert_eq!(list.len(), 2);

    let (mut keys, threshold) = list.pull();
    keys.sort_unstable();
    assert_eq!(keys, vec![4, 5]);
    assert!(list.is_empty());
    // Both sequences drained: the threshold falls back to the bound.
    assert_eq!(threshold, B);
}

#[test]
fn batch_prepend_partitions_into_d0_blocks() {
    let mut list: BlockList<usize, i32> = BlockList::new(M, B);
    list.batch_prepend(vec![(1, 1), (2, 2), (3, 3), (6, 10), (7, 7)])
        .unwrap();
    list.batch_prepend(vec![(4, 4), (5, 5), (3, 10), (5, 6), (3, 2)])
        .unwrap();

    assert_eq!(list.len(), 7);
    assert_eq!(list.get(&3), Some(2));
    assert_eq!(list.get(&5), Some(5));

    let (d0_blocks, d1_blocks) = list.block_counts();
    assert_eq!(d0_blocks, 3);
    // Only the block carrying the absolute bound remains in D1.
    assert_eq!(d1_blocks, 1);
}

#[test]
fn batch_prepend_surfaces_before_larger_inserts() {
    let mut list: BlockList<usize, i32> = BlockList::new(2, 1000);
    list.insert(10, 100).unwrap();
    list.insert(11, 200).unwrap();
    list.batch_prepend(vec![(1, 5), (2, 3)]).unwrap();

    let (mut keys, threshold) = list.pull();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 2]);
    assert_eq!(threshold, 100);
}

#[test]
fn pull_threshold_bounds_returned_values() {
    let values = [17, 3, 25, 9, 21, 5, 13];
    let mut list: BlockList<usize, i32> = BlockList::new(2, 10_000);
    for (key, &value) in values.iter().enumerate() {
        list.insert(key, value).unwrap();
    }

    let mut previous_min = i32::MIN;
    while !list.is_empty() {
        let stored: Vec<i32> = (0..values.len())
            .filter_map(|key| list.get(&key))
            .collect();
        assert!(!stored.is_empty());

        let (keys, threshold) = list.pull();
        assert!(!keys.is_empty());

        let batch: Vec<i32> = keys.iter().map(|&k| values[k]).collect();
        for &value in &batch {
            assert!(value < threshold);
        }
        let batch_min = *batch.iter().min().unwrap();
        assert!(batch_min >= previous_min);
        previous_min = batch_min;
    }
}

#[test]
fn insert_beyond_the_bound_is_a_structural_error() {
    let mut list: BlockList<usize, i32> = BlockList::new(M, B);
    assert!(list.insert(0, B + 1).is_err());
}
