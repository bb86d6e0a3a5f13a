//! Property tests over construction and querying, plus a cross-thread
//! query-purity check.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use xorset::{Filter, Xor16, Xor8};

proptest! {
    #[test]
    fn prop_no_false_negatives(keys in prop::collection::hash_set(any::<u64>(), 1..1_000)) {
        let keys: Vec<u64> = keys.into_iter().collect();
        let filter = Xor8::try_from(&keys).unwrap();

        for key in &keys {
            prop_assert!(filter.contains(key), "false negative for key {}", key);
        }
    }

    #[test]
    fn prop_bit_identical_rebuild(keys in prop::collection::hash_set(any::<u64>(), 1..500)) {
        let keys: Vec<u64> = keys.into_iter().collect();

        let a = Xor16::try_from(&keys).unwrap();
        let b = Xor16::try_from(&keys).unwrap();

        prop_assert_eq!(a.seed, b.seed);
        prop_assert_eq!(a.block_length, b.block_length);
        prop_assert_eq!(&a.fingerprints, &b.fingerprints);
    }

    #[test]
    fn prop_table_sizing(n in 0u32..500_000) {
        let filter = Xor8::allocate(n).unwrap();
        let capacity = (1.23 * f64::from(n)) as usize + 32;
        let capacity = capacity / 3 * 3;

        prop_assert_eq!(filter.block_length, capacity / 3);
        prop_assert_eq!(filter.fingerprints.len(), 3 * filter.block_length);
    }
}

#[test]
fn queries_are_pure_across_threads() {
    let keys: Vec<u64> = (0..50_000).map(|i| i * 2 + 1).collect();
    let filter = Arc::new(Xor8::try_from(&keys).unwrap());

    let single: Vec<bool> = (0..100_000).map(|key| filter.contains(&key)).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || (0..100_000).map(|key| filter.contains(&key)).collect::<Vec<bool>>())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), single);
    }
}
