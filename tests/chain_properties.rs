//! Property-based tests for records and chains

use pipewell::prelude::*;
use pipewell::{array, option, result};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_chain_record_matches_direct_merge(
        values in prop::collection::vec(any::<i64>(), 0..12)
    ) {
        let chained = values
            .iter()
            .enumerate()
            .fold(result::start::<()>(), |acc, (i, v)| {
                let v = *v;
                acc.bind(format!("f{}", i), move |_| Ok(v))
            })
            .unwrap();

        let direct = values
            .iter()
            .enumerate()
            .fold(Record::new(), |record, (i, v)| record.with(format!("f{}", i), *v));

        prop_assert_eq!(chained.len(), direct.len());
        for (i, v) in values.iter().enumerate() {
            let name = format!("f{}", i);
            prop_assert_eq!(chained.get::<i64>(&name), Some(v));
            prop_assert_eq!(direct.get::<i64>(&name), Some(v));
        }
    }

    #[test]
    fn prop_absent_step_stops_chain(len in 1usize..10, fail_at in 0usize..10) {
        let fail_at = fail_at % len;
        let mut calls = 0;

        let built = (0..len).fold(option::start(), |acc, i| {
            acc.bind(format!("f{}", i), |_| {
                calls += 1;
                if i == fail_at { None } else { Some(i) }
            })
        });

        prop_assert!(built.is_none());
        prop_assert_eq!(calls, fail_at + 1);
    }

    #[test]
    fn prop_last_write_wins(first in any::<i32>(), second in any::<i32>()) {
        let record = Record::new().with("k", first).with("other", 0).with("k", second);
        prop_assert_eq!(record.get::<i32>("k"), Some(&second));
        prop_assert_eq!(record.names().collect::<Vec<_>>(), vec!["k", "other"]);
    }

    #[test]
    fn prop_chunks_of_preserves_items(
        items in prop::collection::vec(any::<u8>(), 0..50),
        size in 1usize..8
    ) {
        let chunks = items.clone().pipe(array::chunks_of(size));
        prop_assert!(chunks.iter().all(|chunk| !chunk.is_empty() && chunk.len() <= size));
        prop_assert_eq!(chunks.concat(), items);
    }

    #[test]
    fn prop_partition_splits_by_test(items in prop::collection::vec(any::<i16>(), 0..50)) {
        let split = items.clone().pipe(array::partition(|n: &i16| *n >= 0));
        prop_assert!(split.right.iter().all(|n| *n >= 0));
        prop_assert!(split.left.iter().all(|n| *n < 0));
        prop_assert_eq!(split.left.len() + split.right.len(), items.len());
    }
}
