//! Property tests for OrderedRegistry

use proptest::prelude::*;
use std::collections::HashSet;
use storekit_collections::OrderedRegistry;

#[derive(Debug, Clone)]
enum Op {
    Append(u8),
    Insert(u8, usize),
    Set(u8, usize),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Append),
        (any::<u8>(), any::<usize>()).prop_map(|(v, i)| Op::Insert(v, i)),
        (any::<u8>(), any::<usize>()).prop_map(|(v, i)| Op::Set(v, i)),
        any::<u8>().prop_map(Op::Remove),
    ]
}

fn assert_positions_match(registry: &OrderedRegistry<u8>) {
    for (index, value) in registry.iter().enumerate() {
        assert_eq!(registry.index_of(value), Some(index));
    }
}

proptest! {
    #[test]
    fn appends_never_duplicate(values in prop::collection::vec(any::<u8>(), 0..64)) {
        let registry: OrderedRegistry<u8> = values.iter().copied().collect();

        let mut seen = HashSet::new();
        let expected: Vec<u8> = values.into_iter().filter(|v| seen.insert(*v)).collect();

        prop_assert_eq!(registry.elements(), expected.as_slice());
        assert_positions_match(&registry);
    }

    #[test]
    fn positions_track_any_mutation_sequence(ops in prop::collection::vec(op_strategy(), 0..128)) {
        let mut registry = OrderedRegistry::new();

        for op in ops {
            let before = registry.len();
            match op {
                Op::Append(v) => {
                    let present = registry.contains(&v);
                    prop_assert_eq!(registry.append(v), !present);
                }
                Op::Insert(v, i) => {
                    let index = i % (before + 1);
                    let present = registry.contains(&v);
                    prop_assert_eq!(registry.insert(v, index), !present);
                    if !present {
                        prop_assert_eq!(registry.index_of(&v), Some(index));
                    }
                }
                Op::Set(v, i) => {
                    if before > 0 {
                        let index = i % before;
                        let present = registry.contains(&v);
                        prop_assert_eq!(registry.set(v, index), !present);
                        prop_assert_eq!(registry.len(), before);
                    }
                }
                Op::Remove(v) => {
                    let present = registry.contains(&v);
                    prop_assert_eq!(registry.remove(&v).is_some(), present);
                    prop_assert!(!registry.contains(&v));
                }
            }

            let unique: HashSet<_> = registry.iter().collect();
            prop_assert_eq!(unique.len(), registry.len());
            assert_positions_match(&registry);
        }
    }
}
