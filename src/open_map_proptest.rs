#![cfg(test)]

// Property tests for OpenHashMap kept inside the crate so they can check
// storage-level invariants that the public API does not expose.

use crate::open_map::OpenHashMap;
use crate::probe::Probe;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Put(i32, i64),
    PutAll(Vec<(i32, i64)>),
    Clear,
}

// Keys drawn from a narrow band collide often; `any` covers negatives and
// the extremes.
fn arb_key() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => -64i32..256,
        1 => (0i32..16).prop_map(|i| i * 32 + 1),
        1 => any::<i32>(),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (arb_key(), any::<i64>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => proptest::collection::vec((arb_key(), any::<i64>()), 0..40).prop_map(Op::PutAll),
        1 => Just(Op::Clear),
    ]
}

fn check_storage(m: &OpenHashMap) -> Result<(), TestCaseError> {
    let t = &m.table;
    prop_assert!(t.len() <= t.capacity() / 2, "load factor exceeded");
    let zero = usize::from(t.get(0).is_some());
    prop_assert_eq!(t.len(), t.occupied_slots() + zero);
    prop_assert!(t.longest_probe() < Probe::len_bound(t.capacity()));
    prop_assert_eq!(m.iter().count(), m.len());
    Ok(())
}

// Property: after every operation the storage invariants hold and all
// entries of a std HashMap model are reachable through both lookups.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_storage_invariants(ops in proptest::collection::vec(arb_op(), 1..120)) {
        let mut sut = OpenHashMap::new();
        let mut model: HashMap<i32, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let expected = model.insert(k, v).unwrap_or(i64::MIN);
                    prop_assert_eq!(sut.put(k, v), expected);
                }
                Op::PutAll(entries) => {
                    model.extend(entries.iter().copied());
                    sut.put_all(entries);
                }
                Op::Clear => {
                    model.clear();
                    sut.clear();
                    prop_assert_eq!(sut.capacity(), 32);
                }
            }
            check_storage(&sut)?;
            prop_assert_eq!(sut.len(), model.len());
            for (&k, &v) in &model {
                prop_assert!(sut.contains_key(k));
                prop_assert_eq!(sut.table.get(k), Some(v));
            }
        }
    }
}
