use super::*;

use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Set(String, Payload),
    SetById(String, Payload),
    Get(String),
    GetById(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // Small alphabet so keys repeat and slots collide now and then.
    prop_oneof![
        "[a-z_]{0,12}",
        (0u32..64).prop_map(|i| format!("mod{i}")),
        Just("Aa".to_string()),
        Just("BB".to_string()),
    ]
}

fn payload_strategy() -> impl Strategy<Value = Payload> {
    (-1.0e6f32..1.0e6f32, -1.0e6f32..1.0e6f32).prop_map(|(a, b)| [a, b])
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        30 => (key.clone(), payload_strategy()).prop_map(|(k, v)| Op::Set(k, v)),
        20 => (key.clone(), payload_strategy()).prop_map(|(k, v)| Op::SetById(k, v)),
        25 => key.clone().prop_map(Op::Get),
        25 => key.clone().prop_map(Op::GetById),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_hash_matches_wide_arithmetic(key in any::<String>()) {
        // Same polynomial in i64, reduced mod 2^32 after every step.
        let wide = key
            .bytes()
            .fold(0i64, |h, b| (h * 31 + b as i64) & 0xFFFF_FFFF);
        prop_assert_eq!(hash(&key), wide as u32 as i32);
        prop_assert_eq!(slot_of(&key).index(), (wide as usize) % TABLE_SIZE);
    }

    #[test]
    fn prop_resolve_idempotent_and_in_range(keys in prop::collection::vec(any::<String>(), 1..50)) {
        let mut t = PercentTable::new();
        let first: Vec<SlotId> = keys.iter().map(|k| t.resolve(k)).collect();
        for (k, id) in keys.iter().zip(&first) {
            prop_assert!(id.index() < TABLE_SIZE);
            prop_assert_eq!(t.resolve(k), *id);
            prop_assert_eq!(*id, slot_of(k));
        }
    }

    #[test]
    fn prop_round_trip(key in any::<String>(), v in payload_strategy()) {
        let mut t = PercentTable::new();
        t.set(&key, v);
        prop_assert_eq!(t.get(&key), Some(v));
    }

    #[test]
    fn prop_equivalence_slot_model(ops in ops_strategy()) {
        let mut t = PercentTable::new();
        let mut m: HashMap<SlotId, Payload> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(key, v) => {
                    t.set(&key, v);
                    m.insert(slot_of(&key), v);
                }
                Op::SetById(key, v) => {
                    let id = t.id(&key);
                    t.set_unchecked(id, v);
                    m.insert(id, v);
                }
                Op::Get(key) => {
                    let expected = m.get(&slot_of(&key)).copied();
                    prop_assert_eq!(t.get(&key), expected);
                }
                Op::GetById(key) => {
                    let id = t.id(&key);
                    let fast = t.get_unchecked(id);
                    prop_assert_eq!(fast, t.get(&key));
                    prop_assert_eq!(fast, m.get(&id).copied());
                }
            }
        }

        prop_assert_eq!(t.occupied(), m.len());
    }
}

#[cfg(any(debug_assertions, feature = "collision-check"))]
proptest! {
    #[test]
    fn prop_validate_same_key_never_collides(key in any::<String>(), repeats in 1usize..5) {
        let mut t = PercentTable::new();
        for _ in 0..repeats {
            prop_assert!(t.validate_key(&key).is_ok());
        }
    }

    #[test]
    fn prop_validate_flags_exactly_slot_sharing(a in key_strategy(), b in key_strategy()) {
        let mut t = PercentTable::new();
        prop_assert!(t.validate_key(&a).is_ok());
        let shares_slot = a != b && slot_of(&a) == slot_of(&b);
        prop_assert_eq!(t.validate_key(&b).is_err(), shares_slot);
    }
}
