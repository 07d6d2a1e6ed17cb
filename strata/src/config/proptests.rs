//! Property-based tests for merging and dotted-path access.

use super::accessor::{insert, leaf_paths, lookup};
use super::merger::ConfigMerger;
use crate::value::{Map, Value};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        "[a-zA-Z0-9 ._-]{0,12}".prop_map(Value::String),
    ]
}

// Nested mappings up to three levels deep
fn map_strategy() -> impl Strategy<Value = Map> {
    let leaf = scalar_strategy();
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map(key_strategy(), inner, 0..4).prop_map(Value::Mapping)
    });
    prop::collection::btree_map(key_strategy(), tree, 0..5)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every scalar leaf of the overlay is reachable with the overlay's value
    #[test]
    fn merge_overlay_leaves_win(base in map_strategy(), overlay in map_strategy()) {
        let mut merged = base;
        ConfigMerger::merge_into(&mut merged, overlay.clone());

        for key in leaf_paths(&overlay) {
            let expected = lookup(&overlay, &key);
            if expected.is_some_and(|v| !v.is_mapping()) {
                prop_assert_eq!(lookup(&merged, &key), expected);
            }
        }
    }

    // Base leaves survive unless the overlay defines something along their path
    #[test]
    fn merge_keeps_non_overlapping_base_leaves(base in map_strategy(), overlay in map_strategy()) {
        let mut merged = base.clone();
        ConfigMerger::merge_into(&mut merged, overlay.clone());

        for key in leaf_paths(&base) {
            let segments: Vec<&str> = key.split('.').collect();
            let touched = (1..=segments.len()).any(|n| {
                let prefix = segments[..n].join(".");
                lookup(&overlay, &prefix).is_some_and(|v| !v.is_mapping() || n == segments.len())
            });
            if !touched {
                prop_assert_eq!(lookup(&merged, &key), lookup(&base, &key));
            }
        }
    }

    // Merging an empty overlay is the identity
    #[test]
    fn merge_empty_is_identity(base in map_strategy()) {
        let mut merged = base.clone();
        ConfigMerger::merge_into(&mut merged, Map::new());
        prop_assert_eq!(merged, base);
    }

    // Merging a map onto itself changes nothing
    #[test]
    fn merge_is_idempotent(base in map_strategy()) {
        let mut merged = base.clone();
        ConfigMerger::merge_into(&mut merged, base.clone());
        prop_assert_eq!(merged, base);
    }

    // A value inserted at a path is what lookup returns
    #[test]
    fn insert_then_lookup(
        mut root in map_strategy(),
        path in prop::collection::vec(key_strategy(), 1..5),
        value in scalar_strategy()
    ) {
        let key = path.join(".");
        insert(&mut root, &key, value.clone());
        prop_assert_eq!(lookup(&root, &key), Some(&value));
    }

    // Lookups past a scalar never succeed
    #[test]
    fn lookup_past_leaf_is_missing(root in map_strategy(), extra in key_strategy()) {
        for key in leaf_paths(&root) {
            if lookup(&root, &key).is_some_and(|v| !v.is_mapping()) {
                let longer = format!("{key}.{extra}");
                prop_assert_eq!(lookup(&root, &longer), None);
            }
        }
    }

    // Coercion never fails and integers round-trip
    #[test]
    fn coerce_integers(i in any::<i64>()) {
        let expected = match i {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            _ => Value::Integer(i),
        };
        prop_assert_eq!(Value::coerce(&i.to_string()), expected);
    }
}
