//! Layer merging and precedence handling.
//!
//! This module implements the union-with-override merge used when an
//! environment file is laid over the default file, and when bound
//! environment variables and explicit overrides are laid over both.

use crate::value::{Map, Value};

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use strata::{Map, Value, ConfigMerger};
///
/// let mut low = Map::new();
/// low.insert("host".to_string(), Value::from("127.0.0.1"));
/// low.insert("port".to_string(), Value::Integer(8080));
///
/// let mut high = Map::new();
/// high.insert("host".to_string(), Value::from("0.0.0.0"));
///
/// ConfigMerger::merge_into(&mut low, high);
/// assert_eq!(low["host"], Value::from("0.0.0.0"));
/// assert_eq!(low["port"], Value::Integer(8080));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple layers into one mapping.
    ///
    /// Layers are given from lowest to highest precedence.
    #[must_use]
    pub fn merge<I>(layers: I) -> Map
    where
        I: IntoIterator<Item = Map>,
    {
        let mut result = Map::new();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merge `source` into `target` (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Mapping onto mapping: merged key by key, recursively
    /// - Anything else: the source value replaces the target value
    /// - Keys present only in the target are kept
    /// - Sequences are replaced, not concatenated
    pub fn merge_into(target: &mut Map, source: Map) {
        for (key, source_value) in source {
            match source_value {
                Value::Mapping(source_child) => match target.get_mut(&key) {
                    Some(Value::Mapping(target_child)) => {
                        Self::merge_into(target_child, source_child);
                    }
                    _ => {
                        target.insert(key, Value::Mapping(source_child));
                    }
                },
                other => {
                    target.insert(key, other);
                }
            }
        }
    }
}
