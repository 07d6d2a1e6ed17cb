//! Dotted-path access into nested mappings.
//!
//! A dotted path such as `services.foo.port` addresses a value across
//! mapping levels. Lookups never fail: any absent segment, or a segment that
//! would have to descend into a non-mapping value, yields `None`.
//!
//! Keys are case-insensitive. Parsed files are stored with lower-cased keys
//! and paths are lower-cased before they are resolved.

use crate::config::merger::ConfigMerger;
use crate::value::{Map, Value};

/// Separator between path segments.
pub const KEY_DELIMITER: char = '.';

/// Look up a dotted path in a mapping.
///
/// # Examples
///
/// ```
/// use strata::config::accessor;
/// use strata::{Map, Value};
///
/// let mut api = Map::new();
/// api.insert("port".to_string(), Value::Integer(8080));
/// let mut root = Map::new();
/// root.insert("api".to_string(), Value::Mapping(api));
///
/// assert_eq!(accessor::lookup(&root, "api.port"), Some(&Value::Integer(8080)));
/// assert_eq!(accessor::lookup(&root, "API.Port"), Some(&Value::Integer(8080)));
/// assert_eq!(accessor::lookup(&root, "api.port.extra"), None);
/// assert_eq!(accessor::lookup(&root, "api.missing"), None);
/// ```
#[must_use]
pub fn lookup<'a>(root: &'a Map, path: &str) -> Option<&'a Value> {
    let path = path.to_lowercase();
    let mut segments = path.split(KEY_DELIMITER);
    let first = segments.next()?;
    let mut current = root.get(first)?;
    for segment in segments {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}

/// Insert a value at a dotted path, creating intermediate mappings.
///
/// The path is lower-cased. Intermediate values that are not mappings are
/// replaced by mappings.
pub fn insert(root: &mut Map, path: &str, value: Value) {
    insert_segments(root, &path.to_lowercase(), value);
}

fn insert_segments(root: &mut Map, path: &str, value: Value) {
    match path.split_once(KEY_DELIMITER) {
        None => {
            root.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = root
                .entry(head.to_string())
                .or_insert_with(|| Value::Mapping(Map::new()));
            if !entry.is_mapping() {
                *entry = Value::Mapping(Map::new());
            }
            if let Value::Mapping(child) = entry {
                insert_segments(child, rest, value);
            }
        }
    }
}

/// Normalize a parsed document: keys are lower-cased and literal dotted
/// keys are expanded into nested mappings.
///
/// Entries that land on the same path are deep-merged in key order, so
/// `"api.port": 1` and `api: {host: h}` end up side by side under `api`.
#[must_use]
pub fn expand(root: Map) -> Map {
    let mut out = Map::new();
    for (key, value) in root {
        let value = match value {
            Value::Mapping(child) => Value::Mapping(expand(child)),
            other => other,
        };
        let mut entry = Map::new();
        insert(&mut entry, &key, value);
        ConfigMerger::merge_into(&mut out, entry);
    }
    out
}

/// Collect every leaf (non-mapping) value with its dotted path, in key
/// order.
///
/// Empty mappings are leaves too, so they stay addressable. Keys that
/// already contain the delimiter are kept as written, which is how literal
/// dotted keys (`services.foo.port: PORT`) survive flattening.
#[must_use]
pub fn flatten(root: &Map) -> Vec<(String, &Value)> {
    let mut out = Vec::new();
    collect(root, None, &mut out);
    out
}

/// Collect the dotted paths of every leaf value, in key order.
#[must_use]
pub fn leaf_paths(root: &Map) -> Vec<String> {
    flatten(root).into_iter().map(|(path, _)| path).collect()
}

fn collect<'a>(map: &'a Map, prefix: Option<&str>, out: &mut Vec<(String, &'a Value)>) {
    for (key, value) in map {
        let path = match prefix {
            Some(p) => format!("{p}{KEY_DELIMITER}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Mapping(child) if !child.is_empty() => collect(child, Some(&path), out),
            _ => out.push((path, value)),
        }
    }
}
