//! A nested mapping addressable through dot-paths (`a.b.c`).
//!
//! This is the substrate for asset records and `Item`s (spec §3, §4.3). We
//! reuse `serde_yaml_ng::Value` as the tagged `Scalar | Sequence | Mapping`
//! union the design notes call for, rather than hand-rolling a parallel enum:
//! it already preserves key insertion order in its `Mapping` (backed by
//! `indexmap`), which is exactly what round-tripping asset YAML needs.

use std::fmt;

pub use serde_yaml_ng::{Mapping, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyError(pub String);

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a dictionary", self.0)
    }
}

impl std::error::Error for KeyError {}

/// A mapping from dotted keys to values, with recursive-update semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DotMap {
    inner: Mapping,
}

impl DotMap {
    pub fn new() -> Self {
        Self {
            inner: Mapping::new(),
        }
    }

    pub fn from_mapping(inner: Mapping) -> Self {
        Self { inner }
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.inner
    }

    pub fn into_mapping(self) -> Mapping {
        self.inner
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).map(|v| v.is_some()).unwrap_or(false)
    }

    /// Look up a dotted key. Missing keys (at the leaf or along the way)
    /// return `Ok(None)`; walking *through* a non-mapping intermediate
    /// segment is a [`KeyError`].
    pub fn get(&self, key: &str) -> Result<Option<&Value>, KeyError> {
        let mut current = &self.inner;
        let segments: Vec<&str> = key.split('.').collect();
        for (i, seg) in segments.iter().enumerate() {
            let value = current.get(Value::String((*seg).to_string()));
            let is_last = i == segments.len() - 1;
            match value {
                None => return Ok(None),
                Some(v) if is_last => return Ok(Some(v)),
                Some(Value::Mapping(m)) => current = m,
                Some(_) => {
                    return Err(KeyError(segments[..=i].join(".")));
                }
            }
        }
        Ok(None)
    }

    pub fn get_cloned(&self, key: &str) -> Result<Option<Value>, KeyError> {
        self.get(key).map(|v| v.cloned())
    }

    /// Set a dotted key, creating intermediate mappings as needed.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), KeyError> {
        let segments: Vec<&str> = key.split('.').collect();
        Self::set_in(&mut self.inner, &segments, value)
    }

    fn set_in(map: &mut Mapping, segments: &[&str], value: Value) -> Result<(), KeyError> {
        let (head, rest) = segments.split_first().expect("non-empty key");
        let key = Value::String((*head).to_string());
        if rest.is_empty() {
            map.insert(key, value);
            return Ok(());
        }
        match map.get_mut(&key) {
            Some(Value::Mapping(sub)) => Self::set_in(sub, rest, value),
            Some(_) => Err(KeyError(head.to_string())),
            None => {
                let mut sub = Mapping::new();
                Self::set_in(&mut sub, rest, value)?;
                map.insert(key, Value::Mapping(sub));
                Ok(())
            }
        }
    }

    /// Remove a dotted key; returns the removed value, if any.
    pub fn delete(&mut self, key: &str) -> Result<Option<Value>, KeyError> {
        let segments: Vec<&str> = key.split('.').collect();
        Self::delete_in(&mut self.inner, &segments)
    }

    fn delete_in(map: &mut Mapping, segments: &[&str]) -> Result<Option<Value>, KeyError> {
        let (head, rest) = segments.split_first().expect("non-empty key");
        let key = Value::String((*head).to_string());
        if rest.is_empty() {
            return Ok(map.shift_remove(&key));
        }
        match map.get_mut(&key) {
            Some(Value::Mapping(sub)) => Self::delete_in(sub, rest),
            Some(_) => Err(KeyError(head.to_string())),
            None => Ok(None),
        }
    }

    /// Dotted keys of every leaf value, in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        self.items().map(|(k, _)| k)
    }

    /// `(dotted key, value)` for every leaf value, in traversal order.
    pub fn items(&self) -> impl Iterator<Item = (String, &Value)> {
        let mut out = Vec::new();
        Self::collect_items(&self.inner, String::new(), &mut out);
        out.into_iter()
    }

    fn collect_items<'a>(map: &'a Mapping, prefix: String, out: &mut Vec<(String, &'a Value)>) {
        for (k, v) in map {
            let Value::String(key) = k else { continue };
            let dotted = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match v {
                Value::Mapping(sub) if !sub.is_empty() => Self::collect_items(sub, dotted, out),
                other => out.push((dotted, other)),
            }
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.items().map(|(_, v)| v)
    }

    /// Merge another `DotMap` into this one recursively: nested mappings are
    /// merged key-by-key rather than replaced wholesale.
    pub fn update(&mut self, other: &DotMap) {
        Self::merge_mapping(&mut self.inner, &other.inner);
    }

    fn merge_mapping(into: &mut Mapping, from: &Mapping) {
        for (k, v) in from {
            match (into.get_mut(k), v) {
                (Some(Value::Mapping(existing)), Value::Mapping(incoming)) => {
                    Self::merge_mapping(existing, incoming);
                }
                _ => {
                    into.insert(k.clone(), v.clone());
                }
            }
        }
    }

    /// Replace top-level keys from a plain mapping (no recursive merge).
    pub fn update_top_level(&mut self, other: &Mapping) {
        for (k, v) in other {
            self.inner.insert(k.clone(), v.clone());
        }
    }
}

impl fmt::Display for DotMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}
