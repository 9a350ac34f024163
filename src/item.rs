//! `Item`: a `DotMap` augmented with a path and pseudo-key resolution (spec §4.5).

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::dotmap::{DotMap, KeyError, Value};
use crate::pseudokeys::{self, resolve_alias};
use crate::repo::Repo;

#[derive(Debug, Clone)]
pub struct Item {
    content: DotMap,
    path: Option<PathBuf>,
    /// Memoized pseudo-key values, keyed by canonical (alias-resolved) key.
    /// Never serialized; kept separate from `content` per the design notes'
    /// "two planes" rule (computed values never back-patch into content).
    cache: RefCell<HashMap<String, Value>>,
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl Item {
    pub fn new() -> Self {
        Self {
            content: DotMap::new(),
            path: None,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn from_content(content: DotMap) -> Self {
        Self {
            content,
            path: None,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Build an item for `path`, loading asset content from disk if `repo`
    /// classifies it as an asset. `path` must be absolute.
    pub fn from_path(path: PathBuf, repo: &Repo) -> Result<Self, crate::error::OnyoError> {
        assert!(path.is_absolute(), "Item::from_path requires an absolute path");
        let content = if repo.is_asset_path(&path) {
            codec::load_asset(&path)?
        } else {
            DotMap::new()
        };
        Ok(Self {
            content,
            path: Some(path),
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn absolute_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn relative_path(&self, repo: &Repo) -> Option<PathBuf> {
        self.path
            .as_ref()
            .and_then(|p| p.strip_prefix(repo.root()).ok())
            .map(|p| p.to_path_buf())
    }

    pub fn content(&self) -> &DotMap {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DotMap {
        &mut self.content
    }

    pub fn get(&self, key: &str, repo: &Repo) -> Result<Option<Value>, KeyError> {
        let key = resolve_alias(key);
        if let Some(cached) = self.cache.borrow().get(key) {
            return Ok(Some(cached.clone()));
        }
        if let Some(pk) = pseudokeys::lookup(key) {
            let value = (pk.implementation)(self, repo);
            self.cache.borrow_mut().insert(key.to_string(), value.clone());
            return Ok(Some(value));
        }
        self.content.get_cloned(key)
    }

    /// Writes to a pseudo-key set the cache directly and do not persist (spec §4.5).
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), KeyError> {
        let key = resolve_alias(key).to_string();
        if pseudokeys::is_pseudo_key(&key) {
            self.cache.borrow_mut().insert(key, value);
            Ok(())
        } else {
            self.content.set(&key, value)
        }
    }

    pub fn delete(&mut self, key: &str) -> Result<Option<Value>, KeyError> {
        let key = resolve_alias(key).to_string();
        if pseudokeys::is_pseudo_key(&key) {
            Ok(self.cache.borrow_mut().remove(&key))
        } else {
            self.content.delete(&key)
        }
    }

    pub fn contains(&self, key: &str, repo: &Repo) -> bool {
        let key = resolve_alias(key);
        if pseudokeys::is_pseudo_key(key) {
            return true;
        }
        self.get(key, repo).map(|v| v.is_some()).unwrap_or(false)
    }

    /// Merge `content` onto a copy of this item's content, returning the result.
    pub fn merged(&self, content: &DotMap) -> Self {
        let mut new_content = self.content.clone();
        new_content.update(content);
        Self::from_content(new_content).with_path_opt(self.path.clone())
    }

    fn with_path_opt(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dotmap::Mapping;

    #[test]
    fn merged_recursively_updates_content() {
        let mut base = Mapping::new();
        base.insert(Value::from("type"), Value::from("laptop"));
        let item = Item::from_content(DotMap::from_mapping(base));

        let mut patch = Mapping::new();
        patch.insert(Value::from("serial"), Value::from("123"));
        let merged = item.merged(&DotMap::from_mapping(patch));

        assert_eq!(merged.content().get("type").unwrap(), Some(&Value::from("laptop")));
        assert_eq!(merged.content().get("serial").unwrap(), Some(&Value::from("123")));
        // original untouched
        assert_eq!(item.content().get("serial").unwrap(), None);
    }
}
