//! `get_items_by_query`: the engine behind `onyo get` (spec §4.7).

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::consts::UNSET_VALUE;
use crate::dotmap::Value;
use crate::error::OnyoError;
use crate::filters::FilterSet;
use crate::item::Item;
use crate::repo::Repo;
use crate::sort::SortSpec;

pub struct QuerySpec {
    /// Subtree roots to search; empty means the whole repository.
    pub paths: Vec<PathBuf>,
    pub keys: Vec<String>,
    /// `0` = unlimited.
    pub depth: usize,
    pub include_dirs: bool,
    pub filters: FilterSet,
    pub sort: SortSpec,
}

pub struct Row {
    pub item: Item,
    pub values: IndexMap<String, Value>,
}

pub fn run(repo: &Repo, spec: &QuerySpec) -> Result<Vec<Row>, OnyoError> {
    for path in &spec.paths {
        if path != repo.root() && !repo.is_inventory_dir(path) {
            return Err(OnyoError::InvalidArgument(format!(
                "'{}' is not a tracked inventory directory",
                path.display()
            )));
        }
    }
    let subtrees = if spec.paths.is_empty() { None } else { Some(spec.paths.as_slice()) };

    let mut paths = repo.list_assets(subtrees, spec.depth)?;
    if spec.include_dirs {
        paths.extend(repo.list_directories(subtrees, spec.depth)?);
    }

    let mut items = paths
        .into_iter()
        .map(|p| Item::from_path(p, repo))
        .collect::<Result<Vec<_>, _>>()?;

    items.retain(|item| spec.filters.matches(item, repo));
    spec.sort.sort(&mut items, repo);

    Ok(items
        .into_iter()
        .map(|item| {
            let mut values = IndexMap::new();
            for key in &spec.keys {
                let value = item
                    .get(key, repo)
                    .unwrap_or(None)
                    .unwrap_or_else(|| Value::String(UNSET_VALUE.to_string()));
                values.insert(key.clone(), value);
            }
            Row { item, values }
        })
        .collect())
}
