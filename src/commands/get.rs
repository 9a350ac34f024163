//! `onyo get` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::commands::util;
use crate::dotmap::Value;
use crate::error::OnyoError;
use crate::filters::{Filter, FilterSet};
use crate::query::{self, QuerySpec};
use crate::repo::Repo;
use crate::sort::{Direction, SortKey, SortSpec};
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Get {
        paths,
        mut keys,
        filters,
        include_dirs,
        depth,
        sort_ascending,
        sort_descending,
        machine_readable,
    } = cmd
    else {
        unreachable!()
    };

    if keys.is_empty() {
        keys = vec!["path".to_string()];
    }

    let mut groups = Vec::new();
    if !filters.is_empty() {
        let mut group = Vec::new();
        for term in &filters {
            group.push(Filter::parse(term)?);
        }
        groups.push(group);
    }

    let mut sort_keys = Vec::new();
    sort_keys.extend(sort_ascending.into_iter().map(|key| SortKey { key, direction: Direction::Ascending }));
    sort_keys.extend(sort_descending.into_iter().map(|key| SortKey { key, direction: Direction::Descending }));

    let spec = QuerySpec {
        paths: paths.into_iter().map(|p| util::resolve(cwd, &p)).collect(),
        keys: keys.clone(),
        depth,
        include_dirs,
        filters: FilterSet::new(groups),
        sort: SortSpec::new(sort_keys),
    };

    let rows = query::run(repo, &spec)?;

    if machine_readable {
        for row in &rows {
            let cells: Vec<String> = keys.iter().map(|k| render_cell(&row.values[k])).collect();
            println!("{}", cells.join("\t"));
        }
    } else {
        for row in &rows {
            let cells: Vec<String> = keys.iter().map(|k| format!("{k}={}", render_cell(&row.values[k]))).collect();
            ui.print(&cells.join("\t"));
        }
    }
    Ok(0)
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "<null>".to_string(),
        other => serde_yaml_ng::to_string(other).unwrap_or_default().trim().to_string(),
    }
}
