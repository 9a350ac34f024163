//! Per-operation diff preview, used by `Inventory::diff()` and `--dry-run` (spec §4.9).

use std::path::PathBuf;

use crate::codec;
use crate::error::OnyoError;
use crate::repo::Repo;

use super::Operation;

#[derive(Debug, Clone)]
pub struct Diff {
    pub path: PathBuf,
    pub before: Option<String>,
    pub after: Option<String>,
}

fn read_if_exists(path: &std::path::Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

pub fn diff(op: &Operation, repo: &Repo) -> Result<Diff, OnyoError> {
    Ok(match op {
        Operation::NewAsset { path, content } => Diff {
            path: path.clone(),
            before: None,
            after: Some(codec::serialize(content)),
        },
        Operation::NewDirectory { path } => Diff {
            path: path.clone(),
            before: None,
            after: Some("(new directory)".to_string()),
        },
        Operation::RemoveAsset { path } => Diff {
            path: path.clone(),
            before: read_if_exists(path),
            after: None,
        },
        Operation::RemoveDirectory { path } => Diff {
            path: path.clone(),
            before: Some("(directory)".to_string()),
            after: None,
        },
        Operation::MoveAsset { src, dst } | Operation::RenameAsset { src, dst } => {
            let content = read_if_exists(src);
            Diff { path: dst.clone(), before: content.clone(), after: content }
        }
        Operation::MoveDirectory { src, dst } | Operation::RenameDirectory { src, dst } => {
            let _ = repo;
            Diff {
                path: dst.clone(),
                before: Some(format!("(directory moved from {})", src.display())),
                after: Some("(directory)".to_string()),
            }
        }
        Operation::ModifyAsset { path, content } => Diff {
            path: path.clone(),
            before: read_if_exists(path),
            after: Some(codec::serialize(content)),
        },
    })
}
