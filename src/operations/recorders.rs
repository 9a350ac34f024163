//! Turning an executed `Operation` into the `(heading, line)` pair that
//! goes into the commit's "Inventory Operations" block (spec §4.9, §4.11).

use std::path::Path;

use crate::repo::Repo;

use super::{Operation, OperationKind, RecordLine};

fn relativize(repo: &Repo, path: &Path) -> std::path::PathBuf {
    path.strip_prefix(repo.root()).unwrap_or(path).to_path_buf()
}

pub fn record(op: &Operation, repo: &Repo) -> (OperationKind, RecordLine) {
    let kind = op.kind();
    let line = match op {
        Operation::NewAsset { path, .. }
        | Operation::NewDirectory { path }
        | Operation::RemoveAsset { path }
        | Operation::RemoveDirectory { path } => RecordLine::Single(relativize(repo, path)),
        Operation::MoveAsset { src, dst }
        | Operation::MoveDirectory { src, dst }
        | Operation::RenameAsset { src, dst }
        | Operation::RenameDirectory { src, dst } => {
            RecordLine::Pair(relativize(repo, src), relativize(repo, dst))
        }
        Operation::ModifyAsset { path, .. } => {
            let rel = relativize(repo, path);
            RecordLine::Pair(rel.clone(), rel)
        }
    };
    (kind, line)
}
