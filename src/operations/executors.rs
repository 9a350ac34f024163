//! Applying a queued `Operation` to the working tree (spec §4.9).
//!
//! Executors only touch the filesystem; staging and committing the result
//! is `Repository::commit`'s job, called once per transaction by
//! `Inventory::commit`.

use std::fs;
use std::path::PathBuf;

use crate::codec;
use crate::consts::ANCHOR_FILE_NAME;
use crate::error::OnyoError;

use super::Operation;

fn io_err(path: &std::path::Path, e: std::io::Error) -> OnyoError {
    OnyoError::Io(format!("'{}': {e}", path.display()))
}

/// Apply `op` to disk, returning the paths that must be staged for it.
pub fn execute(op: &Operation) -> Result<Vec<PathBuf>, OnyoError> {
    match op {
        Operation::NewAsset { path, content } => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            codec::write_asset(path, content)?;
            Ok(vec![path.clone()])
        }
        Operation::NewDirectory { path } => {
            fs::create_dir_all(path).map_err(|e| io_err(path, e))?;
            let anchor = path.join(ANCHOR_FILE_NAME);
            fs::write(&anchor, "").map_err(|e| io_err(&anchor, e))?;
            Ok(vec![anchor])
        }
        Operation::RemoveAsset { path } => {
            fs::remove_file(path).map_err(|e| io_err(path, e))?;
            Ok(vec![path.clone()])
        }
        Operation::RemoveDirectory { path } => {
            fs::remove_dir_all(path).map_err(|e| io_err(path, e))?;
            Ok(vec![path.clone()])
        }
        Operation::MoveAsset { src, dst }
        | Operation::MoveDirectory { src, dst }
        | Operation::RenameAsset { src, dst }
        | Operation::RenameDirectory { src, dst } => {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            fs::rename(src, dst).map_err(|e| io_err(src, e))?;
            Ok(vec![src.clone(), dst.clone()])
        }
        Operation::ModifyAsset { path, content } => {
            codec::write_asset(path, content)?;
            Ok(vec![path.clone()])
        }
    }
}
