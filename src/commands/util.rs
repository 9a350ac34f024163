//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use crate::dotmap::DotMap;
use crate::error::OnyoError;
use crate::tsv::infer_scalar;

/// Resolve a CLI-supplied path against `cwd`, without requiring it to exist
/// (new assets/directories don't exist yet).
pub fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Parse repeated `--keys KEY=VALUE` arguments into one patch `DotMap`.
pub fn parse_assignments(pairs: &[String]) -> Result<DotMap, OnyoError> {
    let mut content = DotMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| OnyoError::InvalidArgument(format!("'{pair}' is not KEY=VALUE")))?;
        if key.is_empty() {
            return Err(OnyoError::InvalidArgument(format!("'{pair}' has an empty key")));
        }
        content
            .set(key, infer_scalar(value))
            .map_err(|e| OnyoError::InvalidArgument(e.to_string()))?;
    }
    Ok(content)
}
