//! `onyo cat` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::commands::util;
use crate::error::OnyoError;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, _ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Cat { assets } = cmd else { unreachable!() };
    for asset in &assets {
        let path = util::resolve(cwd, asset);
        if !repo.is_asset_path(&path) {
            return Err(OnyoError::NotAnAsset(path.clone()));
        }
        let text = std::fs::read_to_string(&path).map_err(|e| OnyoError::Io(e.to_string()))?;
        print!("{text}");
    }
    Ok(0)
}
