//! `onyo rm` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::commands::new::print_diffs;
use crate::commands::util;
use crate::error::OnyoError;
use crate::inventory::Inventory;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Rm { paths, message, dry_run } = cmd else { unreachable!() };
    if paths.is_empty() {
        return Err(OnyoError::InvalidArgument("onyo rm requires at least one path".to_string()));
    }

    let mut inventory = Inventory::new(repo);
    for path in &paths {
        let path = util::resolve(cwd, path);
        if repo.is_asset_path(&path) {
            inventory.remove_asset(&path)?;
        } else {
            inventory.remove_directory(&path)?;
        }
    }

    if dry_run {
        print_diffs(ui, &inventory.diff()?);
        return Ok(0);
    }
    if !ui.confirm(&format!("Remove {} path(s)?", paths.len()))? {
        return Ok(1);
    }
    inventory.commit(message.as_deref())?;
    ui.print(&format!("removed {} path(s)", paths.len()));
    Ok(0)
}
