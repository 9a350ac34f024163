//! `onyo unset` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::commands::new::print_diffs;
use crate::commands::util;
use crate::error::OnyoError;
use crate::inventory::Inventory;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Unset { keys, assets, message, dry_run } = cmd else { unreachable!() };
    if assets.is_empty() {
        return Err(OnyoError::InvalidArgument("onyo unset requires at least one asset".to_string()));
    }

    let mut inventory = Inventory::new(repo);
    for asset in &assets {
        inventory.unset_asset(&util::resolve(cwd, asset), &keys)?;
    }

    if dry_run {
        print_diffs(ui, &inventory.diff()?);
        return Ok(0);
    }
    if !ui.confirm(&format!("Unset {} key(s) on {} asset(s)?", keys.len(), assets.len()))? {
        return Ok(1);
    }
    inventory.commit(message.as_deref())?;
    ui.print(&format!("unset {} key(s) on {} asset(s)", keys.len(), assets.len()));
    Ok(0)
}
