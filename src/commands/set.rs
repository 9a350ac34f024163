//! `onyo set` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::commands::new::print_diffs;
use crate::commands::util;
use crate::error::OnyoError;
use crate::inventory::Inventory;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Set { keys, assets, message, dry_run } = cmd else { unreachable!() };
    if assets.is_empty() {
        return Err(OnyoError::InvalidArgument("onyo set requires at least one asset".to_string()));
    }
    let patch = util::parse_assignments(&keys)?;

    let mut inventory = Inventory::new(repo);
    for asset in &assets {
        inventory.modify_asset(&util::resolve(cwd, asset), patch.clone())?;
    }

    if dry_run {
        print_diffs(ui, &inventory.diff()?);
        return Ok(0);
    }
    if !ui.confirm(&format!("Set {} key(s) on {} asset(s)?", keys.len(), assets.len()))? {
        return Ok(1);
    }
    inventory.commit(message.as_deref())?;
    ui.print(&format!("set {} key(s) on {} asset(s)", keys.len(), assets.len()));
    Ok(0)
}
