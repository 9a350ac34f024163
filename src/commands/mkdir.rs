//! `onyo mkdir` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::commands::new::print_diffs;
use crate::commands::util;
use crate::error::OnyoError;
use crate::inventory::Inventory;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Mkdir { dirs, message, dry_run } = cmd else { unreachable!() };
    if dirs.is_empty() {
        return Err(OnyoError::InvalidArgument("onyo mkdir requires at least one directory".to_string()));
    }

    let mut inventory = Inventory::new(repo);
    for dir in &dirs {
        inventory.add_directory(&util::resolve(cwd, dir))?;
    }

    if dry_run {
        print_diffs(ui, &inventory.diff()?);
        return Ok(0);
    }
    if !ui.confirm(&format!("Create {} director(y/ies)?", dirs.len()))? {
        return Ok(1);
    }
    inventory.commit(message.as_deref())?;
    ui.print(&format!("created {} director(y/ies)", dirs.len()));
    Ok(0)
}
