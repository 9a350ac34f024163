//! `onyo mv` (spec §6): move into a directory, or rename in place with `--rename`.

use std::path::Path;

use crate::cli::Command;
use crate::commands::new::print_diffs;
use crate::commands::util;
use crate::error::OnyoError;
use crate::inventory::Inventory;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Mv { sources, destination, rename, message, dry_run } = cmd else { unreachable!() };
    let sources: Vec<std::path::PathBuf> = sources.iter().map(|p| util::resolve(cwd, p)).collect();
    let destination = util::resolve(cwd, &destination);

    let mut inventory = Inventory::new(repo);
    let mut results = Vec::new();

    if rename {
        let [src] = sources.as_slice() else {
            return Err(OnyoError::InvalidArgument("--rename takes exactly one source".to_string()));
        };
        let new_name = destination
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| OnyoError::InvalidArgument(format!("'{}' is not a valid name", destination.display())))?;
        let dst = if repo.is_asset_path(src) {
            inventory.rename_asset(src, new_name)?
        } else {
            inventory.rename_directory(src, new_name)?
        };
        results.push(dst);
    } else {
        for src in &sources {
            let dst = if repo.is_asset_path(src) {
                inventory.move_asset(src, &destination)?
            } else {
                inventory.move_directory(src, &destination)?
            };
            results.push(dst);
        }
    }

    if dry_run {
        print_diffs(ui, &inventory.diff()?);
        return Ok(0);
    }
    if !ui.confirm(&format!("Move {} item(s) to '{}'?", results.len(), destination.display()))? {
        return Ok(1);
    }
    inventory.commit(message.as_deref())?;
    for dst in &results {
        ui.print(&format!("-> {}", dst.display()));
    }
    Ok(0)
}
