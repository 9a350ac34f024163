//! `onyo edit` (spec §6): open an asset in `$EDITOR`, then commit whatever changed.

use std::path::Path;

use crate::cli::Command;
use crate::codec;
use crate::commands::util;
use crate::consts::CONFIG_EDITOR;
use crate::error::OnyoError;
use crate::inventory::Inventory;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Edit { assets, message } = cmd else { unreachable!() };
    if assets.is_empty() {
        return Err(OnyoError::InvalidArgument("onyo edit requires at least one asset".to_string()));
    }
    let editor = repo
        .get_config(CONFIG_EDITOR)
        .or_else(|| std::env::var("EDITOR").ok())
        .ok_or_else(|| OnyoError::InvalidConfig("no editor configured (onyo.core.editor or $EDITOR)".to_string()))?;

    let mut inventory = Inventory::new(repo);
    let mut edited_any = false;
    for asset in &assets {
        let path = util::resolve(cwd, asset);
        if !repo.is_asset_path(&path) {
            return Err(OnyoError::NotAnAsset(path.clone()));
        }
        let before = std::fs::read_to_string(&path).map_err(|e| OnyoError::Io(e.to_string()))?;
        let quoted = shell_escape::escape(path.to_string_lossy()).into_owned();
        crate::shell_exec::run_interactive(&format!("{editor} {quoted}"))
            .map_err(|e| OnyoError::Io(e.to_string()))?;
        let content = codec::load_asset(&path)?;
        let after = codec::serialize(&content);
        if after == before {
            continue;
        }
        edited_any = true;
        inventory.modify_asset(&path, content)?;
    }

    if !edited_any {
        ui.print("nothing changed");
        return Ok(0);
    }
    inventory.commit(message.as_deref())?;
    Ok(0)
}
