//! `onyo new` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::codec;
use crate::commands::util;
use crate::consts::CONFIG_NEW_TEMPLATE;
use crate::dotmap::DotMap;
use crate::error::OnyoError;
use crate::inventory::Inventory;
use crate::operations::differs::Diff;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::New { path, template, clone, keys, edit, message, auto_message, dry_run } = cmd else {
        unreachable!()
    };

    let dir = path.map(|p| util::resolve(cwd, &p)).unwrap_or_else(|| repo.root().to_path_buf());

    let mut content = DotMap::new();
    if let Some(clone_from) = &clone {
        content = codec::load_asset(&util::resolve(cwd, clone_from))?;
    } else {
        let template_name = template.or_else(|| repo.get_config(CONFIG_NEW_TEMPLATE));
        if let Some(name) = template_name {
            let template_path = repo.template_dir().join(&name);
            if template_path.is_file() {
                content = codec::load_asset(&template_path)?;
            }
        }
    }
    content.update(&util::parse_assignments(&keys)?);

    if edit {
        content = edit_content(repo, content)?;
    }

    let mut inventory = Inventory::new(repo);
    let asset_path = inventory.add_asset(&dir, content)?;

    if dry_run {
        print_diffs(ui, &inventory.diff()?);
        return Ok(0);
    }
    if !ui.confirm(&format!("Create '{}'?", asset_path.display()))? {
        return Ok(1);
    }
    let msg = if auto_message { None } else { message.as_deref() };
    inventory.commit(msg)?;
    ui.print(&format!("+ {}", asset_path.display()));
    Ok(0)
}

fn edit_content(repo: &Repo, content: DotMap) -> Result<DotMap, OnyoError> {
    let draft = repo.onyo_dir().join("new-asset.yaml.tmp");
    codec::write_asset(&draft, &content)?;
    let editor = repo
        .get_config(crate::consts::CONFIG_EDITOR)
        .or_else(|| std::env::var("EDITOR").ok())
        .ok_or_else(|| OnyoError::InvalidConfig("no editor configured (onyo.core.editor or $EDITOR)".to_string()))?;
    let quoted = shell_escape::escape(draft.to_string_lossy()).into_owned();
    crate::shell_exec::run_interactive(&format!("{editor} {quoted}"))
        .map_err(|e| OnyoError::Io(e.to_string()))?;
    let edited = codec::load_asset(&draft);
    let _ = std::fs::remove_file(&draft);
    edited
}

pub(crate) fn print_diffs(ui: &Ui, diffs: &[Diff]) {
    for diff in diffs {
        match (&diff.before, &diff.after) {
            (None, Some(_)) => ui.print(&format!("+ {}", diff.path.display())),
            (Some(_), None) => ui.print(&format!("- {}", diff.path.display())),
            _ => ui.print(&format!("~ {}", diff.path.display())),
        }
    }
}
