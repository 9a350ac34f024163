//! `onyo tree` (spec §6): print the inventory as a tree.

use std::path::{Path, PathBuf};

use crate::cli::Command;
use crate::commands::util;
use crate::error::OnyoError;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Tree { paths } = cmd else { unreachable!() };
    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![repo.root().to_path_buf()]
    } else {
        paths.iter().map(|p| util::resolve(cwd, p)).collect()
    };
    for root in &roots {
        if !repo.is_inventory_dir(root) {
            return Err(OnyoError::NotADir(root.clone()));
        }
        ui.print(&display_name(root, repo));
        print_tree(repo, ui, root, "");
    }
    Ok(0)
}

fn display_name(path: &Path, repo: &Repo) -> String {
    path.strip_prefix(repo.root())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

fn print_tree(repo: &Repo, ui: &Ui, dir: &Path, prefix: &str) {
    let Ok(mut children) = repo.list_inventory_children(dir) else { return };
    children.sort();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "\u{2514}\u{2500}\u{2500} " } else { "\u{251c}\u{2500}\u{2500} " };
        let name = child.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        ui.print(&format!("{prefix}{branch}{name}"));
        if child.is_dir() {
            let next_prefix = format!("{prefix}{}", if last { "    " } else { "\u{2502}   " });
            print_tree(repo, ui, &child, &next_prefix);
        }
    }
}
