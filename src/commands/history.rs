//! `onyo history` (spec §6): the commit timeline touching a path.

use std::path::Path;

use crate::cli::Command;
use crate::commands::util;
use crate::error::OnyoError;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::History { path, machine_readable } = cmd else { unreachable!() };
    let target = path.map(|p| util::resolve(cwd, &p));
    let relative = target.as_ref().map(|p| p.strip_prefix(repo.root()).unwrap_or(p).to_path_buf());

    let commits = repo
        .git()
        .walk_history(relative.as_deref(), None)
        .map_err(|e| OnyoError::Io(e.to_string()))?;

    for commit in &commits {
        if machine_readable {
            println!("{}\t{}\t{}", commit.sha, commit.time.to_rfc3339(), commit.subject);
        } else {
            ui.print(&format!("{}  {}  {}", &commit.sha[..commit.sha.len().min(8)], commit.time.to_rfc3339(), commit.subject));
        }
    }
    Ok(0)
}
