//! `onyo init` (spec §6).

use std::path::Path;

use crate::cli::Command;
use crate::error::OnyoError;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(ui: &Ui, cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Init { path } = cmd else { unreachable!() };
    let target = path.map(|p| if p.is_absolute() { p } else { cwd.join(p) }).unwrap_or_else(|| cwd.to_path_buf());
    let repo = Repo::init(&target)?;
    ui.print(&format!("initialized onyo repository at '{}'", repo.root().display()));
    Ok(0)
}
