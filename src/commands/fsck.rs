//! `onyo fsck` (spec SPEC_FULL §B): enumerate every invariant violation
//! found, rather than stopping at the first one.

use crate::codec;
use crate::error::OnyoError;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn run(repo: &Repo, ui: &Ui) -> Result<i32, OnyoError> {
    let mut problems = Vec::new();

    for asset in repo.list_assets(None, 0)? {
        if let Err(e) = codec::load_asset(&asset) {
            problems.push(format!("{}: {e}", asset.display()));
        }
    }

    for dir in repo.list_directories(None, 0)? {
        if !dir.join(crate::consts::ANCHOR_FILE_NAME).is_file() && !repo.is_asset_dir(&dir) {
            problems.push(format!("{}: missing anchor file", dir.display()));
        }
    }

    if !repo.git().is_clean_worktree().map_err(|e| OnyoError::Io(e.to_string()))? {
        problems.push("working tree has uncommitted changes".to_string());
    }

    if problems.is_empty() {
        ui.print("no problems found");
        Ok(0)
    } else {
        for problem in &problems {
            ui.print(problem);
        }
        Err(OnyoError::InvalidAsset(format!("{} problem(s) found", problems.len())))
    }
}
