//! `onyo config` (spec SPEC_FULL §B): a passthrough to `git config --file .onyo/config`.

use crate::cli::Command;
use crate::error::OnyoError;
use crate::repo::Repo;

pub fn run(repo: &Repo, cmd: Command) -> Result<i32, OnyoError> {
    let Command::Config { args } = cmd else { unreachable!() };
    let config_path = repo.config_path();
    let config_path = config_path.display().to_string();
    let mut full_args = vec!["config".to_string(), "--file".to_string(), config_path];
    full_args.extend(args);
    let status = repo.git().run_passthrough(&full_args.iter().map(String::as_str).collect::<Vec<_>>());
    Ok(status.code().unwrap_or(1))
}
