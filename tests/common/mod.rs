//! Shared fixtures for integration tests: a real, throwaway git+onyo
//! repository per test, and a thin wrapper over `Cli::parse_from` +
//! `commands::dispatch` so tests drive onyo the same way the binary does.

use std::path::Path;
use std::process::Command;

use clap::Parser;
use onyo::cli::Cli;
use onyo::error::OnyoError;
use onyo::repo::Repo;
use tempfile::TempDir;

pub fn init_onyo_repo() -> (TempDir, Repo) {
    let dir = tempfile::tempdir().unwrap();
    Command::new("git").arg("init").current_dir(dir.path()).output().unwrap();
    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    let repo = Repo::init(dir.path()).unwrap();
    (dir, repo)
}

/// Run onyo as if invoked from the command line, always assuming `--yes` so
/// tests never block on a confirmation prompt.
pub fn run(cwd: &Path, args: &[&str]) -> Result<i32, OnyoError> {
    let mut full = vec!["onyo", "-C", cwd.to_str().unwrap(), "-y"];
    full.extend_from_slice(args);
    let cli = Cli::parse_from(full);
    onyo::commands::dispatch(cli)
}
