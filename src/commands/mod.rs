//! Subcommand dispatch (spec §6). One module per subcommand; this file just
//! opens the repository (except for `init`, which creates one) and routes.

mod cat;
mod config;
mod edit;
mod fsck;
mod get;
mod history;
mod init;
mod mkdir;
mod mv;
mod new;
mod rm;
mod rmdir;
mod set;
mod tree;
mod tsv_to_yaml;
mod unset;
mod util;

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command};
use crate::error::OnyoError;
use crate::repo::Repo;
use crate::ui::Ui;

pub fn dispatch(cli: Cli) -> Result<i32, OnyoError> {
    let cwd: PathBuf = match &cli.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| OnyoError::Io(e.to_string()))?,
    };
    let ui = Ui::new(cli.quiet, cli.yes);

    if let Command::Init { .. } = &cli.command {
        return init::run(&ui, &cwd, cli.command);
    }

    let repo = Repo::open(&cwd)?;
    run_with_repo(&repo, &ui, &cwd, cli.command)
}

fn run_with_repo(repo: &Repo, ui: &Ui, cwd: &Path, command: Command) -> Result<i32, OnyoError> {
    match &command {
        Command::New { .. } => new::run(repo, ui, cwd, command),
        Command::Get { .. } => get::run(repo, ui, cwd, command),
        Command::Set { .. } => set::run(repo, ui, cwd, command),
        Command::Unset { .. } => unset::run(repo, ui, cwd, command),
        Command::Mv { .. } => mv::run(repo, ui, cwd, command),
        Command::Rm { .. } => rm::run(repo, ui, cwd, command),
        Command::Mkdir { .. } => mkdir::run(repo, ui, cwd, command),
        Command::Rmdir { .. } => rmdir::run(repo, ui, cwd, command),
        Command::Cat { .. } => cat::run(repo, ui, cwd, command),
        Command::Edit { .. } => edit::run(repo, ui, cwd, command),
        Command::Tree { .. } => tree::run(repo, ui, cwd, command),
        Command::History { .. } => history::run(repo, ui, cwd, command),
        Command::Fsck => fsck::run(repo, ui),
        Command::Config { .. } => config::run(repo, command),
        Command::TsvToYaml { .. } => tsv_to_yaml::run(cwd, command),
        Command::Init { .. } => unreachable!("handled before repo is opened"),
    }
}
