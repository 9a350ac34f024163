//! Command-line surface (spec §6).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "onyo", version, about = "Text-based inventory system, backed by git")]
pub struct Cli {
    /// Run as if onyo was started in this directory.
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Suppress non-essential output.
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Assume "yes" for any prompt.
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Enable debug logging.
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create one or more new assets.
    New {
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        clone: Option<PathBuf>,
        #[arg(long = "keys", value_name = "KEY=VALUE")]
        keys: Vec<String>,
        #[arg(long)]
        edit: bool,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "auto-message")]
        auto_message: bool,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Query asset/directory values.
    Get {
        #[arg(long = "path", value_name = "DIR")]
        paths: Vec<PathBuf>,
        #[arg(long = "keys", value_delimiter = ',')]
        keys: Vec<String>,
        #[arg(long = "match", value_name = "KEY=VALUE")]
        filters: Vec<String>,
        #[arg(long = "types")]
        include_dirs: bool,
        #[arg(long, default_value_t = 0)]
        depth: usize,
        #[arg(long = "sort-ascending", value_name = "KEY")]
        sort_ascending: Vec<String>,
        #[arg(long = "sort-descending", value_name = "KEY")]
        sort_descending: Vec<String>,
        #[arg(long = "machine-readable")]
        machine_readable: bool,
    },
    /// Set key/value pairs on assets.
    Set {
        #[arg(long = "keys", value_name = "KEY=VALUE", required = true)]
        keys: Vec<String>,
        #[arg(value_name = "ASSET")]
        assets: Vec<PathBuf>,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Remove keys from assets.
    Unset {
        #[arg(long = "keys", required = true)]
        keys: Vec<String>,
        #[arg(value_name = "ASSET")]
        assets: Vec<PathBuf>,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Move, or move-and-rename, assets/directories.
    Mv {
        #[arg(value_name = "SOURCE", required = true)]
        sources: Vec<PathBuf>,
        #[arg(value_name = "DESTINATION")]
        destination: PathBuf,
        #[arg(long = "rename")]
        rename: bool,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Remove assets/directories.
    Rm {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Create new inventory directories.
    Mkdir {
        #[arg(value_name = "DIR", required = true)]
        dirs: Vec<PathBuf>,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Remove inventory directories.
    Rmdir {
        #[arg(value_name = "DIR", required = true)]
        dirs: Vec<PathBuf>,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Print an asset's content.
    Cat {
        #[arg(value_name = "ASSET", required = true)]
        assets: Vec<PathBuf>,
    },
    /// Open an asset in `$EDITOR`, then validate and commit the change.
    Edit {
        #[arg(value_name = "ASSET", required = true)]
        assets: Vec<PathBuf>,
        #[arg(long = "message")]
        message: Option<String>,
    },
    /// Print the inventory as a tree.
    Tree {
        #[arg(value_name = "DIR")]
        paths: Vec<PathBuf>,
    },
    /// Show the recorded history of a path.
    History {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
        #[arg(long = "machine-readable")]
        machine_readable: bool,
    },
    /// Initialize a new onyo repository.
    Init {
        #[arg(value_name = "DIR")]
        path: Option<PathBuf>,
    },
    /// Check the repository for invariant violations.
    Fsck,
    /// Read or write `.onyo/config`, passing through to `git config`.
    Config {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Convert a tab-separated table into YAML asset documents.
    TsvToYaml {
        #[arg(value_name = "TSV_FILE")]
        file: Option<PathBuf>,
    },
}
