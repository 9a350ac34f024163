//! The onyo error taxonomy (spec §7).
//!
//! Mirrors the shape of the teacher's `git::GitError`: a flat enum with a
//! manual `Display` impl, propagated with `anyhow::Context` at call sites
//! rather than wrapped in a derive-heavy error crate.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum OnyoError {
    /// `path` is not an onyo working tree (missing `.onyo/` or not a VCS).
    InvalidRepo(String),
    /// An operation targets `.git/`, `.onyo/`, `.anchor`, or the asset-dir file.
    ProtectedPath(PathBuf),
    /// Expected an asset, found something else.
    NotAnAsset(PathBuf),
    /// Expected an inventory directory, found something else.
    NotADir(PathBuf),
    /// An inventory directory needed to be empty but was not.
    InventoryDirNotEmpty(PathBuf),
    /// A rename was requested as a move, or a move as a rename, or a cycle/escape was detected.
    InvalidInventoryOperation(String),
    /// The operation queue was non-empty where it was required to be empty.
    PendingInventoryOperation,
    /// The requested change would have no effect.
    Noop(String),
    /// Malformed CLI-level argument, beyond what the argument parser itself rejects.
    InvalidArgument(String),
    /// Malformed `KEY=VALUE` / `KEY!=VALUE` filter expression.
    InvalidFilter(String),
    /// An asset file is tracked but failed to parse, or violates a reserved-key rule.
    InvalidAsset(String),
    /// Carries a concrete process exit code for the CLI adapter to propagate verbatim.
    CliExit(i32),
    /// Could not read required input from stdin.
    UiInputError(String),
    /// A config value was missing or malformed.
    InvalidConfig(String),
    /// Catch-all for I/O and subprocess failures not covered above.
    Io(String),
}

impl fmt::Display for OnyoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnyoError::InvalidRepo(msg) => write!(f, "'{msg}' is not an onyo repository"),
            OnyoError::ProtectedPath(p) => write!(f, "'{}' is a protected path", p.display()),
            OnyoError::NotAnAsset(p) => write!(f, "'{}' is not an asset", p.display()),
            OnyoError::NotADir(p) => write!(f, "'{}' is not an inventory directory", p.display()),
            OnyoError::InventoryDirNotEmpty(p) => {
                write!(f, "'{}' is not empty", p.display())
            }
            OnyoError::InvalidInventoryOperation(msg) => write!(f, "{msg}"),
            OnyoError::PendingInventoryOperation => {
                write!(f, "there are still pending operations; commit or reset first")
            }
            OnyoError::Noop(msg) => write!(f, "{msg}"),
            OnyoError::InvalidArgument(msg) => write!(f, "{msg}"),
            OnyoError::InvalidFilter(msg) => write!(f, "{msg}"),
            OnyoError::InvalidAsset(msg) => write!(f, "{msg}"),
            OnyoError::CliExit(code) => write!(f, "exit {code}"),
            OnyoError::UiInputError(msg) => write!(f, "{msg}"),
            OnyoError::InvalidConfig(msg) => write!(f, "{msg}"),
            OnyoError::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for OnyoError {}

impl OnyoError {
    /// Exit-code mapping for the CLI boundary (spec §7).
    pub fn exit_code(&self) -> i32 {
        match self {
            OnyoError::InvalidArgument(_) => 2,
            OnyoError::Noop(_) => 1,
            OnyoError::CliExit(code) => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, OnyoError>;
