//! Git adapter error type.

use std::fmt;

#[derive(Debug)]
pub enum GitError {
    /// A `git` invocation failed; carries its stderr/stdout.
    CommandFailed(String),
    /// `git` output could not be parsed into the expected shape.
    ParseError(String),
    /// `path` is not inside a git working tree at all.
    NotAGitRepo(String),
    /// A commit-ish did not resolve to a commit.
    UnknownRevision(String),
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::CommandFailed(msg) => write!(f, "{msg}"),
            GitError::ParseError(msg) => write!(f, "failed to parse git output: {msg}"),
            GitError::NotAGitRepo(path) => write!(f, "'{path}' is not a git repository"),
            GitError::UnknownRevision(rev) => write!(f, "unknown revision: {rev}"),
        }
    }
}

impl std::error::Error for GitError {}
