//! History reconstruction: deriving `onyo.was.*` pseudo-keys from commit
//! messages rather than filesystem timestamps (spec §4.11).
//!
//! Walks `git log` newest-first once per `Repo`, replays each commit's
//! "Inventory Operations" block (see `operations::record`), and keeps, per
//! relative path, the most recent commit that touched it ("modified") and
//! the earliest commit that introduced it ("created").

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::dotmap::Value;
use crate::error::OnyoError;
use crate::git::{Commit, Repository};
use crate::operations::record::{self, OperationKind};

#[derive(Debug, Clone)]
pub struct HistoryRecord {
    sha: String,
    time: chrono::DateTime<chrono::FixedOffset>,
    author_name: String,
    author_email: String,
    committer_name: String,
    committer_email: String,
}

impl HistoryRecord {
    fn from_commit(commit: &Commit) -> Self {
        Self {
            sha: commit.sha.clone(),
            time: commit.time,
            author_name: commit.author_name.clone(),
            author_email: commit.author_email.clone(),
            committer_name: commit.committer_name.clone(),
            committer_email: commit.committer_email.clone(),
        }
    }

    /// Resolve one of the `onyo.was.{created,modified}.*` leaf field names.
    pub fn field(&self, name: &str) -> Value {
        match name {
            "hexsha" => Value::from(self.sha.clone()),
            "time" => Value::from(self.time.to_rfc3339()),
            "author.name" => Value::from(self.author_name.clone()),
            "author.email" => Value::from(self.author_email.clone()),
            "committer.name" => Value::from(self.committer_name.clone()),
            "committer.email" => Value::from(self.committer_email.clone()),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Default)]
pub struct History {
    created: HashMap<PathBuf, HistoryRecord>,
    modified: HashMap<PathBuf, HistoryRecord>,
}

fn is_creating(kind: OperationKind) -> bool {
    matches!(kind, OperationKind::NewAssets | OperationKind::NewDirectories)
}

/// Headings whose entries mean "this path exists, as of this commit" —
/// i.e. everything except removals.
fn is_touching(kind: OperationKind) -> bool {
    !matches!(kind, OperationKind::RemovedAssets | OperationKind::RemovedDirectories)
}

impl History {
    /// Walk the whole history of `git` once and index it. `git log`'s
    /// default order is newest-first, which `modified` relies on (first
    /// match wins) and `created` exploits by overwriting until only the
    /// oldest match remains.
    pub fn build(git: &Repository) -> Result<Self, OnyoError> {
        let mut history = History::default();
        let commits = git
            .walk_history(None, None)
            .map_err(|e| OnyoError::Io(format!("failed to read history: {e}")))?;
        for commit in &commits {
            let record = record::parse(&commit.body)?;
            let rec = HistoryRecord::from_commit(commit);
            for (kind, lines) in &record {
                for line in lines {
                    let subject = line.subject().to_path_buf();
                    if is_touching(*kind) {
                        history.modified.entry(subject.clone()).or_insert_with(|| rec.clone());
                    }
                    if is_creating(*kind) {
                        history.created.insert(subject, rec.clone());
                    }
                }
            }
        }
        Ok(history)
    }

    pub fn created(&self, path: &Path) -> Option<&HistoryRecord> {
        self.created.get(path)
    }

    pub fn modified(&self, path: &Path) -> Option<&HistoryRecord> {
        self.modified.get(path)
    }
}
