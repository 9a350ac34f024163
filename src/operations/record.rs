//! The "Inventory Operations" commit-message block: its shape, parsing and
//! formatting (spec §4.9, §4.11). Shared by the commit composer (producer)
//! and history reconstruction (consumer) so the two sides can never drift
//! out of sync with each other.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::consts::OPERATIONS_MARKER as MARKER;
use crate::error::OnyoError;

/// One of the nine operation kinds a transaction can record (spec §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    NewAssets,
    NewDirectories,
    RemovedAssets,
    RemovedDirectories,
    MovedAssets,
    MovedDirectories,
    RenamedAssets,
    RenamedDirectories,
    ModifiedAssets,
}

/// Declared commit-block order; also the order `Inventory::commit` writes headings in.
pub const KIND_ORDER: &[OperationKind] = &[
    OperationKind::NewAssets,
    OperationKind::NewDirectories,
    OperationKind::RemovedAssets,
    OperationKind::RemovedDirectories,
    OperationKind::MovedAssets,
    OperationKind::MovedDirectories,
    OperationKind::RenamedAssets,
    OperationKind::RenamedDirectories,
    OperationKind::ModifiedAssets,
];

impl OperationKind {
    pub fn heading(self) -> &'static str {
        match self {
            OperationKind::NewAssets => "New assets:",
            OperationKind::NewDirectories => "New directories:",
            OperationKind::RemovedAssets => "Removed assets:",
            OperationKind::RemovedDirectories => "Removed directories:",
            OperationKind::MovedAssets => "Moved assets:",
            OperationKind::MovedDirectories => "Moved directories:",
            OperationKind::RenamedAssets => "Renamed assets:",
            OperationKind::RenamedDirectories => "Renamed directories:",
            OperationKind::ModifiedAssets => "Modified assets:",
        }
    }

    pub fn from_heading(s: &str) -> Option<Self> {
        KIND_ORDER.iter().copied().find(|k| k.heading() == s)
    }

    /// Two-path ("src -> dst") entries vs. single-path entries.
    pub fn is_pair(self) -> bool {
        matches!(
            self,
            OperationKind::MovedAssets
                | OperationKind::MovedDirectories
                | OperationKind::RenamedAssets
                | OperationKind::RenamedDirectories
                | OperationKind::ModifiedAssets
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading())
    }
}

/// One recorded line under a heading: either a bare path or a `src -> dst` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecordLine {
    Single(PathBuf),
    Pair(PathBuf, PathBuf),
}

impl RecordLine {
    /// The path this line names as the item's *current* location: the
    /// destination of a pair, or the path itself for a single entry.
    pub fn subject(&self) -> &Path {
        match self {
            RecordLine::Single(p) => p,
            RecordLine::Pair(_, dst) => dst,
        }
    }

    fn to_line(&self) -> String {
        match self {
            RecordLine::Single(p) => format!("- {}", p.display()),
            RecordLine::Pair(src, dst) => format!("- {} -> {}", src.display(), dst.display()),
        }
    }
}

pub type Record = std::collections::HashMap<OperationKind, Vec<RecordLine>>;

/// Render a fully assembled record as the block appended to a commit message.
/// Lines within a heading are expected to already be sorted and deduplicated.
pub fn format(record: &Record) -> String {
    let mut out = String::from(MARKER);
    for kind in KIND_ORDER {
        let Some(lines) = record.get(kind) else { continue };
        if lines.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(kind.heading());
        for line in lines {
            out.push('\n');
            out.push_str(&line.to_line());
        }
    }
    out
}

/// Parse the operations block out of a commit body. Commits without the
/// marker simply carry no operations (`Ok` with an empty record) — most of
/// the history of a repository predates, or lies outside, onyo's control.
pub fn parse(body: &str) -> Result<Record, OnyoError> {
    let mut record = Record::new();
    let Some(marker_pos) = body.find(MARKER) else {
        return Ok(record);
    };
    let mut current: Option<OperationKind> = None;
    for line in body[marker_pos + MARKER.len()..].lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        if let Some(kind) = OperationKind::from_heading(line.trim()) {
            current = Some(kind);
            record.entry(kind).or_default();
            continue;
        }
        let Some(rest) = line.trim_start().strip_prefix("- ") else {
            return Err(OnyoError::InvalidInventoryOperation(format!(
                "malformed operations record line: '{line}'"
            )));
        };
        let Some(kind) = current else {
            return Err(OnyoError::InvalidInventoryOperation(format!(
                "operations record entry outside any heading: '{line}'"
            )));
        };
        let parts: Vec<&str> = rest.split(" -> ").collect();
        let entry = match parts.len() {
            1 => RecordLine::Single(PathBuf::from(parts[0])),
            2 => RecordLine::Pair(PathBuf::from(parts[0]), PathBuf::from(parts[1])),
            _ => {
                return Err(OnyoError::InvalidInventoryOperation(format!(
                    "malformed operations record line: '{line}'"
                )));
            }
        };
        record.entry(kind).or_default().push(entry);
    }
    Ok(record)
}
