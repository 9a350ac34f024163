//! `Inventory`: the mutation façade (spec §4.9). Every asset/directory
//! mutation is validated and enqueued here; nothing touches disk or git
//! until `commit()` executes the whole queue as one transaction.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::consts::{DEFAULT_FAUX_SERIAL_LENGTH, DEFAULT_NAME_FORMAT, FAUX_SERIAL_PREFIX};
use crate::dotmap::{DotMap, Value};
use crate::error::OnyoError;
use crate::faux;
use crate::naming;
use crate::operations::record::Record;
use crate::operations::{differs, executors, recorders, record, Operation, Queue};
use crate::repo::Repo;

/// Keys `onyo.assets.name-format` may reference for a serial number. A
/// content value of `"faux"` on either is the sentinel requesting a
/// generated one (spec §4.9.1).
const SERIAL_KEYS: [&str; 2] = ["serial_number", "serial"];
const FAUX_SENTINEL: &str = "faux";

pub struct Inventory<'a> {
    repo: &'a Repo,
    queue: Queue,
    pending_paths: HashSet<PathBuf>,
}

impl<'a> Inventory<'a> {
    pub fn new(repo: &'a Repo) -> Self {
        Self { repo, queue: Queue::new(), pending_paths: HashSet::new() }
    }

    pub fn operations_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    fn assert_creatable(&self, path: &Path) -> Result<(), OnyoError> {
        if self.repo.is_protected_path(path) {
            return Err(OnyoError::ProtectedPath(path.to_path_buf()));
        }
        if path.exists() || self.pending_paths.contains(path) {
            return Err(OnyoError::InvalidArgument(format!("'{}' already exists", path.display())));
        }
        Ok(())
    }

    /// Whether `name` is already used as a basename by a committed asset or
    /// a pending add/rename target, other than `exclude` itself.
    fn basename_taken(&self, name: &OsStr, exclude: Option<&Path>) -> Result<bool, OnyoError> {
        let is_other = |p: &Path| p.file_name() == Some(name) && Some(p) != exclude;
        if self.repo.list_assets(None, 0)?.iter().any(|p| is_other(p)) {
            return Ok(true);
        }
        Ok(self.pending_paths.iter().any(|p| is_other(p)))
    }

    /// No two assets may share a basename (spec invariant: unique basenames).
    fn assert_unique_basename(&self, name: &OsStr, exclude: Option<&Path>) -> Result<(), OnyoError> {
        if self.basename_taken(name, exclude)? {
            return Err(OnyoError::InvalidArgument(format!(
                "an asset named '{}' already exists",
                name.to_string_lossy()
            )));
        }
        Ok(())
    }

    fn assert_is_asset(&self, path: &Path) -> Result<(), OnyoError> {
        if !self.repo.is_asset_path(path) {
            return Err(OnyoError::NotAnAsset(path.to_path_buf()));
        }
        Ok(())
    }

    fn assert_is_dir(&self, path: &Path) -> Result<(), OnyoError> {
        if !self.repo.is_inventory_dir(path) {
            return Err(OnyoError::NotADir(path.to_path_buf()));
        }
        Ok(())
    }

    /// Enqueue a new asset inside `dir`, naming it from `onyo.assets.name-format`.
    pub fn add_asset(&mut self, dir: &Path, mut content: DotMap) -> Result<PathBuf, OnyoError> {
        if dir != self.repo.root() {
            self.assert_is_dir(dir)?;
        }
        let format = self.repo.name_format().unwrap_or_else(|| DEFAULT_NAME_FORMAT.to_string());
        if let Some(key) = faux_serial_key(&content) {
            let serial = self.unique_faux_serial(&format, &content, key)?;
            content.set(key, Value::from(serial)).map_err(|e| OnyoError::InvalidArgument(e.to_string()))?;
        }
        let name = naming::render(&format, &content);
        if name.is_empty() {
            return Err(OnyoError::InvalidArgument("rendered asset name is empty".to_string()));
        }
        let path = dir.join(&name);
        self.assert_creatable(&path)?;
        self.assert_unique_basename(OsStr::new(&name), None)?;
        self.pending_paths.insert(path.clone());
        self.queue.push(Operation::NewAsset { path: path.clone(), content });
        Ok(path)
    }

    /// Generate a faux serial, regenerating until the name it would render
    /// into doesn't collide with a committed or pending asset basename.
    fn unique_faux_serial(&self, format: &str, content: &DotMap, serial_key: &str) -> Result<String, OnyoError> {
        loop {
            let candidate = format!("{FAUX_SERIAL_PREFIX}{}", faux::generate(DEFAULT_FAUX_SERIAL_LENGTH));
            let mut trial = content.clone();
            trial
                .set(serial_key, Value::from(candidate.clone()))
                .map_err(|e| OnyoError::InvalidArgument(e.to_string()))?;
            let name = naming::render(format, &trial);
            if !name.is_empty() && !self.basename_taken(OsStr::new(&name), None)? {
                return Ok(candidate);
            }
        }
    }

    pub fn add_directory(&mut self, dir: &Path) -> Result<(), OnyoError> {
        self.assert_creatable(dir)?;
        self.pending_paths.insert(dir.to_path_buf());
        self.queue.push(Operation::NewDirectory { path: dir.to_path_buf() });
        Ok(())
    }

    pub fn remove_asset(&mut self, path: &Path) -> Result<(), OnyoError> {
        self.assert_is_asset(path)?;
        self.queue.push(Operation::RemoveAsset { path: path.to_path_buf() });
        Ok(())
    }

    /// Recursively enqueues removal of every asset and subdirectory before
    /// the directory itself (spec §4.9: `remove_directory` is implicitly
    /// recursive, each removal still recorded individually).
    pub fn remove_directory(&mut self, dir: &Path) -> Result<(), OnyoError> {
        self.assert_is_dir(dir)?;
        self.enqueue_directory_removal(dir)
    }

    fn enqueue_directory_removal(&mut self, dir: &Path) -> Result<(), OnyoError> {
        for child in self.repo.list_inventory_children(dir)? {
            if child.is_dir() {
                self.enqueue_directory_removal(&child)?;
            } else {
                self.queue.push(Operation::RemoveAsset { path: child });
            }
        }
        self.queue.push(Operation::RemoveDirectory { path: dir.to_path_buf() });
        Ok(())
    }

    pub fn move_asset(&mut self, src: &Path, dst_dir: &Path) -> Result<PathBuf, OnyoError> {
        self.assert_is_asset(src)?;
        self.assert_is_dir(dst_dir)?;
        let dst = dst_dir.join(file_name(src)?);
        self.assert_creatable(&dst)?;
        self.pending_paths.insert(dst.clone());
        self.queue.push(Operation::MoveAsset { src: src.to_path_buf(), dst: dst.clone() });
        Ok(dst)
    }

    pub fn move_directory(&mut self, src: &Path, dst_dir: &Path) -> Result<PathBuf, OnyoError> {
        self.assert_is_dir(src)?;
        self.assert_is_dir(dst_dir)?;
        let dst = dst_dir.join(file_name(src)?);
        self.assert_creatable(&dst)?;
        self.pending_paths.insert(dst.clone());
        self.queue.push(Operation::MoveDirectory { src: src.to_path_buf(), dst: dst.clone() });
        Ok(dst)
    }

    pub fn rename_asset(&mut self, src: &Path, new_name: &str) -> Result<PathBuf, OnyoError> {
        self.assert_is_asset(src)?;
        let dst = sibling(src, new_name, self.repo.root());
        if dst == src {
            return Err(OnyoError::Noop(format!("'{}' already has that name", src.display())));
        }
        self.assert_creatable(&dst)?;
        self.assert_unique_basename(OsStr::new(new_name), Some(src))?;
        self.pending_paths.insert(dst.clone());
        self.queue.push(Operation::RenameAsset { src: src.to_path_buf(), dst: dst.clone() });
        Ok(dst)
    }

    pub fn rename_directory(&mut self, src: &Path, new_name: &str) -> Result<PathBuf, OnyoError> {
        self.assert_is_dir(src)?;
        let dst = sibling(src, new_name, self.repo.root());
        self.assert_creatable(&dst)?;
        self.pending_paths.insert(dst.clone());
        self.queue.push(Operation::RenameDirectory { src: src.to_path_buf(), dst: dst.clone() });
        Ok(dst)
    }

    /// Enqueue a recursive merge of `patch` onto `path`'s current content.
    pub fn modify_asset(&mut self, path: &Path, patch: DotMap) -> Result<(), OnyoError> {
        self.assert_is_asset(path)?;
        let mut merged = codec::load_asset(path)?;
        merged.update(&patch);
        self.enqueue_modified_content(path, merged)
    }

    /// Enqueue removal of `keys` from `path`'s current content.
    pub fn unset_asset(&mut self, path: &Path, keys: &[String]) -> Result<(), OnyoError> {
        self.assert_is_asset(path)?;
        let mut content = codec::load_asset(path)?;
        for key in keys {
            content.delete(key).map_err(|e| OnyoError::InvalidArgument(e.to_string()))?;
        }
        self.enqueue_modified_content(path, content)
    }

    /// Enqueue `modify_assets` for `path`'s new `content`, then attempt
    /// `rename_asset` on the result so the basename keeps tracking the
    /// name-format render of the content (spec §4.9). A resulting `Noop`
    /// (content didn't change the rendered name) is swallowed, not an error.
    fn enqueue_modified_content(&mut self, path: &Path, content: DotMap) -> Result<(), OnyoError> {
        self.queue.push(Operation::ModifyAsset { path: path.to_path_buf(), content: content.clone() });
        let format = self.repo.name_format().unwrap_or_else(|| DEFAULT_NAME_FORMAT.to_string());
        let new_name = naming::render(&format, &content);
        if new_name.is_empty() {
            return Ok(());
        }
        match self.rename_asset(path, &new_name) {
            Ok(_) | Err(OnyoError::Noop(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn diff(&self) -> Result<Vec<differs::Diff>, OnyoError> {
        self.queue.iter().map(|op| differs::diff(op, self.repo)).collect()
    }

    pub fn reset(&mut self) {
        self.queue.clear();
        self.pending_paths.clear();
    }

    /// Execute the whole queue, stage the result, and make one commit.
    /// Atomic with respect to enqueue-time validation: once an operation is
    /// queued it is assumed valid, so `commit` itself only fails on I/O.
    pub fn commit(&mut self, message: Option<&str>) -> Result<(), OnyoError> {
        if self.queue.is_empty() {
            return Err(OnyoError::Noop("no pending inventory operations".to_string()));
        }
        let ops = std::mem::take(&mut self.queue).into_ordered();
        let mut record: Record = Record::new();
        let mut touched = Vec::new();
        for op in &ops {
            let (kind, line) = recorders::record(op, self.repo);
            touched.extend(executors::execute(op)?);
            record.entry(kind).or_default().push(line);
        }
        for lines in record.values_mut() {
            lines.sort();
            lines.dedup();
        }
        let subject = message.map(str::to_string).unwrap_or_else(|| auto_message(&record));
        let body = format!("{subject}\n\n{}", record::format(&record));
        self.repo
            .git()
            .commit(&touched, &body)
            .map_err(|e| OnyoError::Io(e.to_string()))?;
        self.pending_paths.clear();
        Ok(())
    }
}

/// Which of `SERIAL_KEYS` (if any) `content` sets to the faux sentinel.
fn faux_serial_key(content: &DotMap) -> Option<&'static str> {
    for key in SERIAL_KEYS {
        if matches!(content.get_cloned(key), Ok(Some(Value::String(s))) if s == FAUX_SENTINEL) {
            return Some(key);
        }
    }
    None
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, OnyoError> {
    path.file_name()
        .ok_or_else(|| OnyoError::InvalidArgument(format!("'{}' has no file name", path.display())))
}

fn sibling(src: &Path, new_name: &str, root: &Path) -> PathBuf {
    src.parent().unwrap_or(root).join(new_name)
}

/// A short summary message for commits made without an explicit `--message`.
fn auto_message(record: &Record) -> String {
    let mut parts = Vec::new();
    for kind in record::KIND_ORDER {
        if let Some(lines) = record.get(kind) {
            if !lines.is_empty() {
                parts.push(format!("{} {}", lines.len(), kind.heading().trim_end_matches(':').to_lowercase()));
            }
        }
    }
    if parts.is_empty() {
        "onyo: no-op".to_string()
    } else {
        parts.join(", ")
    }
}
