//! `Repo`: path classification and config access layered on top of the raw
//! git adapter (spec §4.6). Everything in the inventory engine that needs
//! to ask "is this an asset / a directory / protected / a template" goes
//! through here rather than re-deriving the rules ad hoc.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;

use crate::consts::{
    ANCHOR_FILE_NAME, ASSET_DIR_FILE_NAME, CONFIG_FILE_NAME, CONFIG_NAME_FORMAT, CONFIG_REPO_VERSION,
    IGNORE_FILE_NAME, KNOWN_REPO_VERSIONS, ONYO_DIR, TEMPLATE_DIR, VALIDATION_DIR,
};
use crate::error::OnyoError;
use crate::git::{ConfigScope, Repository};
use crate::history::History;

pub struct Repo {
    git: Repository,
    history: OnceCell<History>,
}

impl Repo {
    /// Open an existing onyo repository at or above `start`.
    pub fn open(start: &Path) -> Result<Self, OnyoError> {
        let git = Repository::discover(start).map_err(|e| OnyoError::InvalidRepo(e.to_string()))?;
        let repo = Self { git, history: OnceCell::new() };
        if !repo.onyo_dir().is_dir() {
            return Err(OnyoError::InvalidRepo(format!(
                "'{}' is not an onyo repository (no {ONYO_DIR}/ directory)",
                repo.root().display()
            )));
        }
        repo.check_repo_version()?;
        Ok(repo)
    }

    fn check_repo_version(&self) -> Result<(), OnyoError> {
        match self.get_config(CONFIG_REPO_VERSION) {
            Some(v) if KNOWN_REPO_VERSIONS.contains(&v.as_str()) => Ok(()),
            Some(v) => Err(OnyoError::InvalidRepo(format!(
                "unsupported repository version '{v}' (known: {})",
                KNOWN_REPO_VERSIONS.join(", ")
            ))),
            None => Err(OnyoError::InvalidRepo(format!(
                "'{}' has no {CONFIG_REPO_VERSION} set",
                self.root().display()
            ))),
        }
    }

    /// Initialize a fresh onyo repository at `path`, running `git init` first
    /// if `path` is not already inside a git working tree.
    pub fn init(path: &Path) -> Result<Self, OnyoError> {
        fs::create_dir_all(path).map_err(|e| OnyoError::Io(e.to_string()))?;
        let git = match Repository::discover(path) {
            Ok(git) => git,
            Err(_) => {
                std::process::Command::new("git")
                    .arg("init")
                    .current_dir(path)
                    .output()
                    .map_err(|e| OnyoError::Io(e.to_string()))?;
                Repository::discover(path).map_err(|e| OnyoError::InvalidRepo(e.to_string()))?
            }
        };
        let onyo_dir = git.root().join(ONYO_DIR);
        fs::create_dir_all(onyo_dir.join(TEMPLATE_DIR)).map_err(|e| OnyoError::Io(e.to_string()))?;
        fs::create_dir_all(onyo_dir.join(VALIDATION_DIR)).map_err(|e| OnyoError::Io(e.to_string()))?;
        fs::write(onyo_dir.join(ANCHOR_FILE_NAME), "").map_err(|e| OnyoError::Io(e.to_string()))?;
        let config_path = onyo_dir.join(CONFIG_FILE_NAME);
        let latest_version = KNOWN_REPO_VERSIONS.last().copied().unwrap_or("1");
        git.set_config(
            CONFIG_REPO_VERSION,
            latest_version,
            &ConfigScope::File(config_path.clone()),
        )
        .map_err(|e| OnyoError::Io(e.to_string()))?;
        git.commit(
            &[onyo_dir.strip_prefix(git.root()).unwrap_or(&onyo_dir).to_path_buf()],
            "Initialize onyo repository",
        )
        .map_err(|e| OnyoError::Io(e.to_string()))?;
        Self::open(path)
    }

    pub fn root(&self) -> &Path {
        self.git.root()
    }

    pub fn git(&self) -> &Repository {
        &self.git
    }

    pub fn onyo_dir(&self) -> PathBuf {
        self.root().join(ONYO_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.onyo_dir().join(CONFIG_FILE_NAME)
    }

    pub fn template_dir(&self) -> PathBuf {
        self.onyo_dir().join(TEMPLATE_DIR)
    }

    pub fn validation_dir(&self) -> PathBuf {
        self.onyo_dir().join(VALIDATION_DIR)
    }

    pub fn ignore_path(&self) -> PathBuf {
        self.onyo_dir().join(IGNORE_FILE_NAME)
    }

    pub fn get_config(&self, name: &str) -> Option<String> {
        self.git.get_config(name, Some(&self.config_path()))
    }

    pub fn set_config(&self, name: &str, value: &str) -> Result<(), OnyoError> {
        self.git
            .set_config(name, value, &ConfigScope::File(self.config_path()))
            .map_err(|e| OnyoError::InvalidConfig(e.to_string()))
    }

    pub fn name_format(&self) -> Option<String> {
        self.get_config(CONFIG_NAME_FORMAT)
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let ignore = self.ignore_path();
        if !ignore.is_file() {
            return false;
        }
        self.git
            .check_ignore(&ignore, std::slice::from_ref(&path.to_path_buf()))
            .map(|excluded| !excluded.is_empty())
            .unwrap_or(false)
    }

    pub fn is_git_path(&self, path: &Path) -> bool {
        path.components().any(|c| c.as_os_str() == ".git")
    }

    pub fn is_onyo_path(&self, path: &Path) -> bool {
        path.starts_with(self.onyo_dir())
    }

    /// Paths onyo refuses to touch directly: anything under `.git`/`.onyo`,
    /// or the reserved marker files themselves.
    pub fn is_protected_path(&self, path: &Path) -> bool {
        if self.is_git_path(path) || self.is_onyo_path(path) {
            return true;
        }
        matches!(
            path.file_name().and_then(|n| n.to_str()),
            Some(ANCHOR_FILE_NAME) | Some(ASSET_DIR_FILE_NAME)
        )
    }

    pub fn is_asset_dir(&self, path: &Path) -> bool {
        path.is_dir() && path.join(ASSET_DIR_FILE_NAME).is_file()
    }

    pub fn is_inventory_dir(&self, path: &Path) -> bool {
        if self.is_protected_path(path) || !path.is_dir() {
            return false;
        }
        path == self.root() || path.join(ANCHOR_FILE_NAME).is_file() || self.is_asset_dir(path)
    }

    pub fn is_template(&self, path: &Path) -> bool {
        path.starts_with(self.template_dir())
    }

    pub fn is_asset_path(&self, path: &Path) -> bool {
        if self.is_protected_path(path) || self.is_template(path) {
            return false;
        }
        path.is_file() && path.starts_with(self.root())
    }

    /// Direct children of an inventory directory, excluding anchors/markers.
    pub fn list_inventory_children(&self, dir: &Path) -> Result<Vec<PathBuf>, OnyoError> {
        let mut children = Vec::new();
        let entries = fs::read_dir(dir).map_err(|e| OnyoError::Io(format!("'{}': {e}", dir.display())))?;
        for entry in entries {
            let entry = entry.map_err(|e| OnyoError::Io(e.to_string()))?;
            let path = entry.path();
            if self.is_protected_path(&path) {
                continue;
            }
            children.push(path);
        }
        Ok(children)
    }

    fn within_depth(&self, subtree: &Path, path: &Path, depth: usize) -> bool {
        if depth == 0 {
            return true;
        }
        path.strip_prefix(subtree)
            .map(|rel| rel.components().count() <= depth)
            .unwrap_or(true)
    }

    fn matches_subtrees(path: &Path, subtrees: &[PathBuf]) -> Option<PathBuf> {
        subtrees.iter().find(|s| path.starts_with(s)).cloned()
    }

    /// Tracked asset files, optionally restricted to `subtrees` and a max depth below them.
    pub fn list_assets(&self, subtrees: Option<&[PathBuf]>, depth: usize) -> Result<Vec<PathBuf>, OnyoError> {
        let tracked = self
            .git
            .list_tracked(subtrees)
            .map_err(|e| OnyoError::Io(e.to_string()))?;
        Ok(tracked
            .into_iter()
            .filter(|p| self.is_asset_path(p))
            .filter(|p| match subtrees {
                None => true,
                Some(roots) => Self::matches_subtrees(p, roots)
                    .map(|root| self.within_depth(&root, p, depth))
                    .unwrap_or(false),
            })
            .collect())
    }

    /// Inventory directories (anchor- or asset-dir-marked) under `subtrees`.
    pub fn list_directories(&self, subtrees: Option<&[PathBuf]>, depth: usize) -> Result<Vec<PathBuf>, OnyoError> {
        let roots: Vec<PathBuf> = subtrees.map(|s| s.to_vec()).unwrap_or_else(|| vec![self.root().to_path_buf()]);
        let mut dirs = Vec::new();
        for root in &roots {
            self.walk_directories(root, root, depth, &mut dirs)?;
        }
        Ok(dirs)
    }

    fn walk_directories(
        &self,
        subtree_root: &Path,
        dir: &Path,
        depth: usize,
        out: &mut Vec<PathBuf>,
    ) -> Result<(), OnyoError> {
        if !dir.is_dir() || self.is_protected_path(dir) {
            return Ok(());
        }
        if self.is_inventory_dir(dir) && dir != self.root() {
            out.push(dir.to_path_buf());
        }
        if !self.within_depth(subtree_root, dir, depth) {
            return Ok(());
        }
        let entries = fs::read_dir(dir).map_err(|e| OnyoError::Io(format!("'{}': {e}", dir.display())))?;
        for entry in entries {
            let entry = entry.map_err(|e| OnyoError::Io(e.to_string()))?;
            let path = entry.path();
            if path.is_dir() && !self.is_protected_path(&path) {
                self.walk_directories(subtree_root, &path, depth, out)?;
            }
        }
        Ok(())
    }

    pub fn list_templates(&self) -> Result<Vec<PathBuf>, OnyoError> {
        let dir = self.template_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| OnyoError::Io(e.to_string()))? {
            let entry = entry.map_err(|e| OnyoError::Io(e.to_string()))?;
            if entry.path().is_file() {
                out.push(entry.path());
            }
        }
        Ok(out)
    }

    /// Reconstructed history, built lazily once and cached for the process lifetime.
    pub fn history(&self) -> &History {
        self.history.get_or_init(|| History::build(&self.git).unwrap_or_default())
    }
}
