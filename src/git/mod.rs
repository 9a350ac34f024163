//! Uniform interface to the underlying git working tree (spec §4.1).
//!
//! The core never touches `.git` directly; every side effect goes through
//! `git` subprocess invocations here, mirroring the teacher's
//! `Repository::run_command` idiom (`std::process::Command` + `anyhow`
//! context) but scoped to the handful of verbs onyo's inventory engine
//! needs rather than worktrunk's full worktree-lifecycle surface.

mod error;

pub use error::GitError;

use chrono::{DateTime, FixedOffset};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where a config value should be written (spec §4.1).
#[derive(Debug, Clone)]
pub enum ConfigScope {
    System,
    Global,
    Local,
    Worktree,
    File(PathBuf),
    /// Let `git config` pick its own default (effectively `local`).
    Default,
}

/// A single entry of `git log` history, as consumed by history reconstruction.
#[derive(Debug, Clone)]
pub struct Commit {
    pub sha: String,
    pub time: DateTime<FixedOffset>,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    pub subject: String,
    pub body: String,
}

/// A handle onto a single git working tree.
///
/// `list_tracked` is cached (spec §4.1); the cache is invalidated by
/// `commit()` and by an explicit `clear_cache()`.
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
    tracked_cache: RefCell<Option<Vec<PathBuf>>>,
}

impl Repository {
    /// Wrap an already-known worktree root.
    pub fn at(root: PathBuf) -> Self {
        Self {
            root,
            tracked_cache: RefCell::new(None),
        }
    }

    /// Discover the worktree root starting at (or above) `path`.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .output()
            .map_err(|e| GitError::NotAGitRepo(format!("{}: {e}", path.display())))?;
        if !output.status.success() {
            return Err(GitError::NotAGitRepo(path.display().to_string()));
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self::at(dunce::canonicalize(&root).unwrap_or_else(|_| PathBuf::from(root))))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        self.run_in(&self.root, args)
    }

    fn run_in(&self, cwd: &Path, args: &[&str]) -> Result<String, GitError> {
        log::debug!("running 'git {}'", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| GitError::CommandFailed(format!("git {}: {e}", args.join(" "))))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let msg = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            return Err(GitError::CommandFailed(if msg.is_empty() {
                format!("git {} failed", args.join(" "))
            } else {
                msg
            }));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Exit code passthrough for commands whose output the CLI forwards verbatim
    /// (e.g. `onyo config`).
    pub fn run_passthrough(&self, args: &[&str]) -> std::process::ExitStatus {
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .status()
            .unwrap_or_else(|_| {
                #[cfg(unix)]
                {
                    use std::os::unix::process::ExitStatusExt;
                    std::process::ExitStatus::from_raw(1)
                }
                #[cfg(not(unix))]
                {
                    std::process::exit(1);
                }
            })
    }

    pub fn clear_cache(&self) {
        *self.tracked_cache.borrow_mut() = None;
    }

    /// Tracked files under HEAD, optionally restricted to `subtrees`.
    ///
    /// Only the unrestricted, whole-tree call is cached; subtree queries are
    /// filtered from the full list in-process so callers never miss the cache.
    pub fn list_tracked(&self, subtrees: Option<&[PathBuf]>) -> Result<Vec<PathBuf>, GitError> {
        if self.tracked_cache.borrow().is_none() {
            let files = self.list_tracked_uncached(None)?;
            *self.tracked_cache.borrow_mut() = Some(files);
        }
        let all = self.tracked_cache.borrow().clone().unwrap_or_default();
        match subtrees {
            None => Ok(all),
            Some(roots) => Ok(all
                .into_iter()
                .filter(|p| roots.iter().any(|r| p.starts_with(r)))
                .collect()),
        }
    }

    fn list_tracked_uncached(&self, subtrees: Option<&[PathBuf]>) -> Result<Vec<PathBuf>, GitError> {
        let mut args = vec!["ls-tree", "-r", "--full-tree", "--name-only", "-z", "HEAD"];
        let rel: Vec<String>;
        if let Some(roots) = subtrees {
            rel = roots.iter().map(|p| p.display().to_string()).collect();
            args.extend(rel.iter().map(|s| s.as_str()));
        }
        let out = match self.run(&args) {
            Ok(out) => out,
            Err(_) => {
                // Distinguish "no HEAD yet" (empty repo) from a real error.
                if self.run(&["rev-parse", "HEAD", "--"]).is_err() {
                    String::new()
                } else {
                    return Err(GitError::CommandFailed("git ls-tree failed".into()));
                }
            }
        };
        Ok(out
            .split('\0')
            .filter(|s| !s.is_empty())
            .map(|s| self.root.join(s))
            .collect())
    }

    pub fn is_clean_worktree(&self) -> Result<bool, GitError> {
        Ok(self.run(&["status", "--porcelain"])?.trim().is_empty())
    }

    /// Stage `paths` and create one commit with `message`. Clears the tracked cache.
    pub fn commit(&self, paths: &[PathBuf], message: &str) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut add_args = vec!["add".to_string()];
        add_args.extend(paths.iter().map(|p| p.display().to_string()));
        self.run(&add_args.iter().map(String::as_str).collect::<Vec<_>>())?;
        self.run(&["commit", "-m", message])?;
        self.clear_cache();
        Ok(())
    }

    pub fn stage(&self, paths: &[PathBuf]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add".to_string()];
        args.extend(paths.iter().map(|p| p.display().to_string()));
        self.run(&args.iter().map(String::as_str).collect::<Vec<_>>())?;
        Ok(())
    }

    pub fn get_config(&self, name: &str, file: Option<&Path>) -> Option<String> {
        let result = match file {
            Some(f) => self.run(&["config", "--file", &f.display().to_string(), "--get", name]),
            None => self.run(&["config", "--get", name]),
        };
        result.ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }

    pub fn set_config(&self, name: &str, value: &str, scope: &ConfigScope) -> Result<(), GitError> {
        let scope_args: Vec<String> = match scope {
            ConfigScope::System => vec!["--system".into()],
            ConfigScope::Global => vec!["--global".into()],
            ConfigScope::Local => vec!["--local".into()],
            ConfigScope::Worktree => vec!["--worktree".into()],
            ConfigScope::File(path) => vec!["--file".into(), path.display().to_string()],
            ConfigScope::Default => vec![],
        };
        let mut args: Vec<String> = vec!["config".into()];
        args.extend(scope_args);
        args.push(name.to_string());
        args.push(value.to_string());
        self.run(&args.iter().map(String::as_str).collect::<Vec<_>>())?;
        Ok(())
    }

    /// Hexsha of `rev` (defaults to `HEAD`). `None` for `HEAD` on an empty repo.
    pub fn get_hexsha(&self, rev: Option<&str>, short: bool) -> Result<Option<String>, GitError> {
        let target = rev.unwrap_or("HEAD");
        let commit_expr = format!("{target}^{{commit}}");
        let mut args = vec!["rev-parse", "--quiet", "--verify", &commit_expr];
        if short {
            args.push("--short");
        }
        match self.run(&args) {
            Ok(out) => Ok(Some(out.trim().to_string())),
            Err(_) if rev.is_none() => Ok(None),
            Err(_) => Err(GitError::UnknownRevision(target.to_string())),
        }
    }

    pub fn commit_message(&self, rev: Option<&str>) -> Result<String, GitError> {
        self.run(&["log", rev.unwrap_or("HEAD"), "-n1", "--pretty=%B"])
    }

    /// Paths in `paths` that are excluded by patterns in `ignore`.
    pub fn check_ignore(&self, ignore: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>, GitError> {
        let excludes_file = format!("core.excludesFile={}", ignore.display());
        let mut args = vec!["-c", &excludes_file, "check-ignore", "--no-index", "--verbose"];
        let rel: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        args.extend(rel.iter().map(|s| s.as_str()));
        let output = match self.run(&args) {
            Ok(out) => out,
            // exit 1 from check-ignore means "nothing matched", not an error.
            Err(_) => return Ok(Vec::new()),
        };
        let mut excluded = Vec::new();
        for line in output.lines() {
            if let Some((src, path)) = line.split_once('\t') {
                let src_file = src.split(':').next().unwrap_or_default();
                if Path::new(src_file) == ignore {
                    excluded.push(PathBuf::from(path));
                }
            }
        }
        Ok(excluded)
    }

    /// Walk commit history touching `path` (or the whole repo), newest first.
    pub fn walk_history(
        &self,
        path: Option<&Path>,
        limit: Option<usize>,
    ) -> Result<Vec<Commit>, GitError> {
        const SEP: &str = "\x1f"; // unit separator, unlikely in commit text
        const END: &str = "\x1e"; // record separator
        let format = format!(
            "--pretty=format:%H{SEP}%aI{SEP}%an{SEP}%ae{SEP}%cn{SEP}%ce{SEP}%s{SEP}%b{END}"
        );
        let mut args = vec!["log".to_string(), format];
        if let Some(n) = limit {
            args.push(format!("-n{n}"));
        }
        if let Some(p) = path {
            args.push("--".to_string());
            args.push(p.display().to_string());
        }
        let out = self.run(&args.iter().map(String::as_str).collect::<Vec<_>>())?;
        let mut commits = Vec::new();
        for record in out.split(END) {
            let record = record.trim_start_matches('\n');
            if record.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = record.splitn(7, SEP).collect();
            if fields.len() != 7 {
                continue;
            }
            let time = DateTime::parse_from_rfc3339(fields[1])
                .map_err(|e| GitError::ParseError(e.to_string()))?;
            commits.push(Commit {
                sha: fields[0].to_string(),
                time,
                author_name: fields[2].to_string(),
                author_email: fields[3].to_string(),
                committer_name: fields[4].to_string(),
                committer_email: fields[5].to_string(),
                subject: fields[6].lines().next().unwrap_or_default().to_string(),
                body: fields[6].to_string(),
            });
        }
        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        Command::new("git").arg("init").current_dir(dir.path()).output().unwrap();
        Command::new("git")
            .args(["config", "user.email", "t@example.com"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        Command::new("git")
            .args(["config", "user.name", "Test"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        let repo = Repository::at(dir.path().to_path_buf());
        (dir, repo)
    }

    #[test]
    fn empty_repo_has_no_tracked_files() {
        let (_dir, repo) = init_repo();
        assert!(repo.list_tracked(None).unwrap().is_empty());
    }

    #[test]
    fn commit_then_list_tracked() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("a.txt"), "hi").unwrap();
        repo.commit(&[PathBuf::from("a.txt")], "add a").unwrap();
        let files = repo.list_tracked(None).unwrap();
        assert_eq!(files.len(), 1);
        assert!(repo.is_clean_worktree().unwrap());
    }

    #[test]
    fn get_hexsha_on_empty_repo_head_is_none() {
        let (_dir, repo) = init_repo();
        assert_eq!(repo.get_hexsha(None, false).unwrap(), None);
    }

    #[test]
    fn get_hexsha_unknown_rev_errors() {
        let (_dir, repo) = init_repo();
        assert!(repo.get_hexsha(Some("not-a-rev"), false).is_err());
    }
}
