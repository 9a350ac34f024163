//! The pseudo-key registry (spec §4.4).
//!
//! Modeled as the design notes prescribe: a closed table of
//! `key -> fn(&Item, &Repo) -> Value` rather than a stringly-typed special
//! case scattered through `Item`. Because Rust has no ambient weak
//! back-reference the way the original Python `Item.repo` attribute does,
//! every implementation function takes the owning `Repo` explicitly instead
//! of the `Item` caching a long-lived handle to it.

use crate::dotmap::Value;
use crate::item::Item;
use crate::repo::Repo;

pub type PseudoKeyFn = fn(&Item, &Repo) -> Value;

pub struct PseudoKey {
    pub description: &'static str,
    pub implementation: PseudoKeyFn,
}

macro_rules! pseudo_keys {
    ($( $name:literal => $desc:literal, $func:path ),+ $(,)?) => {
        pub const PSEUDO_KEYS: &[(&str, PseudoKey)] = &[
            $( ($name, PseudoKey { description: $desc, implementation: $func }) ),+
        ];
    };
}

pseudo_keys! {
    "onyo.path.absolute" => "Absolute path of the item.", get_path_absolute,
    "onyo.path.relative" => "Path of the item relative to the repository root.", get_path_relative,
    "onyo.path.parent" => "Path of the directory the item is in, relative to the repository root.", get_path_parent,
    "onyo.path.file" => "Path to the file containing an asset's YAML.", get_path_file,
    "onyo.path.name" => "Basename of the item's path.", get_path_name,
    "onyo.is.asset" => "Is the item an asset.", get_is_asset,
    "onyo.is.directory" => "Is the item a directory.", get_is_directory,
    "onyo.is.template" => "Is the item a template.", get_is_template,
    "onyo.is.empty" => "Is the directory empty. <unset> if the item is not a directory.", get_is_empty,
    "onyo.was.created.hexsha" => "SHA of the commit that created the item.", get_created_hexsha,
    "onyo.was.created.time" => "Time of the commit that created the item.", get_created_time,
    "onyo.was.created.author.name" => "Name of the author of the commit that created the item.", get_created_author_name,
    "onyo.was.created.author.email" => "Email of the author of the commit that created the item.", get_created_author_email,
    "onyo.was.created.committer.name" => "Name of the committer of the commit that created the item.", get_created_committer_name,
    "onyo.was.created.committer.email" => "Email of the committer of the commit that created the item.", get_created_committer_email,
    "onyo.was.modified.hexsha" => "SHA of the most recent commit that modified the item.", get_modified_hexsha,
    "onyo.was.modified.time" => "Time of the most recent commit that modified the item.", get_modified_time,
    "onyo.was.modified.author.name" => "Name of the author of the most recent commit that modified the item.", get_modified_author_name,
    "onyo.was.modified.author.email" => "Email of the author of the most recent commit that modified the item.", get_modified_author_email,
    "onyo.was.modified.committer.name" => "Name of the committer of the most recent commit that modified the item.", get_modified_committer_name,
    "onyo.was.modified.committer.email" => "Email of the committer of the most recent commit that modified the item.", get_modified_committer_email,
}

/// Aliases that resolve to a pseudo-key target (spec §3).
pub const ALIASES: &[(&str, &str)] = &[("path", "onyo.path.relative"), ("directory", "onyo.path.parent")];

pub fn resolve_alias(key: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| *target)
        .unwrap_or(key)
}

pub fn lookup(key: &str) -> Option<&'static PseudoKey> {
    PSEUDO_KEYS.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
}

pub fn is_pseudo_key(key: &str) -> bool {
    lookup(key).is_some()
}

fn opt_path_value(p: Option<std::path::PathBuf>) -> Value {
    match p {
        Some(p) => Value::String(p.to_string_lossy().into_owned()),
        None => Value::Null,
    }
}

fn get_path_absolute(item: &Item, _repo: &Repo) -> Value {
    opt_path_value(item.absolute_path().map(|p| p.to_path_buf()))
}

fn get_path_relative(item: &Item, repo: &Repo) -> Value {
    opt_path_value(
        item.absolute_path()
            .and_then(|p| p.strip_prefix(repo.root()).ok())
            .map(|p| p.to_path_buf()),
    )
}

fn get_path_parent(item: &Item, repo: &Repo) -> Value {
    opt_path_value(
        item.absolute_path()
            .and_then(|p| p.parent())
            .and_then(|p| p.strip_prefix(repo.root()).ok())
            .map(|p| p.to_path_buf()),
    )
}

fn get_path_file(item: &Item, repo: &Repo) -> Value {
    if !matches!(get_is_asset(item, repo), Value::Bool(true)) {
        return Value::Null;
    }
    opt_path_value(
        item.absolute_path()
            .and_then(|p| p.strip_prefix(repo.root()).ok())
            .map(|p| p.to_path_buf()),
    )
}

fn get_path_name(item: &Item, _repo: &Repo) -> Value {
    match item.absolute_path().and_then(|p| p.file_name()) {
        Some(name) => Value::String(name.to_string_lossy().into_owned()),
        None => Value::Null,
    }
}

fn get_is_asset(item: &Item, repo: &Repo) -> Value {
    match item.absolute_path() {
        Some(p) => Value::Bool(repo.is_asset_path(p)),
        None => Value::Null,
    }
}

fn get_is_directory(item: &Item, repo: &Repo) -> Value {
    match item.absolute_path() {
        Some(p) => Value::Bool(repo.is_inventory_dir(p)),
        None => Value::Null,
    }
}

fn get_is_template(item: &Item, repo: &Repo) -> Value {
    match item.absolute_path() {
        Some(p) => Value::Bool(repo.is_template(p)),
        None => Value::Null,
    }
}

fn get_is_empty(item: &Item, repo: &Repo) -> Value {
    match item.absolute_path() {
        Some(p) if repo.is_inventory_dir(p) => {
            let has_children = repo.list_inventory_children(p).map(|c| !c.is_empty()).unwrap_or(true);
            Value::Bool(!has_children)
        }
        _ => Value::Null,
    }
}

fn history_field(item: &Item, repo: &Repo, created: bool, field: &str) -> Value {
    let Some(path) = item.relative_path(repo) else {
        return Value::Null;
    };
    let record = if created {
        repo.history().created(&path)
    } else {
        repo.history().modified(&path)
    };
    match record {
        Some(r) => r.field(field),
        None => Value::Null,
    }
}

fn get_created_hexsha(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, true, "hexsha")
}
fn get_created_time(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, true, "time")
}
fn get_created_author_name(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, true, "author.name")
}
fn get_created_author_email(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, true, "author.email")
}
fn get_created_committer_name(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, true, "committer.name")
}
fn get_created_committer_email(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, true, "committer.email")
}
fn get_modified_hexsha(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, false, "hexsha")
}
fn get_modified_time(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, false, "time")
}
fn get_modified_author_name(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, false, "author.name")
}
fn get_modified_author_email(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, false, "author.email")
}
fn get_modified_committer_name(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, false, "committer.name")
}
fn get_modified_committer_email(item: &Item, repo: &Repo) -> Value {
    history_field(item, repo, false, "committer.email")
}
