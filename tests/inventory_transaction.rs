//! `Inventory`: queuing, atomic commit, and modify-before-rename ordering
//! (spec §4.9).

mod common;

use onyo::dotmap::{DotMap, Value};
use onyo::inventory::Inventory;

#[test]
fn commit_is_a_single_transaction_over_the_whole_queue() {
    let (dir, repo) = common::init_onyo_repo();
    let mut inventory = Inventory::new(&repo);

    let mut content = DotMap::new();
    content.set("type", Value::from("laptop")).unwrap();
    content.set("make", Value::from("lenovo")).unwrap();
    content.set("model", Value::from("t14")).unwrap();
    content.set("serial_number", Value::from("s1")).unwrap();
    let asset_path = inventory.add_asset(repo.root(), content).unwrap();

    inventory.add_directory(&repo.root().join("shelf")).unwrap();

    assert!(!asset_path.exists());
    assert!(!repo.root().join("shelf").exists());

    inventory.commit(Some("batched creation")).unwrap();

    assert!(asset_path.is_file());
    assert!(repo.root().join("shelf").is_dir());
    assert!(repo.git().is_clean_worktree().unwrap());
    assert!(!inventory.operations_pending());
}

#[test]
fn modify_and_rename_in_one_transaction_renames_with_final_content() {
    let (dir, repo) = common::init_onyo_repo();

    let mut content = DotMap::new();
    content.set("type", Value::from("laptop")).unwrap();
    content.set("make", Value::from("lenovo")).unwrap();
    content.set("model", Value::from("t14")).unwrap();
    content.set("serial_number", Value::from("s1")).unwrap();
    let asset_path = {
        let mut inventory = Inventory::new(&repo);
        let path = inventory.add_asset(repo.root(), content).unwrap();
        inventory.commit(None).unwrap();
        path
    };

    let mut inventory = Inventory::new(&repo);
    let mut patch = DotMap::new();
    patch.set("ram", Value::from("16G")).unwrap();
    inventory.modify_asset(&asset_path, patch).unwrap();
    let dst = inventory.rename_asset(&asset_path, "renamed.yaml").unwrap();
    inventory.commit(None).unwrap();

    assert!(!asset_path.exists());
    let text = std::fs::read_to_string(&dst).unwrap();
    assert!(text.contains("ram: 16G"));
    let _ = dir;
}

#[test]
fn reset_discards_the_pending_queue() {
    let (_dir, repo) = common::init_onyo_repo();
    let mut inventory = Inventory::new(&repo);

    let mut content = DotMap::new();
    content.set("type", Value::from("laptop")).unwrap();
    let asset_path = inventory.add_asset(repo.root(), content).unwrap();
    assert!(inventory.operations_pending());

    inventory.reset();
    assert!(!inventory.operations_pending());
    assert!(!asset_path.exists());
}

#[test]
fn commit_with_empty_queue_is_a_noop_error() {
    let (_dir, repo) = common::init_onyo_repo();
    let mut inventory = Inventory::new(&repo);
    let err = inventory.commit(None).unwrap_err();
    assert!(matches!(err, onyo::error::OnyoError::Noop(_)));
}
