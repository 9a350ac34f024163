//! `onyo new` followed by `onyo get` (spec §6: new asset creation, naming,
//! single-commit transactions, and querying).

mod common;

#[test]
fn new_asset_is_named_from_format_and_committed() {
    let (dir, repo) = common::init_onyo_repo();

    let code = common::run(
        dir.path(),
        &[
            "new",
            "--keys",
            "type=laptop",
            "--keys",
            "make=lenovo",
            "--keys",
            "model=t14",
            "--keys",
            "serial_number=abc123",
        ],
    )
    .unwrap();
    assert_eq!(code, 0);

    let asset_path = dir.path().join("laptop_lenovo_t14.abc123");
    assert!(asset_path.is_file());
    assert!(repo.git().is_clean_worktree().unwrap());

    let content = std::fs::read_to_string(&asset_path).unwrap();
    assert!(content.contains("type: laptop"));
    assert!(content.contains("serial_number: abc123"));
}

#[test]
fn new_with_explicit_faux_serial_gets_generated_suffix() {
    let (dir, _repo) = common::init_onyo_repo();

    common::run(
        dir.path(),
        &["new", "--keys", "type=laptop", "--keys", "make=dell", "--keys", "model=xps", "--keys", "serial_number=faux"],
    )
    .unwrap();

    let mut names = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("laptop_dell_xps"))
        .collect::<Vec<_>>();
    assert_eq!(names.len(), 1);
    let name = names.pop().unwrap();
    assert!(name.contains(".faux"), "expected a faux serial suffix, got '{name}'");
    assert!(!name.ends_with(".faux"), "faux serial should have a random suffix, got '{name}'");
}

#[test]
fn new_without_serial_renders_empty_placeholder() {
    let (dir, _repo) = common::init_onyo_repo();

    common::run(dir.path(), &["new", "--keys", "type=laptop", "--keys", "make=dell", "--keys", "model=xps"])
        .unwrap();

    assert!(dir.path().join("laptop_dell_xps.").is_file());
}

#[test]
fn get_returns_requested_keys_for_new_assets() {
    let (dir, _repo) = common::init_onyo_repo();
    common::run(
        dir.path(),
        &["new", "--keys", "type=laptop", "--keys", "make=apple", "--keys", "model=mbp", "--keys", "serial_number=z1"],
    )
    .unwrap();

    let code = common::run(dir.path(), &["get", "--keys", "type,make", "--machine-readable"]).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn new_asset_outside_repo_root_requires_inventory_dir() {
    let (dir, _repo) = common::init_onyo_repo();
    let err = common::run(
        dir.path(),
        &["new", "--path", "nonexistent", "--keys", "type=laptop"],
    )
    .unwrap_err();
    assert!(matches!(err, onyo::error::OnyoError::NotADir(_)));
}
