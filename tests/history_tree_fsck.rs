//! `onyo history`, `onyo tree`, `onyo fsck` (spec §6, §4.11).

mod common;

use onyo::error::OnyoError;

#[test]
fn history_tracks_creation_and_modification() {
    let (dir, repo) = common::init_onyo_repo();
    common::run(
        dir.path(),
        &["new", "--keys", "type=laptop", "--keys", "make=lenovo", "--keys", "model=t14", "--keys", "serial_number=s1"],
    )
    .unwrap();
    common::run(dir.path(), &["set", "--keys", "ram=16G", "laptop_lenovo_t14.s1"]).unwrap();

    let path = dir.path().join("laptop_lenovo_t14.s1");
    let history = repo.history();
    let created = history.created(std::path::Path::new("laptop_lenovo_t14.s1"));
    let modified = history.modified(std::path::Path::new("laptop_lenovo_t14.s1"));
    assert!(created.is_some());
    assert!(modified.is_some());
    assert!(path.is_file());
}

#[test]
fn tree_rejects_a_non_directory_argument() {
    let (dir, _repo) = common::init_onyo_repo();
    common::run(
        dir.path(),
        &["new", "--keys", "type=laptop", "--keys", "make=lenovo", "--keys", "model=t14", "--keys", "serial_number=s1"],
    )
    .unwrap();

    let err = common::run(dir.path(), &["tree", "laptop_lenovo_t14.s1"]).unwrap_err();
    assert!(matches!(err, OnyoError::NotADir(_)));
}

#[test]
fn tree_on_root_succeeds() {
    let (dir, _repo) = common::init_onyo_repo();
    common::run(dir.path(), &["mkdir", "shelf"]).unwrap();
    let code = common::run(dir.path(), &["tree"]).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn fsck_reports_no_problems_on_a_clean_repo() {
    let (dir, _repo) = common::init_onyo_repo();
    common::run(
        dir.path(),
        &["new", "--keys", "type=laptop", "--keys", "make=lenovo", "--keys", "model=t14", "--keys", "serial_number=s1"],
    )
    .unwrap();
    let code = common::run(dir.path(), &["fsck"]).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn fsck_flags_an_unparseable_asset() {
    let (dir, repo) = common::init_onyo_repo();
    common::run(
        dir.path(),
        &["new", "--keys", "type=laptop", "--keys", "make=lenovo", "--keys", "model=t14", "--keys", "serial_number=s1"],
    )
    .unwrap();
    std::fs::write(dir.path().join("laptop_lenovo_t14.s1"), "- not\n  a: mapping\nyo").unwrap();
    repo.git().stage(&[std::path::PathBuf::from("laptop_lenovo_t14.s1")]).unwrap();

    let err = common::run(dir.path(), &["fsck"]).unwrap_err();
    assert!(matches!(err, OnyoError::InvalidAsset(_)));
}
