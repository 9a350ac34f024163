//! Move, rename, remove, and directory operations (spec §4.9, §6).

mod common;

fn new_asset(dir: &std::path::Path, path: Option<&str>, keys: &[&str]) -> i32 {
    let mut args = vec!["new"];
    if let Some(p) = path {
        args.push("--path");
        args.push(p);
    }
    for k in keys {
        args.push("--keys");
        args.push(k);
    }
    common::run(dir, &args).unwrap()
}

#[test]
fn mkdir_then_new_inside_it() {
    let (dir, _repo) = common::init_onyo_repo();
    assert_eq!(common::run(dir.path(), &["mkdir", "shelf"]).unwrap(), 0);
    assert!(dir.path().join("shelf").is_dir());

    assert_eq!(
        new_asset(dir.path(), Some("shelf"), &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]),
        0
    );
    assert!(dir.path().join("shelf/laptop_lenovo_t14.s1").is_file());
}

#[test]
fn mv_moves_asset_into_directory() {
    let (dir, _repo) = common::init_onyo_repo();
    common::run(dir.path(), &["mkdir", "shelf"]).unwrap();
    new_asset(dir.path(), None, &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);

    let code = common::run(dir.path(), &["mv", "laptop_lenovo_t14.s1", "shelf"]).unwrap();
    assert_eq!(code, 0);
    assert!(!dir.path().join("laptop_lenovo_t14.s1").exists());
    assert!(dir.path().join("shelf/laptop_lenovo_t14.s1").is_file());
}

#[test]
fn mv_rename_renames_in_place() {
    let (dir, _repo) = common::init_onyo_repo();
    new_asset(dir.path(), None, &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);

    let code = common::run(dir.path(), &["mv", "--rename", "laptop_lenovo_t14.s1", "renamed.yaml"]).unwrap();
    assert_eq!(code, 0);
    assert!(!dir.path().join("laptop_lenovo_t14.s1").exists());
    assert!(dir.path().join("renamed.yaml").is_file());
}

#[test]
fn rm_removes_asset() {
    let (dir, _repo) = common::init_onyo_repo();
    new_asset(dir.path(), None, &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);

    let code = common::run(dir.path(), &["rm", "laptop_lenovo_t14.s1"]).unwrap();
    assert_eq!(code, 0);
    assert!(!dir.path().join("laptop_lenovo_t14.s1").exists());
}

#[test]
fn rmdir_removes_directory_and_its_contents() {
    let (dir, _repo) = common::init_onyo_repo();
    common::run(dir.path(), &["mkdir", "shelf"]).unwrap();
    new_asset(dir.path(), Some("shelf"), &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);

    let code = common::run(dir.path(), &["rmdir", "shelf"]).unwrap();
    assert_eq!(code, 0);
    assert!(!dir.path().join("shelf").exists());
}

#[test]
fn set_modifies_asset_content() {
    let (dir, _repo) = common::init_onyo_repo();
    new_asset(dir.path(), None, &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);

    let code = common::run(dir.path(), &["set", "--keys", "ram=16G", "laptop_lenovo_t14.s1"]).unwrap();
    assert_eq!(code, 0);
    let content = std::fs::read_to_string(dir.path().join("laptop_lenovo_t14.s1")).unwrap();
    assert!(content.contains("ram: 16G"));
    assert!(content.contains("type: laptop"));
}

#[test]
fn unset_removes_key_from_asset() {
    let (dir, _repo) = common::init_onyo_repo();
    new_asset(dir.path(), None, &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1", "ram=8G"]);

    let code = common::run(dir.path(), &["unset", "--keys", "ram", "laptop_lenovo_t14.s1"]).unwrap();
    assert_eq!(code, 0);
    let content = std::fs::read_to_string(dir.path().join("laptop_lenovo_t14.s1")).unwrap();
    assert!(!content.contains("ram:"));
}

#[test]
fn set_on_a_name_relevant_key_renames_the_asset() {
    let (dir, _repo) = common::init_onyo_repo();
    new_asset(dir.path(), None, &["type=laptop", "make=apple", "model=mbp", "serial_number=1"]);
    assert!(dir.path().join("laptop_apple_mbp.1").is_file());

    let code = common::run(dir.path(), &["set", "--keys", "model=mbp2", "laptop_apple_mbp.1"]).unwrap();
    assert_eq!(code, 0);
    assert!(!dir.path().join("laptop_apple_mbp.1").exists());
    let renamed = dir.path().join("laptop_apple_mbp2.1");
    assert!(renamed.is_file());
    assert!(std::fs::read_to_string(&renamed).unwrap().contains("model: mbp2"));
}

#[test]
fn new_asset_rejects_a_basename_already_used_elsewhere_in_the_repo() {
    let (dir, _repo) = common::init_onyo_repo();
    common::run(dir.path(), &["mkdir", "a", "b"]).unwrap();
    assert_eq!(
        new_asset(dir.path(), Some("a"), &["type=laptop", "make=apple", "model=mbp", "serial_number=1"]),
        0
    );

    let mut args = vec!["new", "--path", "b"];
    for k in ["type=laptop", "make=apple", "model=mbp", "serial_number=1"] {
        args.push("--keys");
        args.push(k);
    }
    let err = common::run(dir.path(), &args).unwrap_err();
    assert!(matches!(err, onyo::error::OnyoError::InvalidArgument(_)));
    assert!(!dir.path().join("b/laptop_apple_mbp.1").exists());
}
