//! `onyo init` and `onyo tsv-to-yaml` (spec §4.6, SPEC_FULL §B).

mod common;

use std::process::Command;

#[test]
fn init_creates_onyo_directory_and_initial_commit() {
    let dir = tempfile::tempdir().unwrap();
    Command::new("git").arg("init").current_dir(dir.path()).output().unwrap();
    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    let code = common::run(dir.path(), &["init"]).unwrap();
    assert_eq!(code, 0);
    assert!(dir.path().join(".onyo/config").is_file());
    assert!(dir.path().join(".onyo/templates").is_dir());
}

#[test]
fn tsv_to_yaml_converts_rows_to_yaml_documents() {
    let (dir, _repo) = common::init_onyo_repo();
    let tsv_path = dir.path().join("import.tsv");
    std::fs::write(&tsv_path, "type\tmake\tmodel\nlaptop\tlenovo\tt14\nlaptop\tdell\txps\n").unwrap();

    let code = common::run(dir.path(), &["tsv-to-yaml", "import.tsv"]).unwrap();
    assert_eq!(code, 0);
}
