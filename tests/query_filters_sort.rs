//! `query::run`: filtering and natural-order sorting (spec §4.7).

mod common;

use onyo::dotmap::Value;
use onyo::filters::{Filter, FilterSet};
use onyo::query::QuerySpec;
use onyo::sort::{Direction, SortKey, SortSpec};

fn new_asset(dir: &std::path::Path, keys: &[&str]) {
    let mut args = vec!["new"];
    for k in keys {
        args.push("--keys");
        args.push(k);
    }
    assert_eq!(common::run(dir, &args).unwrap(), 0);
}

#[test]
fn filters_select_matching_assets_only() {
    let (dir, repo) = common::init_onyo_repo();
    new_asset(dir.path(), &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);
    new_asset(dir.path(), &["type=monitor", "make=dell", "model=u27", "serial_number=s2"]);

    let spec = QuerySpec {
        paths: vec![],
        keys: vec!["type".to_string()],
        depth: 0,
        include_dirs: false,
        filters: FilterSet::new(vec![vec![Filter::parse("type=laptop").unwrap()]]),
        sort: SortSpec::default(),
    };
    let rows = onyo::query::run(&repo, &spec).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].values["type"], Value::from("laptop"));
}

#[test]
fn equals_filter_matches_via_regex_fullmatch() {
    let (dir, repo) = common::init_onyo_repo();
    new_asset(dir.path(), &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);
    new_asset(dir.path(), &["type=monitor", "make=dell", "model=u27", "serial_number=s2"]);

    let spec = QuerySpec {
        paths: vec![],
        keys: vec!["type".to_string()],
        depth: 0,
        include_dirs: false,
        filters: FilterSet::new(vec![vec![Filter::parse("type=lap.*").unwrap()]]),
        sort: SortSpec::default(),
    };
    let rows = onyo::query::run(&repo, &spec).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].values["type"], Value::from("laptop"));
}

#[test]
fn unset_filter_matches_assets_missing_the_key() {
    let (dir, repo) = common::init_onyo_repo();
    new_asset(dir.path(), &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1"]);

    let spec = QuerySpec {
        paths: vec![],
        keys: vec!["path".to_string()],
        depth: 0,
        include_dirs: false,
        filters: FilterSet::new(vec![vec![Filter::parse("ram=<unset>").unwrap()]]),
        sort: SortSpec::default(),
    };
    let rows = onyo::query::run(&repo, &spec).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn sort_descending_keeps_unset_values_last() {
    let (dir, repo) = common::init_onyo_repo();
    new_asset(dir.path(), &["type=laptop", "make=lenovo", "model=t14", "serial_number=s1", "priority=2"]);
    new_asset(dir.path(), &["type=laptop", "make=dell", "model=xps", "serial_number=s2", "priority=5"]);
    new_asset(dir.path(), &["type=laptop", "make=apple", "model=mbp", "serial_number=s3"]);

    let spec = QuerySpec {
        paths: vec![],
        keys: vec!["priority".to_string()],
        depth: 0,
        include_dirs: false,
        filters: FilterSet::default(),
        sort: SortSpec::new(vec![SortKey { key: "priority".to_string(), direction: Direction::Descending }]),
    };
    let rows = onyo::query::run(&repo, &spec).unwrap();
    assert_eq!(rows.len(), 3);
    // Descending by priority: 5, 2, then the asset with no priority set at all.
    assert_eq!(rows[0].values["priority"], Value::from(5));
    assert_eq!(rows[1].values["priority"], Value::from(2));
    assert_eq!(rows[2].values["priority"], Value::String("<unset>".to_string()));
}
