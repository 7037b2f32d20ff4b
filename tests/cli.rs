use {
  assert_cmd::Command,
  predicates::prelude::*,
  std::{fs, path::Path},
  tempfile::TempDir,
};

fn loctally(data_dir: &Path) -> Command {
  let mut command = Command::cargo_bin("loctally").expect("binary builds");

  command
    .env("LOCTALLY_DATA_DIR", data_dir)
    .env_remove("LOCTALLY_BASE")
    .env_remove("LOCTALLY_LEDGER_FILE")
    .env_remove("LOCTALLY_LOG");

  command
}

fn write(path: &Path, contents: &str) {
  fs::create_dir_all(path.parent().expect("path has a parent"))
    .expect("create parent");
  fs::write(path, contents).expect("write fixture");
}

#[test]
fn prints_version() {
  let dir = TempDir::new().unwrap();

  loctally(dir.path())
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn report_on_an_empty_ledger() {
  let dir = TempDir::new().unwrap();

  loctally(dir.path())
    .arg("report")
    .assert()
    .success()
    .stdout(predicate::str::starts_with("No votes yet.\n"))
    .stdout(predicate::str::contains("0 votes tallied in"));
}

#[test]
fn report_reads_an_existing_ledger() {
  let dir = TempDir::new().unwrap();

  let ledger = dir.path().join("tallies.json");

  write(
    &ledger,
    r#"{
  "counts": {"Lyon": 1, "Paris": 2},
  "votes": {"1:alice": "Paris", "1:bob": "Paris", "2:carol": "Lyon"}
}"#,
  );

  loctally(dir.path())
    .arg("report")
    .arg("--ledger")
    .arg(&ledger)
    .assert()
    .success()
    .stdout(predicate::str::starts_with(" 1. Paris  2\n 2. Lyon   1\n"))
    .stdout(predicate::str::contains("3 votes tallied in"));
}

#[test]
fn report_tolerates_a_malformed_ledger() {
  let dir = TempDir::new().unwrap();

  write(&dir.path().join("ledger.json"), "{not json");

  loctally(dir.path())
    .arg("report")
    .assert()
    .success()
    .stdout(predicate::str::starts_with("No votes yet.\n"));
}

#[test]
fn census_walks_every_manifest_item() {
  let dir = TempDir::new().unwrap();

  let data = dir.path().join("scraped_data");

  write(
    &data.join("manifest.json"),
    r#"[
  {"id": "1", "title": "first", "comment_count": 2},
  {"id": "2", "title": "second", "comment_count": 1}
]"#,
  );

  write(
    &data.join("1").join("comments.json"),
    r#"[
  {"user": "alice", "location": "Paris", "replies": [
    {"user": "bob", "location": "未知"}
  ]}
]"#,
  );

  write(
    &data.join("2").join("comments.json"),
    r#"[{"user": "carol", "location": "Paris"}]"#,
  );

  loctally(dir.path())
    .arg("census")
    .arg("--base")
    .arg(&data)
    .assert()
    .success()
    .stdout(predicate::str::contains(" 1. Paris    2"))
    .stdout(predicate::str::contains(" 2. unknown  1"))
    .stdout(predicate::str::contains(
      "3 comments from 2 locations across 2 collections",
    ));
}

#[test]
fn census_reports_a_missing_manifest() {
  let dir = TempDir::new().unwrap();

  loctally(dir.path())
    .arg("census")
    .arg("--base")
    .arg(dir.path().join("nowhere"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("could not load manifest"));
}

#[test]
fn census_of_a_single_collection() {
  let dir = TempDir::new().unwrap();

  write(
    &dir.path().join("data").join("comments.json"),
    r#"[{"user": "alice", "location": "Nice"}]"#,
  );

  loctally(dir.path())
    .args(["census", "--single", "--base"])
    .arg(dir.path().join("data"))
    .assert()
    .success()
    .stdout(predicate::str::contains(" 1. Nice  1"));
}
