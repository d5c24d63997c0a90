#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rwt() -> Command {
    cargo_bin_cmd!("rworktime")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworktime.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh database with schema, default user and settings
pub fn init_test_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    rwt()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// Run a command with `--json` and parse stdout
pub fn json(db_path: &str, args: &[&str]) -> Value {
    let out = rwt()
        .args(["--db", db_path, "--json"])
        .args(args)
        .output()
        .expect("run rworktime");
    assert!(
        out.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("valid JSON on stdout")
}

pub fn add_work(db_path: &str, date: &str, start: &str, end: &str) -> i64 {
    json(db_path, &["work", "add", date, start, end])["id"]
        .as_i64()
        .expect("id")
}
