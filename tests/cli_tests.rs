use predicates::str::contains;

mod common;
use common::{init_test_db, json, rwt, setup_test_db};

#[test]
fn init_creates_schema_and_logs_migrations() {
    let db_path = setup_test_db("init_schema");

    rwt()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let log = json(&db_path, &["log", "--print"]);
    let ops: Vec<&str> = log
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["operation"].as_str())
        .collect();
    assert!(ops.contains(&"migration_applied"));
    assert!(ops.contains(&"init"));
}

#[test]
fn writes_are_recorded_in_internal_log() {
    let db_path = init_test_db("audit_log");
    common::add_work(&db_path, "2025-10-01", "09:00", "10:00");

    rwt()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("work_add"));
}

#[test]
fn settings_show_defaults_and_set() {
    let db_path = init_test_db("settings_cli");

    let s = json(&db_path, &["settings", "show"]);
    assert_eq!(s["target_hours_per_day"], 8);
    assert_eq!(s["max_hours_per_week"], 48);
    assert_eq!(s["work_window_start"], "06:00");

    let s = json(&db_path, &["settings", "set", "--window-end", "21:00"]);
    assert_eq!(s["work_window_end"], "21:00");
    assert_eq!(s["target_hours_per_day"], 8);

    rwt()
        .args(["--db", &db_path, "settings", "set", "--target-hours", "30"])
        .assert()
        .failure();
}

#[test]
fn unknown_user_is_rejected() {
    let db_path = init_test_db("unknown_user");

    rwt()
        .args(["--db", &db_path, "--user", "99", "work", "list"])
        .assert()
        .failure()
        .stderr(contains("User #99 not found"));
}

#[test]
fn project_codes_are_unique_and_tasks_need_project() {
    let db_path = init_test_db("projects_cli");
    json(&db_path, &["project", "add", "Internal", "--code", "INT"]);

    rwt()
        .args(["--db", &db_path, "project", "add", "Other", "--code", "INT"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    rwt()
        .args(["--db", &db_path, "task", "add", "77", "Review"])
        .assert()
        .failure()
        .stderr(contains("Project #77 not found"));
}

#[test]
fn db_info_reports_counts() {
    let db_path = init_test_db("db_info");
    common::add_work(&db_path, "2025-10-01", "09:00", "10:00");

    let info = json(&db_path, &["db", "--info"]);
    assert_eq!(info["stats"]["work_intervals"], 1);
    assert_eq!(info["stats"]["first_date"], "2025-10-01");

    rwt()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}
