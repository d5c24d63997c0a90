use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_work, init_test_db, json, rwt};

#[test]
fn work_add_then_list_round_trips() {
    let db_path = init_test_db("work_round_trip");
    let id = add_work(&db_path, "2025-10-01", "9:00", "12:10");

    let rows = json(&db_path, &["work", "list", "--date", "2025-10-01"]);
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], id);
    assert_eq!(rows[0]["start_time"], "09:00");
    assert_eq!(rows[0]["end_time"], "12:10");
    assert_eq!(rows[0]["duration_minutes"], 195);
}

#[test]
fn work_overlap_is_rejected_touching_is_allowed() {
    let db_path = init_test_db("work_overlap");
    let first = add_work(&db_path, "2025-10-01", "09:00", "10:30");

    rwt()
        .args(["--db", &db_path, "work", "add", "2025-10-01", "10:00", "11:00"])
        .assert()
        .failure()
        .stderr(contains(format!("Overlaps with interval #{}", first)));

    rwt()
        .args(["--db", &db_path, "work", "add", "2025-10-01", "10:30", "11:00"])
        .assert()
        .success();
}

#[test]
fn work_edit_keeps_unspecified_fields() {
    let db_path = init_test_db("work_edit_partial");
    let id = json(
        &db_path,
        &["work", "add", "2025-10-01", "09:00", "10:00", "--notes", "standup"],
    )["id"]
        .as_i64()
        .unwrap();

    let edited = json(&db_path, &["work", "edit", &id.to_string(), "--end", "11:00"]);
    assert_eq!(edited["start_time"], "09:00");
    assert_eq!(edited["duration_minutes"], 120);
    assert_eq!(edited["notes"], "standup");
}

#[test]
fn work_edit_missing_id_fails_and_delete_reports_not_found() {
    let db_path = init_test_db("work_missing_id");

    rwt()
        .args(["--db", &db_path, "work", "edit", "42", "--end", "11:00"])
        .assert()
        .failure()
        .stderr(contains("#42 not found"));

    rwt()
        .args(["--db", &db_path, "work", "del", "42"])
        .assert()
        .success()
        .stdout(contains("not found"));
}

#[test]
fn invalid_input_is_rejected() {
    let db_path = init_test_db("work_invalid");

    rwt()
        .args(["--db", &db_path, "work", "add", "2025-13-01", "09:00", "10:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    rwt()
        .args(["--db", &db_path, "work", "add", "2025-10-01", "09:00", "24:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));

    rwt()
        .args(["--db", &db_path, "work", "add", "2025-10-01", "10:00", "09:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));
}

#[test]
fn breaks_positioned_and_duration_only() {
    let db_path = init_test_db("breaks_kinds");

    json(&db_path, &["break", "add", "2025-10-01", "--duration", "20"]);
    let positioned = json(
        &db_path,
        &["break", "add", "2025-10-01", "--start", "12:00", "--end", "12:30"],
    );
    assert_eq!(positioned["duration_minutes"], 30);

    rwt()
        .args([
            "--db", &db_path, "break", "add", "2025-10-01", "--start", "12:15", "--end", "12:45",
        ])
        .assert()
        .failure()
        .stderr(contains("Break overlaps with break"));

    let rows = json(&db_path, &["break", "list", "--date", "2025-10-01"]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // positioned first, duration-only last
    assert_eq!(rows[0]["start_time"], "12:00");
    assert!(rows[1]["start_time"].is_null());
    assert_eq!(rows[1]["duration_minutes"], 30);
}

#[test]
fn break_edit_with_new_times_recomputes_duration() {
    let db_path = init_test_db("break_edit_times");
    let id = json(
        &db_path,
        &["break", "add", "2025-10-01", "--start", "12:00", "--end", "12:30"],
    )["id"]
        .as_i64()
        .unwrap();

    let edited = json(&db_path, &["break", "edit", &id.to_string(), "--end", "13:00"]);
    assert_eq!(edited["duration_minutes"], 60);
}

#[test]
fn breaks_may_coincide_with_work() {
    let db_path = init_test_db("break_during_work");
    add_work(&db_path, "2025-10-01", "09:00", "17:00");

    rwt()
        .args([
            "--db", &db_path, "break", "add", "2025-10-01", "--start", "12:00", "--end", "12:30",
        ])
        .assert()
        .success();
}

#[test]
fn legacy_entries_add_list_delete() {
    let db_path = init_test_db("entries_lifecycle");

    let entry = json(
        &db_path,
        &["entry", "add", "2025-10-01", "--start", "09:00", "--end", "09:50", "--billable"],
    );
    assert_eq!(entry["duration_minutes"], 60);
    assert_eq!(entry["billable"], true);

    rwt()
        .args([
            "--db", &db_path, "entry", "add", "2025-10-01", "--start", "09:30", "--end", "10:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Overlapping entry on this date"));

    let id = entry["id"].as_i64().unwrap().to_string();
    rwt()
        .args(["--db", &db_path, "entry", "del", &id])
        .assert()
        .success()
        .stdout(contains("deleted").and(contains("not found").not()));

    let rows = json(&db_path, &["entry", "list"]);
    assert!(rows.as_array().unwrap().is_empty());
}
