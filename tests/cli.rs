use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vyapaar(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vyapaar").unwrap();
    cmd.env("VYAPAAR_TRACK_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn logged_in(user: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    vyapaar(dir.path()).args(["login", user]).assert().success();
    dir
}

#[test]
fn requires_login() {
    let dir = TempDir::new().unwrap();
    vyapaar(dir.path())
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn admin_sees_seed_dashboard() {
    let dir = logged_in("u1");
    vyapaar(dir.path())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("₹12,500.00"))
        .stdout(predicate::str::contains("₹3,650.00"))
        .stdout(predicate::str::contains("(2 items)"));
}

#[test]
fn staff_can_only_submit() {
    let dir = logged_in("u2");

    vyapaar(dir.path())
        .args(["report", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"));

    vyapaar(dir.path())
        .args([
            "expense", "submit", "--amount", "780", "--merchant", "Gupta Hardware", "--category",
            "Maintenance", "--payment", "cash",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense submitted for review."))
        .stdout(predicate::str::contains("Pending Review"))
        .stdout(predicate::str::contains("Site Manager (Staff)"));
}

#[test]
fn submit_rejects_missing_merchant() {
    let dir = logged_in("u2");
    vyapaar(dir.path())
        .args(["expense", "submit", "--amount", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("merchant"));
}

#[test]
fn receipt_is_prefilled_by_demo_classifier() {
    let dir = logged_in("u2");
    let receipt = dir.path().join("bill.png");
    fs::write(&receipt, [0x89, b'P', b'N', b'G']).unwrap();

    vyapaar(dir.path())
        .args(["expense", "submit", "--receipt"])
        .arg(&receipt)
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo Merchant (No API Key)"))
        .stdout(predicate::str::contains("₹1,234.50"))
        .stdout(predicate::str::contains("attached image"));
}

#[test]
fn review_approve_all_clears_queue() {
    let dir = logged_in("u1");

    vyapaar(dir.path())
        .args(["review", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Local Tea Stall"))
        .stdout(predicate::str::contains("Indian Oil Pump"));

    vyapaar(dir.path())
        .args(["review", "approve", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 expense(s) approved."));

    vyapaar(dir.path())
        .args(["review", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All caught up!"));
}

#[test]
fn reject_single_expense_with_note() {
    let dir = logged_in("u1");

    vyapaar(dir.path())
        .args(["review", "reject", "e3", "--note", "No pump slip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked Rejected"));

    vyapaar(dir.path())
        .args(["expense", "show", "e3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rejected"))
        .stdout(predicate::str::contains("No pump slip"));
}

#[test]
fn report_export_writes_filtered_csv() {
    let dir = logged_in("u1");
    let output = dir.path().join("october.csv");

    vyapaar(dir.path())
        .args(["report", "export", "--month", "2023-10", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 expense(s)"));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("\"ID\",\"Date\",\"Merchant\""));

    vyapaar(dir.path())
        .args(["report", "show", "--business", "Brick Factory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹450.00"))
        .stdout(predicate::str::contains("Shree Cement").not());
}

#[test]
fn report_months_newest_first() {
    let dir = logged_in("u1");
    vyapaar(dir.path())
        .args(["report", "months"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-10"));
}

#[test]
fn delete_requires_confirmation_flag_when_not_interactive() {
    let dir = logged_in("u1");

    vyapaar(dir.path())
        .args(["expense", "delete", "e1"])
        .assert()
        .failure();

    vyapaar(dir.path())
        .args(["expense", "delete", "e1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense e1"));

    vyapaar(dir.path())
        .args(["expense", "show", "e1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn taxonomy_administration() {
    let dir = logged_in("u1");

    vyapaar(dir.path())
        .args(["settings", "add-business", "Warehouse"])
        .assert()
        .success();
    vyapaar(dir.path())
        .args(["settings", "add-business", "Warehouse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    vyapaar(dir.path())
        .args(["settings", "remove-category", "Labor"])
        .assert()
        .success();

    vyapaar(dir.path())
        .args(["settings", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warehouse"))
        .stdout(predicate::str::contains("Labor").not());
}

#[test]
fn simulate_forward_adds_pending_expense() {
    let dir = logged_in("u1");

    vyapaar(dir.path())
        .args(["settings", "simulate-forward"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Whatsapp Forwarded Store"))
        .stdout(predicate::str::contains("WhatsApp Bot"));

    vyapaar(dir.path())
        .args(["review", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 pending"));
}

#[test]
fn reset_restores_sample_data() {
    let dir = logged_in("u1");

    vyapaar(dir.path())
        .args(["review", "delete", "--all", "--yes"])
        .assert()
        .success();
    vyapaar(dir.path())
        .args(["reset", "--yes"])
        .assert()
        .success();

    vyapaar(dir.path())
        .args(["review", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 pending"));
}

#[test]
fn corrupt_document_falls_back_to_seed() {
    let dir = logged_in("u1");
    vyapaar(dir.path()).arg("init").assert().success();

    let data_dir = dir.path().join("data");
    fs::write(data_dir.join("vyapaar_track_data_v1.json"), "{not json").unwrap();

    vyapaar(dir.path())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("₹12,500.00"));

    assert!(data_dir.join("vyapaar_track_data_v1.corrupt.json").exists());
}

#[test]
fn logout_ends_session() {
    let dir = logged_in("u1");
    vyapaar(dir.path()).arg("logout").assert().success();
    vyapaar(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}
