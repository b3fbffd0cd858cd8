use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const SHEET_CSV: &str = "sheet_number,day,service_type,members,guests,offerings,notes\n\
                         001,5,S,40,5,120.50,\n\
                         001,8,M,12,0,30,Bible study\n";

fn returns(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("returns").unwrap();
    cmd.env("RETURNS_CLI_DATA_DIR", data_dir)
        .env_remove("RETURNS_CLI_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn write_sheet(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("january.csv");
    std::fs::write(&path, SHEET_CSV).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    returns(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheet"))
        .stdout(predicate::str::contains("outbox"))
        .stdout(predicate::str::contains("user"));
}

#[test]
fn init_writes_settings() {
    let dir = TempDir::new().unwrap();
    returns(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("outbox").is_dir());
}

#[test]
fn config_shows_paths_and_delivery() {
    let dir = TempDir::new().unwrap();
    returns(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("returns-cli Configuration"))
        .stdout(predicate::str::contains("Delivery:          outbox"))
        .stdout(predicate::str::contains("Identity provider: local"));
}

#[test]
fn empty_outbox_and_user_list() {
    let dir = TempDir::new().unwrap();
    returns(dir.path())
        .args(["outbox", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Outbox is empty."));

    returns(dir.path())
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No users yet"));
}

#[test]
fn dry_run_prints_totals_without_signing_in() {
    let dir = TempDir::new().unwrap();
    let csv = write_sheet(&dir);

    returns(dir.path())
        .args(["sheet", "submit", "--dry-run", "--month", "1", "--year", "2025"])
        .args(["-d", "North District", "-c", "Central Church"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Sheet: January 2025"))
        .stdout(predicate::str::contains("Attendance: 57 people"))
        .stdout(predicate::str::contains("Dry run: nothing submitted."));

    assert!(!dir.path().join("outbox").exists());
}

#[test]
fn bad_csv_rows_fail_with_line_numbers() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("bad.csv");
    std::fs::write(
        &csv,
        "sheet_number,day,service_type,members,guests,offerings,notes\n\
         001,5,S,40,5,120.50,\n\
         001,5,X,1,1,1,\n",
    )
    .unwrap();

    returns(dir.path())
        .args(["sheet", "submit", "--dry-run", "-d", "North", "-c", "Central"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 3"));
}

#[test]
fn sheet_without_location_is_rejected() {
    let dir = TempDir::new().unwrap();
    let csv = write_sheet(&dir);

    returns(dir.path())
        .args(["sheet", "submit", "--dry-run", "--month", "1", "--year", "2025"])
        .arg(&csv)
        .assert()
        .failure();
}

#[test]
fn add_user_then_submit_sheet_to_outbox() {
    let dir = TempDir::new().unwrap();
    let csv = write_sheet(&dir);

    returns(dir.path())
        .args(["user", "add", "ada@example.com", "--name", "Ada Lovelace"])
        .env("RETURNS_CLI_PASSWORD", "engine42")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created account: ada@example.com"));

    returns(dir.path())
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"));

    returns(dir.path())
        .args(["sheet", "submit", "--month", "1", "--year", "2025"])
        .args(["-d", "North District", "-c", "Central Church"])
        .args(["-e", "ada@example.com"])
        .env("RETURNS_CLI_PASSWORD", "engine42")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Ada Lovelace"))
        .stdout(predicate::str::contains(
            "Monthly sheet submitted! 2 entries sent for North District - Central Church",
        ));

    returns(dir.path())
        .args(["outbox", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monthly-sheet"))
        .stdout(predicate::str::contains("1 message(s)"));
}

#[test]
fn wrong_password_is_rejected() {
    let dir = TempDir::new().unwrap();
    let csv = write_sheet(&dir);

    returns(dir.path())
        .args(["user", "add", "ada@example.com", "--name", "Ada"])
        .env("RETURNS_CLI_PASSWORD", "engine42")
        .assert()
        .success();

    returns(dir.path())
        .args(["sheet", "submit", "-d", "North", "-c", "Central"])
        .args(["-e", "ada@example.com"])
        .env("RETURNS_CLI_PASSWORD", "wrong-password")
        .arg(&csv)
        .assert()
        .failure();

    returns(dir.path())
        .args(["outbox", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Outbox is empty."));
}
