//! End-to-end tests for the fintrack binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();
    dir
}

#[test]
fn init_seeds_default_pockets() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    fintrack(&dir)
        .args(["pocket", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Housing"))
        .stdout(predicate::str::contains("Entertainment"));

    fintrack(&dir)
        .args(["payment-type", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash"));
}

#[test]
fn salary_set_and_show() {
    let dir = initialized();

    fintrack(&dir)
        .args(["salary", "set", "3500", "-m", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("February 2024"));

    fintrack(&dir)
        .args(["salary", "show", "-m", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$3,500.00"));

    // Months without a salary read as zero
    fintrack(&dir)
        .args(["salary", "show", "-m", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn fixed_expense_add_list_and_toggle() {
    let dir = initialized();

    fintrack(&dir)
        .args(["fixed", "add", "Housing", "Rent", "1200", "-d", "5", "-m", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fix-1"));

    fintrack(&dir)
        .args(["fixed", "list", "-m", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("$1,200.00"));

    fintrack(&dir)
        .args(["fixed", "toggle", "fix-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as paid"));

    fintrack(&dir)
        .args(["fixed", "list", "-m", "2024-02", "-s", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent").not());
}

#[test]
fn hybrid_transaction_over_budget_fails() {
    let dir = initialized();

    fintrack(&dir)
        .args(["fixed", "add-hybrid", "Food", "Groceries", "400", "-m", "2024-02"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["hybrid", "add", "1", "150", "-d", "Market", "--date", "2024-02-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$250.00 remaining"));

    fintrack(&dir)
        .args(["hybrid", "add", "1", "300", "--date", "2024-02-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget exceeded for 'Groceries'"));

    fintrack(&dir)
        .args(["hybrid", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Market"));
}

#[test]
fn daily_expenses_and_summary() {
    let dir = initialized();

    fintrack(&dir)
        .args(["daily", "budget", "600", "-m", "2024-03"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["daily", "add", "Coffee", "4.50", "--date", "2024-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"));

    fintrack(&dir)
        .args(["daily", "summary", "-m", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$600.00"))
        .stdout(predicate::str::contains("$4.50 in 1 expense(s)"));
}

#[test]
fn monthly_summary_reports_salary() {
    let dir = initialized();

    fintrack(&dir)
        .args(["salary", "set", "3000", "-m", "2024-02"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["fixed", "add", "Housing", "Rent", "1000", "-m", "2024-02"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["summary", "-m", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Summary: February 2024"))
        .stdout(predicate::str::contains("$3,000.00"));
}

#[test]
fn invalid_month_is_rejected() {
    let dir = initialized();

    fintrack(&dir)
        .args(["salary", "show", "-m", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Month must be between 01 and 12"));

    fintrack(&dir)
        .args(["salary", "show", "-m", "1999-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the supported range"));
}

#[test]
fn export_json_to_stdout() {
    let dir = initialized();

    fintrack(&dir)
        .args(["export", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\""));
}
