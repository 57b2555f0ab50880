use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PERIOD: &str = "2026-01";

fn duo(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("duo").unwrap();
    cmd.env("DUO_BUDGET_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    duo(&dir)
        .args(["init", "--primary-name", "Ana", "--secondary-name", "Luis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized duo-budget"));
    duo(&dir).args(["whoami", "primary"]).assert().success();
    dir
}

fn add_expense(dir: &TempDir, category: &str, concept: &str, amount: &str) {
    duo(dir)
        .args(["expense", "add", category, concept, amount, "--period", PERIOD])
        .assert()
        .success();
}

#[test]
fn test_summary_end_to_end() {
    let dir = setup();
    duo(&dir)
        .args([
            "meta",
            "set",
            "--period",
            PERIOD,
            "--income-primary",
            "2000",
            "--income-secondary",
            "1500",
            "--savings-target",
            "300",
            "--savings-goal",
            "500",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3500.00 €"));

    add_expense(&dir, "Comida", "Supermercado", "50");
    add_expense(&dir, "ocio", "cervezas", "20");
    add_expense(&dir, "comida", "supermercado", "30");

    duo(&dir)
        .args(["summary", "--period", PERIOD, "--categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3200.00 €"))
        .stdout(predicate::str::contains("100.00 €"))
        .stdout(predicate::str::contains("3100.00 €"))
        .stdout(predicate::str::contains("60%"))
        .stdout(predicate::str::contains("supermercado (2)"));
}

#[test]
fn test_expense_requires_identity() {
    let dir = TempDir::new().unwrap();
    duo(&dir).arg("init").assert().success();

    duo(&dir)
        .args(["expense", "add", "comida", "pan", "2.5", "--period", PERIOD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No participant selected"));

    duo(&dir)
        .args([
            "expense", "add", "comida", "pan", "2.5", "--period", PERIOD, "--as", "secondary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paid by:  Secondary"));
}

#[test]
fn test_invalid_expense_is_rejected() {
    let dir = setup();

    duo(&dir)
        .args(["expense", "add", "comida", "pan", "-5", "--period", PERIOD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than 0"));

    duo(&dir)
        .args(["expense", "add", "comida", "  ", "5", "--period", PERIOD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Concept must not be empty"));

    duo(&dir)
        .args(["expense", "list", "--period", PERIOD])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found"));
}

#[test]
fn test_consolidate_twice() {
    let dir = setup();
    duo(&dir)
        .args([
            "meta",
            "set",
            "--period",
            PERIOD,
            "--savings-target",
            "100",
            "--savings-extra",
            "50",
            "--savings-accumulated",
            "1000",
        ])
        .assert()
        .success();

    duo(&dir)
        .args(["consolidate", "--period", PERIOD])
        .assert()
        .success()
        .stdout(predicate::str::contains("Consolidated 150.00 €"))
        .stdout(predicate::str::contains("1150.00 €"));

    duo(&dir)
        .args(["consolidate", "--period", PERIOD])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to consolidate"));
}

#[test]
fn test_analyze_filters() {
    let dir = setup();
    add_expense(&dir, "comida", "supermercado", "50");
    add_expense(&dir, "ocio", "cervezas", "20");
    add_expense(&dir, "transporte", "gasolina", "45");

    duo(&dir)
        .args(["analyze", "--period", PERIOD, "--search", "CERVE", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching: 1 expense(s), 20.00 € of 115.00 €"))
        .stdout(predicate::str::contains("cervezas"))
        .stdout(predicate::str::contains("gasolina").not());

    duo(&dir)
        .args(["analyze", "--period", PERIOD, "--expand", "Comida"])
        .assert()
        .success()
        .stdout(predicate::str::contains("comida (50.00 €)"));
}

#[test]
fn test_export_and_delete() {
    let dir = setup();
    add_expense(&dir, "comida", "pan", "2.5");

    let output = duo(&dir)
        .args(["export", "--period", PERIOD, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let export: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(export["period"], PERIOD);
    assert_eq!(export["totals"]["total_expenses"], 2.5);
    let id = export["expenses"][0]["id"].as_str().unwrap().to_string();

    duo(&dir)
        .args(["expense", "delete", &id, "--period", PERIOD])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense"));

    duo(&dir)
        .args(["expense", "delete", &id, "--period", PERIOD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_carry_forward() {
    let dir = setup();
    duo(&dir)
        .args(["meta", "set", "--period", PERIOD, "--income-primary", "1000"])
        .assert()
        .success();
    add_expense(&dir, "comida", "pan", "250");

    duo(&dir)
        .args(["carry", "--period", PERIOD])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carried 750.00 € from 2026-01 into 2026-02"));

    duo(&dir)
        .args(["summary", "--period", "2026-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carried over"));
}

#[test]
fn test_bad_period() {
    let dir = setup();
    duo(&dir)
        .args(["summary", "--period", "2026-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn test_config_lists_periods() {
    let dir = setup();
    duo(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("No periods with data yet."));

    add_expense(&dir, "comida", "pan", "3");
    duo(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Periods with data: 2026-01"));
}

#[test]
fn test_category_filter_ignores_case() {
    let dir = setup();
    add_expense(&dir, "Comida", "Pan", "3");
    add_expense(&dir, "ocio", "cine", "9");

    duo(&dir)
        .args(["analyze", "--period", PERIOD, "--category", "Comida", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching: 1 expense(s), 3.00 € of 12.00 €"));

    duo(&dir)
        .args(["expense", "list", "--period", PERIOD, "--category", " COMIDA "])
        .assert()
        .success()
        .stdout(predicate::str::contains("pan"))
        .stdout(predicate::str::contains("cine").not());
}

#[test]
fn test_rust_log_enables_logging() {
    let dir = setup();
    duo(&dir)
        .env("RUST_LOG", "debug")
        .arg("config")
        .assert()
        .success()
        .stderr(predicate::str::contains("opened budget store"));

    duo(&dir)
        .arg("config")
        .assert()
        .success()
        .stderr(predicate::str::contains("opened budget store").not());
}
