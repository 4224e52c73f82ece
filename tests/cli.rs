use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Each test gets its own HOME so settings.json and the data dir are isolated.
fn khata(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("khata").unwrap();
    cmd.env("HOME", home.path());
    cmd
}

fn init(home: &TempDir) -> String {
    let data_dir = home.path().join("khata-data");
    khata(home)
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized khata"));
    data_dir.to_string_lossy().to_string()
}

#[test]
fn init_creates_workspace_and_ledger() {
    let home = TempDir::new().unwrap();
    let data_dir = init(&home);
    let ledger = std::path::Path::new(&data_dir).join("default").join("ledger.json");
    assert!(ledger.exists());
}

#[test]
fn employee_add_and_list() {
    let home = TempDir::new().unwrap();
    init(&home);

    khata(&home)
        .args(["employees", "add", "Ravi", "--cut-type", "percent", "--cut-value", "10"])
        .assert()
        .success();
    khata(&home)
        .args(["employees", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ravi"))
        .stdout(predicate::str::contains("10%"));
}

#[test]
fn outgoing_and_summary() {
    let home = TempDir::new().unwrap();
    init(&home);

    khata(&home)
        .args(["employees", "add", "Ravi", "--cut-value", "10"])
        .assert()
        .success();
    khata(&home)
        .args([
            "add", "outgoing", "--employee", "Ravi", "--amount", "1000", "--date", "2024-01-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded outgoing"));

    // 10% cut on 1000: expected back 900.
    khata(&home)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ravi"))
        .stdout(predicate::str::contains("₹900.00"));
}

#[test]
fn return_reduces_outstanding() {
    let home = TempDir::new().unwrap();
    init(&home);

    khata(&home)
        .args(["employees", "add", "Ravi", "--cut-value", "10"])
        .assert()
        .success();
    khata(&home)
        .args(["add", "outgoing", "--employee", "Ravi", "--amount", "1000"])
        .assert()
        .success();
    khata(&home)
        .args(["add", "return", "--amount", "400", "--source", "CA Sharma"])
        .assert()
        .success();

    khata(&home)
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 outgoing, 1 return"))
        .stdout(predicate::str::contains("₹500.00"));
}

#[test]
fn unknown_employee_created_on_outgoing() {
    let home = TempDir::new().unwrap();
    init(&home);

    khata(&home)
        .args(["add", "outgoing", "--employee", "Sunil", "--amount", "250"])
        .assert()
        .success();
    // Created with a zero cut, so the full amount is expected back.
    khata(&home)
        .args(["report", "employee", "Sunil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹250.00"));
}

#[test]
fn parse_extracts_amount_from_slip_text() {
    let home = TempDir::new().unwrap();
    init(&home);

    let slip = home.path().join("slip.txt");
    std::fs::write(
        &slip,
        "Paid to Ramesh Kumar\n₹1,200.00\n10 Jan 2024, 10:30 am\nUPI Ref No 405212345678\n",
    )
    .unwrap();

    khata(&home)
        .args(["parse", slip.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,200.00"))
        .stdout(predicate::str::contains("405212345678"));
}

#[test]
fn parse_save_commits_outgoing() {
    let home = TempDir::new().unwrap();
    init(&home);

    let slip = home.path().join("slip.txt");
    std::fs::write(
        &slip,
        "Paid to Ramesh Kumar\n₹1,200.00\n10 Jan 2024, 10:30 am\nUPI Ref No 405212345678\n",
    )
    .unwrap();

    khata(&home)
        .args(["parse", slip.to_str().unwrap(), "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 saved"));
    khata(&home)
        .args(["txns", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ramesh Kumar"));
}

#[test]
fn match_backfills_return_from_statement() {
    let home = TempDir::new().unwrap();
    init(&home);

    khata(&home)
        .args([
            "add", "return", "--amount", "5000", "--date", "2024-01-10", "--source", "",
        ])
        .assert()
        .success();

    let stmt = home.path().join("statement.csv");
    std::fs::write(
        &stmt,
        "Date,Description,Ref No,Amount\n09/01/2024,NEFT FROM SHARMA ASSOC,NEFT12345678,5000.00\n",
    )
    .unwrap();

    khata(&home)
        .args(["match", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transactions updated"));

    // Second run against the same file is refused without --force.
    khata(&home)
        .args(["match", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("already been matched"));

    khata(&home)
        .args(["report", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All returns reconciled"));
}

#[test]
fn export_and_reimport_json() {
    let home = TempDir::new().unwrap();
    init(&home);

    khata(&home)
        .args(["employees", "add", "Ravi", "--cut-value", "5"])
        .assert()
        .success();
    let out = home.path().join("ledger-export.json");
    khata(&home)
        .args(["export", "json", out.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"cutType\": \"percent\""));

    khata(&home)
        .args(["import", "json", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 employees"));
}

#[test]
fn workspaces_are_isolated() {
    let home = TempDir::new().unwrap();
    init(&home);

    khata(&home)
        .args(["employees", "add", "Ravi"])
        .assert()
        .success();
    khata(&home)
        .args(["workspace", "use", "site-b"])
        .assert()
        .success();
    khata(&home)
        .args(["employees", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ravi").not());
    khata(&home)
        .args(["workspace", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("site-b"));
}
