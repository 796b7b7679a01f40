#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(book: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("garde-cli").unwrap();
    cmd.arg("--book").arg(book);
    cmd
}

#[test]
fn staff_lists_default_roster() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("garde.json"))
        .arg("staff")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fecher | true | true | true | 1 | 1"))
        .stdout(predicate::str::contains("Koch | true | true | true | 0.5 | -"));
}

#[test]
fn generate_clean_month_exits_zero_and_writes_csv() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("plan.csv");
    cli(&dir.path().join("garde.json"))
        .args(["generate", "--year", "2025", "--month", "11", "--out-csv"])
        .arg(&out)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("2025-11-03 | Mon"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("date,weekday,day_shift,friday_late,night,weekend_day,visit,absent,resting"));
}

#[test]
fn out_csv_without_value_uses_default_file_name() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("garde.json"))
        .current_dir(dir.path())
        .args(["generate", "--year", "2025", "--month", "11", "--out-csv"])
        .assert()
        .code(0);

    let csv = fs::read_to_string(dir.path().join("dienstplan_2025_11.csv")).unwrap();
    assert!(csv.starts_with("date,weekday"));
}

#[test]
fn blocked_weekend_is_reported_with_exit_code_two() {
    let dir = tempdir().unwrap();
    let book = dir.path().join("garde.json");
    cli(&book)
        .args([
            "absence",
            "add",
            "--kind",
            "blocked",
            "--from",
            "2025-11-07",
            "--to",
            "2025-11-09",
            "--staff",
            "Gumbiller,Frey,Koch,Mettin,Umland,Zumbusch,Horner,Fecher",
        ])
        .assert()
        .success();
    assert!(book.exists());

    cli(&book)
        .args(["absence", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blocked | 2025-11-08 | Fecher, Frey"));

    cli(&book)
        .args(["generate", "--year", "2025", "--month", "11", "--max-absent", "8"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "2025-11-07: no candidate for Fri/Sat/Sun night block",
        ))
        .stderr(predicate::str::contains("Found 3 warning(s)"));
}

#[test]
fn unknown_staff_and_bad_month_fail() {
    let dir = tempdir().unwrap();
    let book = dir.path().join("garde.json");
    cli(&book)
        .args(["wish", "add", "--date", "2025-11-04", "--staff", "Nobody", "--wish", "no-night"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown staff member: Nobody"));
    cli(&book)
        .args([
            "absence", "add", "--kind", "vacation", "--from", "2025-11-03", "--to", "2025-11-04",
            "--staff", "Koch,Nobody",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown staff member: Nobody"));
    assert!(!book.exists());

    cli(&book)
        .args(["generate", "--year", "2025", "--month", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));
}
