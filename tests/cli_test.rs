use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn deterministic_query() -> Command {
    let mut cmd = Command::new(cargo_bin!("txconsole"));
    // No latency, no fault injection, fixed dataset.
    cmd.args([
        "--seed",
        "42",
        "--min-latency-ms",
        "0",
        "--max-latency-ms",
        "0",
        "--list-fail-rate",
        "0",
        "--details-fail-rate",
        "0",
    ]);
    cmd
}

#[test]
fn test_query_mode_prints_matching_rows_as_csv() {
    let mut cmd = deterministic_query();
    cmd.args(["query", "--search", "txn_0001"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "id,reference,amount,currency,status,created_at,customer_email",
        ))
        .stdout(predicate::str::contains("txn_0001,PAY-100000,"))
        .stdout(predicate::str::contains("customer1@example.com"));
}

#[test]
fn test_query_mode_without_search_prints_whole_dataset() {
    let mut cmd = deterministic_query();
    cmd.arg("query");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("txn_0001,"))
        .stdout(predicate::str::contains("txn_0160,"));
}

#[test]
fn test_query_mode_status_filter_excludes_other_statuses() {
    let mut cmd = deterministic_query();
    cmd.args(["query", "--status", "failed"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",failed,"))
        .stdout(predicate::str::contains(",success,").not())
        .stdout(predicate::str::contains(",pending,").not());
}

#[test]
fn test_query_mode_rejects_unknown_status_value() {
    let mut cmd = deterministic_query();
    cmd.args(["query", "--status", "refunded"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("status"));
}

#[test]
fn test_query_mode_reports_forced_list_failure() {
    let mut cmd = Command::new(cargo_bin!("txconsole"));
    cmd.args([
        "--seed",
        "42",
        "--min-latency-ms",
        "0",
        "--max-latency-ms",
        "0",
        "--list-fail-rate",
        "1",
        "query",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("List endpoint failed. Please retry."));
}
