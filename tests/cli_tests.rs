#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains as str_contains;
use tempfile::tempdir;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_prints_schedule_for_due_date() {
    run_cli("2026-01-09\nquit\n")
        .success()
        .stdout(str_contains("Estimated due date: Friday, January 9, 2026"))
        .stdout(str_contains("20 Week Ultrasound (20 weeks gestation)"))
        .stdout(str_contains("Friday, August 22, 2025"))
        .stdout(str_contains("Saturday, December 6, 2025"))
        .stdout(str_contains("Thursday, December 18, 2025"));
}

#[test]
fn cli_blank_line_clears_schedule() {
    run_cli("2026-01-09\n\nshow\nquit\n")
        .success()
        .stdout(str_contains("No schedule."));
}

#[test]
fn cli_reports_malformed_input() {
    run_cli("next friday\nquit\n")
        .success()
        .stdout(str_contains(
            "Error: expected a date in YYYY-MM-DD form, got 'next friday'",
        ));
}

#[test]
fn cli_week_toggle_hides_annotations() {
    run_cli("weeks off\n2026-01-09\nquit\n")
        .success()
        .stdout(str_contains("20 Week Ultrasound\n"))
        .stdout(str_contains("weeks gestation").not());
}

#[test]
fn cli_switches_to_friday_table() {
    run_cli("2026-01-09\ntable friday\nquit\n")
        .success()
        .stdout(str_contains("Using table 'friday_clinic'"))
        .stdout(str_contains("32 Week Appointment"));
}

#[test]
fn cli_saves_and_loads_table() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("clinic.json");
    let path = path.to_string_lossy();
    let script = format!("table friday\ntable save json {path}\ntable standard\ntable load json {path}\ntable show\nquit\n");
    run_cli(&script)
        .success()
        .stdout(str_contains("Table saved to"))
        .stdout(str_contains("Table 'friday_clinic' loaded from"));
}

#[test]
fn cli_json_output_tags_milestone_kinds() {
    run_cli("2026-01-09\njson\nquit\n")
        .success()
        .stdout(str_contains("\"kind\": \"candidate_pair\""))
        .stdout(str_contains("\"due_date\": \"2026-01-09\""));
}

#[allow(deprecated)]
fn cli_with_args(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.args(args);
    cmd
}

#[test]
fn cli_accepts_stacked_verbose_flags() {
    cli_with_args(&["-vv"])
        .env_remove("RUST_LOG")
        .write_stdin("2026-01-09\nquit\n")
        .assert()
        .success()
        .stdout(str_contains("Estimated due date: Friday, January 9, 2026"))
        .stderr(str_contains("calculated schedule"));
}

#[test]
fn cli_help_lists_verbose_flag() {
    cli_with_args(&["--help"])
        .assert()
        .success()
        .stdout(str_contains("--verbose"));
}

#[test]
fn cli_rejects_unknown_flags() {
    cli_with_args(&["--bogus"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(str_contains("--bogus"));
}
