use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo_bin!("metrocab"))
}

fn temp_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("metrocab-cli-{}", uuid::Uuid::new_v4()))
}

#[test]
fn top_level_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Book metro tickets with an optional last-mile cab",
        ))
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("quote"))
        .stdout(predicate::str::contains("form"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn top_level_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("metrocab 0.3.0"));
}

#[test]
fn book_help_shows_options_and_defaults() {
    cmd()
        .args(["book", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-n, --name <NAME>"))
        .stdout(predicate::str::contains("-f, --from <STATION>"))
        .stdout(predicate::str::contains("-t, --to <STATION>"))
        .stdout(predicate::str::contains("--drop <LOCATION>"))
        .stdout(predicate::str::contains("--car <TYPE>"))
        .stdout(predicate::str::contains("--voice"))
        .stdout(predicate::str::contains("[default: tiered]"))
        .stdout(predicate::str::contains("[default: ticket]"))
        .stdout(predicate::str::contains("[default: 10]"))
        .stdout(predicate::str::contains("With cab:"));
}

#[test]
fn metro_only_booking_prints_ticket() {
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "-p", "2", "--no-files",
            "--booking-id", "ABCD1234",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Metro Booking Confirmed!"))
        .stdout(predicate::str::contains("Route : Ameerpet -> KPHB"))
        .stdout(predicate::str::contains("Booking ID : ABCD1234"))
        .stdout(predicate::str::contains("Total Fare : ₹60"))
        .stdout(predicate::str::contains("saved").not());
}

#[test]
fn cab_booking_totals_240() {
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "ameerpet", "-t", "kphb", "-p", "2", "--cab", "--drop",
            "hotel", "--car", "suv", "--no-files",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("UNIFIED METRO + CAB TICKET"))
        .stdout(predicate::str::contains("CAB   : KPHB -> Hotel"))
        .stdout(predicate::str::contains("Cab Fare   : ₹180"))
        .stdout(predicate::str::contains("Total Fare : ₹240"));
}

#[test]
fn booking_writes_artifacts() {
    let dir = temp_dir();
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "--booking-id", "QWER5678",
            "--label", "journey", "--out",
        ])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Journey_QWER5678.png (image/png)"))
        .stdout(predicate::str::contains("Journey_QWER5678.txt (text/plain)"));

    let text = std::fs::read_to_string(dir.join("Journey_QWER5678.txt")).unwrap();
    assert!(text.starts_with("METRO TICKET"));
    assert!(dir.join("Journey_QWER5678.png").exists());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn json_booking_output() {
    let output = cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "-p", "2", "--cab", "--drop",
            "office", "--pricing", "flat", "--no-files", "--json",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["ticket"]["fare"]["metro_fare"], 60);
    assert_eq!(parsed["ticket"]["fare"]["cab"]["fare"], 100);
    assert_eq!(parsed["ticket"]["fare"]["grand_total"], 160);
    assert_eq!(parsed["ticket"]["destination"], "KPHB");
    assert_eq!(parsed["ticket"]["id"].as_str().unwrap().len(), 8);
}

#[test]
fn empty_name_fails() {
    cmd()
        .args(["book", "-n", "  ", "-f", "Ameerpet", "-t", "KPHB", "--no-files"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("passenger name is required"));
}

#[test]
fn same_station_fails() {
    cmd()
        .args(["book", "-n", "Asha", "-f", "KPHB", "-t", "kphb", "--no-files"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "source and destination cannot be the same",
        ));
}

#[test]
fn unknown_station_has_hint() {
    cmd()
        .args(["book", "-n", "Asha", "-f", "Airport", "-t", "KPHB", "--no-files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("metrocab stations"));
}

#[test]
fn cab_without_drop_fails() {
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "--cab", "--car", "mini",
            "--no-files",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("drop location is required"));
}

#[test]
fn too_many_passengers_fails() {
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "-p", "11", "--no-files",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds maximum of 10"));
}

#[test]
fn json_mode_error_is_structured() {
    let output = cmd()
        .args([
            "book", "-n", "Asha", "-f", "Raidurg", "-t", "Raidurg", "--no-files", "--json",
        ])
        .assert()
        .failure();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON error");
    assert_eq!(parsed["error"]["kind"], "same_station");
    assert!(parsed["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Raidurg"));
}

#[test]
fn invalid_booking_id_fails() {
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "--booking-id", "short",
            "--no-files",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid booking id"));
}

#[test]
fn quote_table() {
    cmd()
        .args(["quote", "-p", "3", "--cab", "--car", "sedan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cab (Sedan)"))
        .stdout(predicate::str::contains("₹90"))
        .stdout(predicate::str::contains("₹180"))
        .stdout(predicate::str::contains("₹270"));
}

#[test]
fn quote_json_flat() {
    let output = cmd()
        .args(["quote", "-p", "2", "--cab", "--pricing", "flat", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["cab"]["rate"], 50);
    assert_eq!(parsed["grand_total"], 160);
}

#[test]
fn quote_tiered_cab_needs_car() {
    cmd()
        .args(["quote", "--cab"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("car type is required"));
}

#[test]
fn quote_metro_only_shows_zero_cab_row() {
    cmd()
        .args(["quote", "-p", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cab (not selected)"))
        .stdout(predicate::str::contains("₹0"))
        .stdout(predicate::str::contains("—").not());
}

#[test]
fn quote_applies_passenger_limit() {
    cmd()
        .args(["quote", "-p", "200000000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds maximum of 10"));
}

#[test]
fn unbounded_quote_prices_largest_count() {
    let output = cmd()
        .args([
            "quote", "--max-passengers", "0", "-p", "4294967295", "--cab", "--car", "suv", "--json",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["metro_fare"], 128_849_018_850u64);
    assert_eq!(parsed["grand_total"], 515_396_075_400u64);
}

#[test]
fn unbounded_booking_totals_without_wrapping() {
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "-p", "200000000",
            "--max-passengers", "0", "--no-files",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Fare : ₹6000000000"));
}

#[test]
fn voice_needs_files() {
    cmd()
        .args([
            "book", "-n", "Asha", "-f", "Ameerpet", "-t", "KPHB", "--voice", "--no-files",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be combined with --no-files"));
}

#[test]
fn invalid_pricing_fails() {
    cmd()
        .args(["quote", "--pricing", "surge"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid pricing"));
}

#[test]
fn stations_lists_catalog() {
    cmd()
        .arg("stations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hitech City"))
        .stdout(predicate::str::contains("Shopping Mall"))
        .stdout(predicate::str::contains("SUV"))
        .stdout(predicate::str::contains("Metro fare: ₹30 per passenger"));
}

#[test]
fn form_reads_commands_from_stdin() {
    let dir = temp_dir();
    cmd()
        .arg("form")
        .arg("--out")
        .arg(&dir)
        .write_stdin("name Asha\ncount 2\ncab yes\ndrop hotel\ncar suv\ncab no\nshow\nbook\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Book Metro & Cab]"))
        .stdout(predicate::str::contains("Cab Booking: Not Selected"))
        .stdout(predicate::str::contains("Metro Booking Confirmed!"))
        .stdout(predicate::str::contains("Total Fare : ₹60"));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_subcommand_fails() {
    cmd().arg("fly").assert().failure();
}
