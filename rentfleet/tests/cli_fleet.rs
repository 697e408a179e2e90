//! CLI tests for the rentfleet binary.
//!
//! Spawns the binary against a temp snapshot file and verifies outcomes,
//! exit codes, and that state persists between invocations.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rentfleet::exit_codes;

fn rentfleet(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rentfleet"))
        .arg("--store")
        .arg(store)
        .args(args)
        .output()
        .expect("spawn rentfleet")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn fleet_flow_persists_across_invocations() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = temp.path().join("fleet.json");

    // adding the car before its model is rejected with no_model
    let out = rentfleet(&store, &["add-car", "R-100", "black", "Sprint"]);
    assert_eq!(out.status.code(), Some(exit_codes::REJECTED));
    assert!(stdout(&out).contains("no_model"));

    let out = rentfleet(
        &store,
        &["add-model", "Sprint", "50", "Vornado", "Freedonia", "200"],
    );
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert!(stdout(&out).contains("ok"));

    let out = rentfleet(&store, &["add-car", "R-100", "black", "Sprint"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));

    let out = rentfleet(
        &store,
        &["add-driver", "1000", "Mara Voss", "1990", "555-0101"],
    );
    assert_eq!(out.status.code(), Some(exit_codes::OK));

    let out = rentfleet(&store, &["rent", "R-100", "1000", "2025-08-01", "3"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));

    // the open rental is visible from a fresh process
    let out = rentfleet(&store, &["rent", "R-100", "1000", "2025-08-10", "1"]);
    assert_eq!(out.status.code(), Some(exit_codes::REJECTED));
    assert!(stdout(&out).contains("car_in_use"));

    let out = rentfleet(&store, &["return", "R-100", "1000", "2025-08-06", "5", "80"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert!(stdout(&out).contains("Excellent"));

    let out = rentfleet(&store, &["records", "2025-08-01", "2025-08-04"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let listing = stdout(&out);
    assert!(listing.contains("R-100"));
    assert!(listing.contains("cost 704.5"));
}

#[test]
fn duplicate_add_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = temp.path().join("fleet.json");

    let out = rentfleet(
        &store,
        &["add-model", "Sprint", "50", "Vornado", "Freedonia", "200"],
    );
    assert_eq!(out.status.code(), Some(exit_codes::OK));

    let out = rentfleet(
        &store,
        &["add-model", "Sprint", "50", "Vornado", "Freedonia", "200"],
    );
    assert_eq!(out.status.code(), Some(exit_codes::REJECTED));
    assert!(stdout(&out).contains("model_exists"));
}

#[test]
fn remove_model_without_matches_leaves_store_untouched() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = temp.path().join("fleet.json");

    // on a missing store, a no-op removal must not create the file
    let out = rentfleet(&store, &["remove-model", "Ghost"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert!(stdout(&out).contains("0 cars removed"));
    assert!(!store.exists());

    // on an existing store, a no-op removal must not rewrite it
    let out = rentfleet(
        &store,
        &["add-model", "Sprint", "50", "Vornado", "Freedonia", "200"],
    );
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let before = fs::read_to_string(&store).expect("read store");

    let out = rentfleet(&store, &["remove-model", "Ghost"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let after = fs::read_to_string(&store).expect("read store");
    assert_eq!(before, after);
}

#[test]
fn lookups_on_missing_store_report_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = temp.path().join("nothing.json");

    let out = rentfleet(&store, &["show-car", "R-100"]);
    assert_eq!(out.status.code(), Some(exit_codes::REJECTED));
    assert!(stdout(&out).contains("not found"));

    // queries stay empty and succeed
    let out = rentfleet(&store, &["cars-by-model", "Sprint"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert!(stdout(&out).trim().is_empty());
}
