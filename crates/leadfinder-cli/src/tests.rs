use std::path::{Path, PathBuf};

use clap::Parser;
use leadfinder_leads::{MemoryStorage, ScanCounter};

use super::*;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("leadfinder-cli-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_input(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).expect("write input");
    path
}

const BATCH_ONE: &str = r#"[
  {"place_id": "p1", "name": "Joe's Plumbing", "formatted_address": "1 Elm St", "formatted_phone_number": "555-0101"},
  {"place_id": "p2", "name": "Ace Pipes", "website": "https://acepipes.com", "formatted_phone_number": "555-0102"},
  {"place_id": "p3", "name": "Drain Bros", "website": "https://facebook.com/drainbros"}
]"#;

const BATCH_TWO: &str = r#"{"results": [
  {"place_id": "p1", "name": "Joe's Plumbing (dup)"},
  {"place_id": "p4", "name": "Pipe Dreams", "vicinity": "9 Oak Ave"}
]}"#;

// -----------------------------------------------------------------------
// argument parsing
// -----------------------------------------------------------------------

#[test]
fn parses_scans_command() {
    let cli = Cli::try_parse_from(["leadfinder", "scans"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Scans));
}

#[test]
fn parses_classify_without_url() {
    let cli = Cli::try_parse_from(["leadfinder", "classify"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Classify { url: None }));
}

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from([
        "leadfinder",
        "search",
        "--keyword",
        "plumbers",
        "--input",
        "a.json",
        "--input",
        "b.json",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            keyword,
            inputs,
            radius_miles,
            min_rating,
            require_phone,
            output,
        } => {
            assert_eq!(keyword, "plumbers");
            assert_eq!(inputs.len(), 2);
            assert!((radius_miles - 5.0).abs() < f64::EPSILON);
            assert!(min_rating.abs() < f64::EPSILON);
            assert!(!require_phone);
            assert!(output.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn search_requires_an_input() {
    let result = Cli::try_parse_from(["leadfinder", "search", "--keyword", "plumbers"]);
    assert!(result.is_err());
}

// -----------------------------------------------------------------------
// run_search
// -----------------------------------------------------------------------

#[test]
fn run_search_accumulates_and_exports() {
    let dir = temp_dir();
    let inputs = vec![
        write_input(&dir, "one.json", BATCH_ONE),
        write_input(&dir, "two.json", BATCH_TWO),
    ];
    let output = dir.join("plumbers.csv");
    let mut counter = ScanCounter::load(MemoryStorage::new(), 10).expect("counter");

    let store = search::run_search(
        &mut counter,
        &search::SearchArgs {
            keyword: "plumbers",
            inputs: &inputs,
            radius_miles: 5.0,
            min_rating: 0.0,
            require_phone: false,
            output: Some(&output),
        },
    )
    .expect("search");

    // p2 has its own site; p1 repeats in the second batch.
    let names: Vec<_> = store.leads().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Joe's Plumbing", "Drain Bros", "Pipe Dreams"]);
    assert_eq!(counter.used(), 2);

    let csv = std::fs::read_to_string(&output).expect("csv written");
    assert!(csv.starts_with("Name,Address,Phone,Rating,Reviews,Other Platforms,Google Maps\r\n"));
    assert!(csv.contains("\"Drain Bros\",,,,,Facebook,"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn run_search_stops_when_scans_run_out() {
    let dir = temp_dir();
    let inputs = vec![
        write_input(&dir, "one.json", BATCH_ONE),
        write_input(&dir, "two.json", BATCH_TWO),
    ];
    let mut counter = ScanCounter::load(MemoryStorage::new(), 1).expect("counter");

    let store = search::run_search(
        &mut counter,
        &search::SearchArgs {
            keyword: "plumbers",
            inputs: &inputs,
            radius_miles: 5.0,
            min_rating: 0.0,
            require_phone: false,
            output: None,
        },
    )
    .expect("search");

    assert_eq!(store.count(), 2);
    assert!(counter.is_exhausted());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn run_search_phone_filter_and_empty_export() {
    let dir = temp_dir();
    let inputs = vec![write_input(
        &dir,
        "one.json",
        r#"[{"place_id": "p9", "name": "No Phone Deli"}]"#,
    )];
    let output = dir.join("leads.csv");
    let mut counter = ScanCounter::load(MemoryStorage::new(), 10).expect("counter");

    let store = search::run_search(
        &mut counter,
        &search::SearchArgs {
            keyword: "deli",
            inputs: &inputs,
            radius_miles: 5.0,
            min_rating: 0.0,
            require_phone: true,
            output: Some(&output),
        },
    )
    .expect("search");

    assert_eq!(store.count(), 0);
    assert!(!output.exists(), "empty store must not produce a file");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn run_search_rejects_unreadable_input() {
    let dir = temp_dir();
    let inputs = vec![dir.join("missing.json")];
    let mut counter = ScanCounter::load(MemoryStorage::new(), 10).expect("counter");

    let result = search::run_search(
        &mut counter,
        &search::SearchArgs {
            keyword: "deli",
            inputs: &inputs,
            radius_miles: 5.0,
            min_rating: 0.0,
            require_phone: false,
            output: None,
        },
    );
    assert!(result.is_err());

    let _ = std::fs::remove_dir_all(dir);
}
