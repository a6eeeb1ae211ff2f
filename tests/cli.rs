//! Run the `crossfill` binary against the fixtures and check what it prints and how it exits.

use std::process::{Command, Output};

const STRUCTURE0: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/structure0.txt");
const WORDS0: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/words0.txt");
const WORDS_UNFILLABLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/words_unfillable.txt");
const RAGGED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/ragged.txt");

fn crossfill(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crossfill"))
        .args(args)
        .env_remove("CROSSFILL_DEBUG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run crossfill")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_prints_filled_grid() {
    let output = crossfill(&[STRUCTURE0, WORDS0]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "█SIX█\n█E██F\n█V██I\n█E██V\n█NINE\n");
}

#[test]
fn test_writes_grid_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("structure0.png");

    let output = crossfill(&[STRUCTURE0, WORDS0, path.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "█SIX█\n█E██F\n█V██I\n█E██V\n█NINE\n");
    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (500, 500));
}

#[test]
fn test_no_solution_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.png");

    let output = crossfill(&[STRUCTURE0, WORDS_UNFILLABLE, path.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "No solution.\n");
    assert!(!path.exists());
}

#[test]
fn test_ragged_structure_exits_with_error_code() {
    let output = crossfill(&[RAGGED, WORDS0]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("Error: structure row 1 has 2 cells, expected 3 [E004]"));
}

#[test]
fn test_missing_structure_exits_with_error_code() {
    let output = crossfill(&["tests/fixtures/nope.txt", WORDS0]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("[E001]"));
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    for args in [&[STRUCTURE0][..], &[STRUCTURE0, WORDS0, "out.png", "extra"][..]] {
        let output = crossfill(args);

        assert!(!output.status.success());
        assert_eq!(stdout(&output), "");
        assert!(stderr(&output).contains("Usage:"));
    }
}
