//! Tests for output module

use super::*;
use crate::error::Error;
use crate::pagination::ResultSet;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;
use test_case::test_case;

fn sample_result(endpoint: &str) -> ResultSet {
    ResultSet::new(
        endpoint,
        vec![
            json!({"id": 1, "name": "Rick Sanchez"}),
            json!({"id": 2, "name": "Morty Smith", "tags": ["a", "b"]}),
        ],
    )
}

fn names_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Naming Tests
// ============================================================================

#[test_case("/api/character", "api_character")]
#[test_case("api/character/", "api_character")]
#[test_case("/v1/users.json", "v1_users_json")]
#[test_case("/a,b/c", "a_b_c")]
#[test_case("foo", "foo")]
#[test_case("/", "root")]
#[test_case("", "root")]
fn test_base_name(endpoint: &str, expected: &str) {
    assert_eq!(base_name(endpoint), expected);
}

#[test]
fn test_sequential_filename_empty_directory() {
    let existing: Vec<String> = vec![];
    assert_eq!(sequential_filename("foo", &existing), "foo_1.json");
}

#[test]
fn test_sequential_filename_advances_past_max() {
    assert_eq!(
        sequential_filename("foo", ["foo_1.json", "foo_2.json"]),
        "foo_3.json"
    );
    assert_eq!(
        sequential_filename("foo", ["foo_7.json", "foo_2.json"]),
        "foo_8.json"
    );
}

#[test]
fn test_sequential_filename_ignores_unrelated_files() {
    let existing = [
        "foo.json",
        "foo_bar_9.json",
        "foo_x.json",
        "foo_4.txt",
        "food_5.json",
        "bar_12.json",
        "foo_2.json",
    ];
    assert_eq!(sequential_filename("foo", existing), "foo_3.json");
}

#[test]
fn test_sequenced_names_use_output_extension() {
    let existing = [format!("foo_7.{OUTPUT_EXTENSION}")];
    assert_eq!(next_sequence("foo", &existing), 8);
}

#[test]
fn test_next_sequence_nested_base() {
    assert_eq!(next_sequence("api_character", ["api_character_10.json"]), 11);
    assert_eq!(next_sequence("foo_bar", ["foo_bar_9.json", "foo_3.json"]), 10);
}

#[test]
fn test_deterministic_filename_ignores_directory() {
    let policy = NamingPolicy::Deterministic;
    assert_eq!(
        policy.filename("/api/character", ["api_character.json", "api_character_1.json"]),
        "api_character.json"
    );
    assert_eq!(
        policy.filename("/api/character", Vec::<String>::new()),
        deterministic_filename("/api/character")
    );
}

#[test]
fn test_naming_policy_parse() {
    assert_eq!(
        "sequential".parse::<NamingPolicy>().unwrap(),
        NamingPolicy::Sequential
    );
    assert_eq!(
        " Deterministic ".parse::<NamingPolicy>().unwrap(),
        NamingPolicy::Deterministic
    );
    assert!(matches!(
        "random".parse::<NamingPolicy>(),
        Err(Error::Config { .. })
    ));
    assert_eq!(NamingPolicy::default(), NamingPolicy::Sequential);
    assert_eq!(NamingPolicy::Deterministic.to_string(), "deterministic");
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_to_pretty_json_uses_four_spaces() {
    let bytes = to_pretty_json(&[json!({"id": 1})]).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "[\n    {\n        \"id\": 1\n    }\n]"
    );
}

#[test]
fn test_to_pretty_json_empty() {
    let bytes = to_pretty_json(&[]).unwrap();
    assert_eq!(bytes, b"[]");
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_write_sequential_round_trip() {
    let dir = tempdir().unwrap();
    let result = sample_result("/api/character");

    let path = ResultWriter::new(NamingPolicy::Sequential)
        .write(&result, dir.path())
        .unwrap();

    assert_eq!(path, dir.path().join("api_character_1.json"));
    let parsed: Vec<Value> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(parsed, result.items);
}

#[test]
fn test_write_sequential_never_overwrites() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("foo_1.json"), "[]").unwrap();
    fs::write(dir.path().join("foo_2.json"), "[]").unwrap();

    let writer = ResultWriter::new(NamingPolicy::Sequential);
    let first = writer.write(&sample_result("foo"), dir.path()).unwrap();
    let second = writer.write(&sample_result("foo"), dir.path()).unwrap();

    assert_eq!(first, dir.path().join("foo_3.json"));
    assert_eq!(second, dir.path().join("foo_4.json"));
    assert_eq!(fs::read_to_string(dir.path().join("foo_1.json")).unwrap(), "[]");
    assert_eq!(
        names_in(dir.path()),
        vec!["foo_1.json", "foo_2.json", "foo_3.json", "foo_4.json"]
    );
}

#[test]
fn test_write_deterministic_overwrites() {
    let dir = tempdir().unwrap();
    let writer = ResultWriter::new(NamingPolicy::Deterministic);
    assert_eq!(writer.policy(), NamingPolicy::Deterministic);

    let first = writer.write(&sample_result("/api/character"), dir.path()).unwrap();
    let updated = ResultSet::new("/api/character", vec![json!({"id": 99})]);
    let second = writer.write(&updated, dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(names_in(dir.path()), vec!["api_character.json"]);
    let parsed: Vec<Value> = serde_json::from_slice(&fs::read(&second).unwrap()).unwrap();
    assert_eq!(parsed, vec![json!({"id": 99})]);
}

#[test]
fn test_write_creates_missing_directory() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("out").join("pulls");

    let path = ResultWriter::default()
        .write(&sample_result("foo"), &nested)
        .unwrap();

    assert_eq!(path, nested.join("foo_1.json"));
    assert!(path.exists());
}

#[test]
fn test_write_leaves_no_temporary_files() {
    let dir = tempdir().unwrap();
    ResultWriter::default()
        .write(&sample_result("foo"), dir.path())
        .unwrap();

    assert_eq!(names_in(dir.path()), vec!["foo_1.json"]);
}

#[test]
fn test_write_empty_result_set() {
    let dir = tempdir().unwrap();
    let path = ResultWriter::default()
        .write(&ResultSet::new("/empty", vec![]), dir.path())
        .unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "[]");
}

#[test]
fn test_write_into_file_path_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let err = ResultWriter::default()
        .write(&sample_result("foo"), &blocker)
        .unwrap_err();
    assert!(matches!(err, Error::Filesystem(_)));
}

#[test]
fn test_plan_matches_write() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("foo_5.json"), "[]").unwrap();
    let writer = ResultWriter::default();

    let planned = writer.plan("foo", dir.path()).unwrap();
    let written = writer.write(&sample_result("foo"), dir.path()).unwrap();
    assert_eq!(planned, written);
}
