//! Integration tests for promptstore
//!
//! These tests verify end-to-end behavior: discovering prompt files on disk,
//! building the registry, and rendering prompts through the full pipeline.

use std::fs;

use promptstore::binding::TemplateValues;
use promptstore::manager::Manager;
use promptstore::store::{self, MemoryStore, StoreError};
use promptstore::value::Value;
use tempfile::TempDir;

const HOLIDAY: &str = "\
name: holiday
model: claude-3-5-sonnet-latest
config:
  temperature: 0.9
  maxTokens: 500
  outputFormat: text
  input:
    parameters:
      country: string
      style?: string
    default:
      country: Malta
prompts:
  system: You are a helpful AI assistant that enjoys making penguin related puns.
  user: 'Tell me about {{ country }}.{{#if style}} Answer in the style of a {{ style }}.{{/if}}'
";

const GUIDE: &str = "\
config:
  outputFormat: json
prompts:
  user: 'What is {{ topic }}?'
  system: ''
";

fn values(entries: &[(&str, Value)]) -> TemplateValues {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

// =============================================================================
// Directory loading
// =============================================================================

#[test]
fn test_manager_loads_directory_tree() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("holiday.prompt"), HOLIDAY).unwrap();
    fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

    let nested = temp.path().join("guides");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("The Guide.prompt"), GUIDE).unwrap();

    let manager = Manager::from_dir(temp.path().to_str().unwrap()).unwrap();
    assert_eq!(manager.len(), 2);
    assert_eq!(manager.names(), ["holiday", "the-guide"]);
}

#[test]
fn test_manager_missing_directory_fails() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let missing = temp.path().join("nowhere");

    let result = Manager::from_dir(missing.to_str().unwrap());
    assert!(matches!(result, Err(StoreError::PathNotFound(_))));
}

// =============================================================================
// End-to-end rendering
// =============================================================================

#[test]
fn test_render_with_defaults_and_caller_values() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("holiday.prompt"), HOLIDAY).unwrap();

    let manager = Manager::from_dir(temp.path().to_str().unwrap()).unwrap();
    let prompt = manager.get("holiday").unwrap();

    // Default kicks in
    let rendered = prompt.user_prompt(&TemplateValues::new()).unwrap();
    assert_eq!(rendered, "Tell me about Malta.");

    // Caller value wins and the optional block renders
    let rendered = prompt
        .user_prompt(&values(&[
            ("country", Value::from("Antarctica")),
            ("style", Value::from("pirate")),
        ]))
        .unwrap();
    assert_eq!(rendered, "Tell me about Antarctica. Answer in the style of a pirate.");
}

#[test]
fn test_render_json_augmentation_end_to_end() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("guide.prompt"), GUIDE).unwrap();

    let manager = Manager::from_dir(temp.path().to_str().unwrap()).unwrap();
    let prompt = manager.get("guide").unwrap();

    let system = prompt
        .system_prompt(&values(&[("topic", Value::from("Bluetooth"))]))
        .unwrap();
    assert_eq!(system, "Please provide the response in JSON");

    let user = prompt
        .user_prompt(&values(&[("topic", Value::from("Bluetooth"))]))
        .unwrap();
    assert_eq!(user, "What is Bluetooth?");
}

#[test]
fn test_render_missing_required_parameter_end_to_end() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("guide.prompt"), GUIDE).unwrap();

    let manager = Manager::from_dir(temp.path().to_str().unwrap()).unwrap();
    let prompt = manager.get("guide").unwrap();

    let err = prompt.user_prompt(&TemplateValues::new()).unwrap_err();
    assert_eq!(err.to_string(), "no value provided for parameter topic");
}

// =============================================================================
// Registry collisions
// =============================================================================

#[test]
fn test_duplicate_names_rejected_across_loaders() {
    let mut store = MemoryStore::default();
    store.push("Example", "prompts:\n  user: hi\n".as_bytes());
    store.push("example!!", "prompts:\n  user: hi\n".as_bytes());

    let err = Manager::from_loader(&store).unwrap_err();
    assert_eq!(err.to_string(), "duplicate prompt file name: example");
}

// =============================================================================
// Round trip through disk
// =============================================================================

#[test]
fn test_serialize_round_trip_through_disk() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let source = temp.path().join("holiday.prompt");
    fs::write(&source, HOLIDAY).unwrap();

    let original = store::read_prompt_file(&source).unwrap();
    let copy = temp.path().join("copy.prompt");
    store::write_prompt_file(&original, &copy).unwrap();

    let reloaded = store::read_prompt_file(&copy).unwrap();
    assert_eq!(reloaded, original);
}

// =============================================================================
// CLI
// =============================================================================

#[test]
fn test_cli_list_and_check() {
    use assert_cmd::Command;
    use predicates::prelude::*;

    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("holiday.prompt"), HOLIDAY).unwrap();

    Command::cargo_bin("ps")
        .unwrap()
        .args(["--dir", temp.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("holiday"));

    Command::cargo_bin("ps")
        .unwrap()
        .args(["--dir", temp.path().to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 prompt files loaded"));
}

#[test]
fn test_cli_render_with_values() {
    use assert_cmd::Command;
    use predicates::prelude::*;

    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("holiday.prompt"), HOLIDAY).unwrap();

    Command::cargo_bin("ps")
        .unwrap()
        .args([
            "--dir",
            temp.path().to_str().unwrap(),
            "render",
            "holiday",
            "--values",
            r#"{"country": "Antarctica"}"#,
            "--user",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tell me about Antarctica."));
}
