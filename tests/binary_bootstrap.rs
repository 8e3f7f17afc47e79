use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const DEMO_DOCUMENT: &str = r#"[
  {
    "model": "demo_model",
    "merge": false,
    "style": [
      {
        "name": "vivid",
        "positive": { "fixed": ["a photo"], "dynamic": ["subject", "time_of_day"] },
        "negative": { "fixed": ["blurry"], "dynamic": [] }
      }
    ]
  },
  {
    "model": "merged_model",
    "merge": true,
    "style": [
      {
        "name": "flat",
        "positive": { "fixed": ["flat art"], "dynamic": [] },
        "negative": { "fixed": ["shadows"], "dynamic": [] }
      }
    ]
  }
]"#;

fn write_document(dir: &Path) -> String {
    let path = dir.join("prompt_template.json");
    fs::write(&path, DEMO_DOCUMENT).expect("write document");
    path.display().to_string()
}

fn run(dir: &Path, args: &[&str], script: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_promptcraft"));
    command
        .args(args)
        .env("HOME", dir)
        .env("PROMPTCRAFT_STATE_ROOT", dir.join("state"))
        .env_remove("PROMPTCRAFT_TEMPLATES")
        .env_remove("PROMPTCRAFT_LOG_LEVEL")
        .env_remove("PROMPTCRAFT_SCRIPT_KEYS");
    if let Some(script) = script {
        command.env("PROMPTCRAFT_SCRIPT_KEYS", script);
    }
    command.output().expect("run binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn scripted_wizard_prints_demo_prompts() {
    let dir = tempdir().expect("tempdir");
    let templates = write_document(dir.path());

    let output = run(
        dir.path(),
        &["--templates", &templates],
        Some("enter,enter,type:a cat,enter"),
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout(&output),
        "[Positive Prompt]\na photo,\na cat\n\n[Negative Prompt]\nblurry\n"
    );

    let log = fs::read_to_string(dir.path().join("state/logs/promptcraft.log")).expect("log");
    assert!(log.contains("\"event\":\"templates.loaded\""));
}

#[test]
fn scripted_wizard_keeps_values_across_back_navigation() {
    let dir = tempdir().expect("tempdir");
    let templates = write_document(dir.path());

    let output = run(
        dir.path(),
        &["run", "--templates", &templates],
        Some("enter,enter,tab,type:sunset,esc,esc,enter,enter,enter"),
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[Positive Prompt]\na photo,\nsunset\n\n[Negative Prompt]\nblurry\n"
    );
}

#[test]
fn scripted_wizard_home_resets_to_a_different_model() {
    let dir = tempdir().expect("tempdir");
    let templates = write_document(dir.path());

    let output = run(
        dir.path(),
        &["--templates", &templates],
        Some("enter,enter,type:a cat,home,down,enter,enter,enter"),
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[Full Prompt]\nflat art,\nno shadows\n");
}

#[test]
fn scripted_wizard_types_escaped_commas() {
    let dir = tempdir().expect("tempdir");
    let templates = write_document(dir.path());

    let output = run(
        dir.path(),
        &["--templates", &templates],
        Some(r"enter,enter,type:red\, gold,enter"),
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[Positive Prompt]\na photo,\nred, gold\n\n[Negative Prompt]\nblurry\n"
    );
}

#[test]
fn missing_document_fails_without_starting_the_wizard() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.json");

    let output = run(
        dir.path(),
        &["--templates", &missing.display().to_string()],
        Some("enter,enter,enter"),
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error loading data:"), "stderr: {stderr}");
    assert!(stdout(&output).is_empty());
}

#[test]
fn wizard_without_terminal_or_script_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let templates = write_document(dir.path());

    let output = run(dir.path(), &["--templates", &templates], None);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("PROMPTCRAFT_SCRIPT_KEYS"));
}

#[test]
fn render_command_assembles_without_the_wizard() {
    let dir = tempdir().expect("tempdir");
    let templates = write_document(dir.path());

    let output = run(
        dir.path(),
        &[
            "render",
            "--templates",
            &templates,
            "--model",
            "demo model",
            "--style",
            "vivid",
            "--field",
            "subject=a cat",
            "--field",
            "time_of_day=  ",
        ],
        None,
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout(&output),
        "[Positive Prompt]\na photo,\na cat\n\n[Negative Prompt]\nblurry\n"
    );
}

#[test]
fn models_command_lists_document() {
    let dir = tempdir().expect("tempdir");
    let templates = write_document(dir.path());

    let output = run(dir.path(), &["models", "--templates", &templates], None);
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains("0: demo model (demo_model) merge=false"));
    assert!(listing.contains("   - vivid fields=subject,time_of_day"));
    assert!(listing.contains("1: merged model (merged_model) merge=true"));
}

#[test]
fn unknown_command_exits_non_zero() {
    let dir = tempdir().expect("tempdir");
    let output = run(dir.path(), &["launch"], None);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown command `launch`"));
}
