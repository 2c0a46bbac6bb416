//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

const SIMPLE_DOC: &str = "# Title\n\nThis is a simple sentence. It has two sentences.\n";

const TECHNICAL_DOC: &str = "# OAuth Gateway\n\n\
    The OAuth gateway validates JWT tokens against the API schema. \
    CORS headers and rate limiting protect every endpoint in the microservice.\n\n\
    ```java\nGateway gateway = new Gateway(config);\ngateway.start();\n```\n";

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

fn json_stdout(args: &[&str]) -> Value {
    let output = cmd().args(args).output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("infobox"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_subcommand_fails() {
    cmd()
        .arg("summarize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// =============================================================================
// file
// =============================================================================

#[test]
fn file_prints_info_box_and_metrics() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "guide.md", SIMPLE_DOC);

    cmd()
        .args(["--color", "never", "file", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading Guide"))
        .stdout(predicate::str::contains("Reading time:** 1 minute |"))
        .stdout(predicate::str::contains("Level:** Beginner"))
        .stdout(predicate::str::contains("Detailed Metrics"))
        .stdout(predicate::str::contains("Total words: 10"))
        .stdout(predicate::str::contains("Code blocks: 0"))
        .stdout(predicate::str::contains("Improvement Suggestions").not());
}

#[test]
fn file_json_reports_metrics() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "guide.md", SIMPLE_DOC);

    let json = json_stdout(&["file", &path, "--json"]);
    assert_eq!(json["metrics"]["sentences"], 2);
    assert_eq!(json["metrics"]["code_blocks"], 0);
    assert_eq!(json["level"]["level"], "Beginner");
    assert_eq!(json["reading_time"]["minutes"], 1);
    assert!(json["info_box"].as_str().unwrap().contains("1 minute"));
}

#[test]
fn file_technical_doc_escalates() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "gateway.md", TECHNICAL_DOC);

    let json = json_stdout(&["file", &path, "--json"]);
    assert_eq!(json["metrics"]["has_complex_code"], true);
    assert_ne!(json["level"]["level"], "Beginner");
    let topics = json["key_topics"].as_array().unwrap();
    assert!(topics.iter().any(|t| t == "Authentication"));
}

#[test]
fn file_missing_path_fails() {
    cmd()
        .args(["file", "/nonexistent/nowhere.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to analyze"));
}

// =============================================================================
// infobox
// =============================================================================

#[test]
fn infobox_prints_only_the_box() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "guide.md", SIMPLE_DOC);

    cmd()
        .args(["infobox", &path])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("> **📖 Reading Guide**"))
        .stdout(predicate::str::contains("🟢 Level:** Beginner"))
        .stdout(predicate::str::contains("Key topics:** API Design"))
        .stdout(predicate::str::contains("Detailed Metrics").not());
}

#[test]
fn infobox_pluralizes_minutes() {
    let tmp = TempDir::new().unwrap();
    // About 400 words of prose reads in two minutes.
    let body = "The team reads the plain notes here. ".repeat(60);
    let path = write(tmp.path(), "long.md", &body);

    cmd()
        .args(["infobox", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading time:** 2 minutes |"));
}

#[test]
fn infobox_missing_file_fails() {
    cmd()
        .args(["infobox", "/nonexistent/nowhere.md"])
        .assert()
        .failure();
}

// =============================================================================
// directory
// =============================================================================

#[test]
fn directory_summarizes_tree() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "intro.md", SIMPLE_DOC);
    write(tmp.path(), "api/gateway.md", TECHNICAL_DOC);
    write(tmp.path(), "notes.txt", "not markdown");
    write(tmp.path(), ".hidden/secret.md", SIMPLE_DOC);

    cmd()
        .args(["--color", "never", "directory", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total documents: 2"))
        .stdout(predicate::str::contains("Level Distribution"))
        .stdout(predicate::str::contains("Most Complex Documents"))
        .stdout(predicate::str::contains("Longest Reading Times"))
        .stdout(predicate::str::contains("secret.md").not());
}

#[test]
fn directory_json_summary() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.md", SIMPLE_DOC);
    write(tmp.path(), "b.md", SIMPLE_DOC);

    let json = json_stdout(&["directory", tmp.path().to_str().unwrap(), "--json"]);
    let summary = &json["summary"];
    assert_eq!(summary["total_documents"], 2);
    assert_eq!(summary["failed"], 0);
    assert_eq!(summary["distribution_by_level"]["beginner"], 2);
    assert_eq!(summary["averages"]["reading_time"], 1.0);
    assert_eq!(summary["most_complex"].as_array().unwrap().len(), 2);
}

#[test]
fn directory_survives_unreadable_file() {
    let tmp = TempDir::new().unwrap();
    for name in ["one.md", "two.md", "three.md", "four.md"] {
        write(tmp.path(), name, SIMPLE_DOC);
    }
    fs::write(tmp.path().join("broken.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    cmd()
        .args(["--color", "never", "directory", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total documents: 4"))
        .stdout(predicate::str::contains("Failed: 1"))
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains("broken.md"));
}

#[test]
fn directory_top_limits_rankings() {
    let tmp = TempDir::new().unwrap();
    for i in 0..4 {
        write(tmp.path(), &format!("doc{i}.md"), SIMPLE_DOC);
    }

    let json = json_stdout(&[
        "directory",
        tmp.path().to_str().unwrap(),
        "--top",
        "2",
        "--json",
    ]);
    assert_eq!(json["summary"]["longest_reads"].as_array().unwrap().len(), 2);
    assert_eq!(json["summary"]["total_documents"], 4);
}

#[test]
fn directory_exclude_flag_skips_matches() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "keep.md", SIMPLE_DOC);
    write(tmp.path(), "drafts/skip.md", SIMPLE_DOC);

    let json = json_stdout(&[
        "directory",
        tmp.path().to_str().unwrap(),
        "--exclude",
        "drafts",
        "--json",
    ]);
    assert_eq!(json["summary"]["total_documents"], 1);
}

#[test]
fn directory_missing_root_fails() {
    cmd()
        .args(["directory", "/nonexistent/docs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to analyze directory"));
}

#[test]
fn directory_on_file_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "guide.md", SIMPLE_DOC);

    cmd().args(["directory", &path]).assert().failure();
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_shows_package_name() {
    cmd()
        .args(["--color", "never", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains("Settings"));
}

#[test]
fn info_json_is_valid() {
    let json = json_stdout(&["info", "--json"]);
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["settings"].is_object());
}

#[test]
fn quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}
