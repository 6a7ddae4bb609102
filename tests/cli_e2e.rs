//! End-to-end CLI tests for the versefetch binary.

#![allow(deprecated)]

mod support;
use support::socket_guard::start_mock_server_or_skip;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary with an isolated (empty) config home.
fn versefetch(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("versefetch").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, server: &MockServer) -> std::path::PathBuf {
    let config = dir.join("config.toml");
    std::fs::write(
        &config,
        format!(
            "base_url = \"{}/passage/\"\ndelay_ms = 0 # no pause in tests\noutput_dir = \"{}\"\n",
            server.uri(),
            dir.display()
        ),
    )
    .unwrap();
    config
}

fn passage_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        "<html><body><div class=\"passage-content\">{body}</div></body></html>"
    ))
}

#[test]
fn test_binary_help_displays_usage() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetch Bible passages"));
}

#[test]
fn test_binary_version_displays_version() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("versefetch"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path())
        .args(["--invalid-flag", "translations"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_without_subcommand_fails() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path()).assert().failure();
}

#[test]
fn test_translations_lists_table() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path())
        .arg("translations")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("KJV").and(predicate::str::contains("King James Version")),
        );
}

#[test]
fn test_books_apocrypha_flag() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path())
        .arg("books")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Revelation").and(predicate::str::contains("Tobit").not()),
        );

    versefetch(tempdir.path())
        .args(["books", "--apocrypha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tobit"));
}

#[test]
fn test_reversed_range_is_rejected() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path())
        .args(["range", "Psalms", "23", "5", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start verse 5 is after end verse 2"));
}

#[test]
fn test_unknown_book_suggests_closest_name() {
    let tempdir = TempDir::new().unwrap();
    versefetch(tempdir.path())
        .args(["verse", "Genesys", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean 'Genesis'?"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let tempdir = TempDir::new().unwrap();
    let config = tempdir.path().join("bad.toml");
    std::fs::write(&config, "concurrency = 4\n").unwrap();
    versefetch(tempdir.path())
        .arg("--config")
        .arg(&config)
        .args(["chapter", "Ruth", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[tokio::test]
async fn test_chapter_prints_text_lines() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/passage/"))
        .and(query_param("search", "Ruth 1"))
        .and(query_param("version", "KJV"))
        .respond_with(passage_page(
            r#"<h3>Naomi</h3><span class="text Ruth-1-1">Now it came to pass</span>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let config = write_config(tempdir.path(), &server);
    versefetch(tempdir.path())
        .arg("--config")
        .arg(&config)
        .args(["chapter", "ruth", "1", "-t", "KJV"])
        .assert()
        .success()
        .stdout("[HEADING] Naomi\n[VERSE 1] Now it came to pass\n");
}

#[tokio::test]
async fn test_verse_json_output() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(passage_page(
            r#"<span class="text John-11-35">Jesus wept.</span>"#,
        ))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let config = write_config(tempdir.path(), &server);
    let output = versefetch(tempdir.path())
        .arg("--config")
        .arg(&config)
        .args(["--json", "verse", "John", "11", "35"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items[0]["type"], "verse");
    assert_eq!(items[0]["number"], 35);
    assert_eq!(items[0]["text"], "Jesus wept.");
}

#[tokio::test]
async fn test_empty_result_prints_no_results() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(passage_page("<h3>Nothing here</h3>"))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let config = write_config(tempdir.path(), &server);
    versefetch(tempdir.path())
        .arg("--config")
        .arg(&config)
        .args(["verse", "John", "3", "99"])
        .assert()
        .success()
        .stdout("No results found.\n");
}

#[tokio::test]
async fn test_extraction_failure_saves_page_markup() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let body = "<html><body><p>Temporarily unavailable</p></body></html>";
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let config = write_config(tempdir.path(), &server);
    versefetch(tempdir.path())
        .arg("--config")
        .arg(&config)
        .args(["chapter", "Ruth", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("last_failed_passage.html"));

    let saved = std::fs::read_to_string(tempdir.path().join("last_failed_passage.html")).unwrap();
    assert_eq!(saved, body);
}

#[tokio::test]
async fn test_batch_writes_book_file() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(query_param("search", "Ruth 1"))
        .respond_with(passage_page(
            r#"<span class="text Ruth-1-1">Now it came to pass</span>"#,
        ))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(passage_page(""))
        .with_priority(10)
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let config = write_config(tempdir.path(), &server);
    let out_dir = tempdir.path().join("books");
    versefetch(tempdir.path())
        .arg("--config")
        .arg(&config)
        .args(["-q", "batch", "--out-dir"])
        .arg(&out_dir)
        .arg("Ruth")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch complete: 1 saved, 0 failed"));

    let raw = std::fs::read_to_string(out_dir.join("Ruth_NIV.json")).unwrap();
    let items: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(items.as_array().map(Vec::len), Some(1));
    assert_eq!(items[0]["book"], "Ruth");
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}
