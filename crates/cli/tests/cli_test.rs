//! # CLI Command Tests
//!
//! This file contains tests for the `validate` and `oembed` commands of the
//! `slidemix` binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a temporary fixture file within a given directory.
fn create_fixture_file(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let file_path = dir.join("urls.txt");
    let mut file = fs::File::create(&file_path).expect("Failed to create fixture file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to fixture file");
    file_path
}

#[test]
fn test_validate_command_success() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_file(
        temp_dir.path(),
        "http://www.slideshare.net/esminc/ss-3015720/11\r\nhttp://www.slideshare.net/esminc/ss-3015720/12\n",
    );

    // Act
    let mut cmd = Command::cargo_bin("slidemix").unwrap();
    cmd.arg("validate").arg(fixture_path.to_str().unwrap());

    // Assert
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK: 2 URLs"));
}

#[test]
fn test_validate_command_reports_every_problem() {
    let temp_dir = tempdir().unwrap();
    let mut lines: Vec<String> = (1..=51)
        .map(|page| format!("http://www.slideshare.net/esminc/ss-3015720/{page}"))
        .collect();
    lines.push("https://elsewhere.example/x/y/z".to_string());
    let fixture_path = create_fixture_file(temp_dir.path(), &lines.join("\n"));

    let mut cmd = Command::cargo_bin("slidemix").unwrap();
    cmd.arg("validate").arg(fixture_path.to_str().unwrap());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("urls_text include invalid URL(s)"))
        .stdout(predicate::str::contains(
            "urls_text includes more than 50 URLs",
        ))
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn test_validate_command_no_file() {
    let mut cmd = Command::cargo_bin("slidemix").unwrap();

    cmd.arg("validate")
        .arg("a/non/existent/urls.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_oembed_command_rejects_foreign_url() {
    let mut cmd = Command::cargo_bin("slidemix").unwrap();

    cmd.arg("oembed")
        .arg("https://example.com/a/b/c")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a recognised slide page"));
}

#[test]
fn test_oembed_command_rejects_unknown_format() {
    let mut cmd = Command::cargo_bin("slidemix").unwrap();

    cmd.arg("oembed")
        .arg("http://www.slideshare.net/esminc/ss-3015720/11")
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format: yaml"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_oembed_command_against_mock_provider() {
    // Arrange
    let server = MockServer::start().await;
    let page = r#"<html><head><title>Mock Deck</title>
        <meta name="description" content="Served locally">
        <script>{"user_name":"tily"}</script></head>
        <body><div class="slide" data-index="4"><img data-normal="http://img.example/4.jpg"></div></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/tily/deck/4"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;
    let slide_url = format!("{}/tily/deck/4", server.uri());

    // Act
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("slidemix")
            .unwrap()
            .arg("--provider-url")
            .arg(server.uri())
            .arg("oembed")
            .arg(&slide_url)
            .arg("--format")
            .arg("xml")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    // Assert
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<title>Mock Deck</title>"));
    assert!(stdout.contains("<url>http://img.example/4.jpg</url>"));
}
