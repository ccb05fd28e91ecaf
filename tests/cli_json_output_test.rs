use httpmock::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn scrape_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_playstore-scrape"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_json_flag_keeps_stdout_parseable() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/details")
            .query_param("id", "com.example.app")
            .query_param("hl", "en");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(r#"<div class="id-app-title">Example App</div>"#);
    });

    let output = scrape_command()
        .args([
            "com.example.app",
            "--json",
            "--no-save",
            "--storefront-base",
            &server.url("/details"),
            "--output-path",
            temp_dir.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();

    page_mock.assert();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["title"], "Example App");
    assert!(record["coverImageUrl"].is_null());
    assert_eq!(record["screenshotUrls"], serde_json::json!([]));

    // 診斷訊息仍然輸出，只是在 stderr
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cover image not found"));
}

#[test]
fn test_invalid_package_exits_with_input_error_code() {
    let output = scrape_command()
        .args(["1.bad.name", "--json", "--no-save"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
