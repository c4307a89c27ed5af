//! Common utilities for integration tests

use assert_fs::prelude::*;
use assert_fs::TempDir;
use base64::Engine;
use std::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "octocat";
pub const REPO: &str = "portfolio";
pub const GIST_ID: &str = "g1";

pub fn folio_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_folio"))
}

/// A `folio` command pointed at `config` with a token from the environment
pub fn folio_with_config(config: &assert_fs::fixture::ChildPath) -> Command {
    let mut cmd = folio_command();
    cmd.arg("--config")
        .arg(config.path())
        .env("GITHUB_TOKEN", "test-token")
        .env_remove("FOLIO_CONFIG")
        .env("RUST_LOG", "off");
    cmd
}

/// Write a config for `server` into `temp` and return its path
pub fn write_config(temp: &TempDir, server: &MockServer) -> assert_fs::fixture::ChildPath {
    let config = temp.child("config.yaml");
    config
        .write_str(&format!(
            "github:\n  api_url: {}\n  owner: {}\n  repo: {}\n  branch: main\ngist:\n  id: {}\ntimeout_secs: 5\n",
            server.uri(),
            OWNER,
            REPO,
            GIST_ID
        ))
        .unwrap();
    config
}

pub fn contents_path(file: &str) -> String {
    format!("/repos/{}/{}/contents/{}", OWNER, REPO, file)
}

pub fn b64(bytes: impl AsRef<[u8]>) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Contents API body for a file
pub fn file_json(file: &str, sha: &str, body: &[u8]) -> serde_json::Value {
    let name = file.rsplit('/').next().unwrap_or(file);
    serde_json::json!({
        "name": name,
        "path": file,
        "sha": sha,
        "size": body.len(),
        "type": "file",
        "encoding": "base64",
        "content": b64(body),
        "download_url": format!("https://raw.example/{}", file)
    })
}

/// Response of a successful `PUT` on `file`
pub fn commit_json(file: &str, sha: &str) -> serde_json::Value {
    let name = file.rsplit('/').next().unwrap_or(file);
    serde_json::json!({
        "content": {
            "name": name,
            "path": file,
            "sha": sha,
            "size": 1,
            "type": "file",
            "download_url": format!("https://raw.example/{}", file)
        },
        "commit": { "sha": "commit-sha", "message": "ok" }
    })
}

/// Serve `body` as `file` at `sha` for every GET
pub async fn mount_file(server: &MockServer, file: &str, sha: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(contents_path(file)))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json(file, sha, body)))
        .mount(server)
        .await;
}

pub async fn mount_missing(server: &MockServer, file: &str) {
    Mock::given(method("GET"))
        .and(path(contents_path(file)))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not Found" })),
        )
        .mount(server)
        .await;
}

/// The manifest body the store writes for `projects`
pub fn manifest_body(projects: serde_json::Value) -> String {
    serde_json::to_string_pretty(&projects).unwrap()
}
