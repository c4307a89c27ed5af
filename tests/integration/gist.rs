//! Tests for `folio gist`

use super::common::*;
use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gist_json(content: &str) -> serde_json::Value {
    json!({
        "id": GIST_ID,
        "description": "activities",
        "files": {
            "actividades.json": {
                "filename": "actividades.json",
                "content": content,
                "truncated": false
            }
        }
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/gists/{}", GIST_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(gist_json(
            r#"[{"name":"Hackathon","description":"48h","url":"https://a.example"}]"#,
        )))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["gist", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("• Hackathon")
                .and(predicate::str::contains("url: https://a.example")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_appends_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/gists/{}", GIST_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gist_json(r#"[{"name":"Old"}]"#)),
        )
        .mount(&server)
        .await;

    let expected = manifest_body(json!([
        { "name": "Old" },
        { "name": "Talk", "description": "Rust meetup", "url": "https://talk.example" }
    ]));
    Mock::given(method("PATCH"))
        .and(path(format!("/gists/{}", GIST_ID)))
        .and(body_json(json!({
            "files": { "actividades.json": { "content": expected } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gist_json("[]")))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args([
            "gist",
            "add",
            "--name",
            "Talk",
            "--description",
            "Rust meetup",
            "--url",
            "https://talk.example",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Talk'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_requires_gist_id() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = temp.child("config.yaml");
    config
        .write_str(&format!(
            "github:\n  api_url: {}\n  owner: octocat\n  repo: portfolio\n",
            server.uri()
        ))
        .unwrap();

    folio_with_config(&config)
        .args(["gist", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[config]"));
}
