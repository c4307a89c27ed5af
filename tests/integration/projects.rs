//! Tests for `folio projects`

use super::common::*;
use assert_cmd::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_list_without_manifest() {
    let server = MockServer::start().await;
    mount_missing(&server, "projects.json").await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects yet."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_prints_titles_and_fields() {
    let server = MockServer::start().await;
    mount_file(
        &server,
        "projects.json",
        "m1",
        br#"[{"titulo":"Robot","descripcion":"Line follower"},{"titulo":"Web"}]"#,
    )
    .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["projects", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("• Robot")
                .and(predicate::str::contains("descripcion: Line follower"))
                .and(predicate::str::contains("• Web")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_keeps_field_order() {
    let server = MockServer::start().await;
    mount_file(
        &server,
        "projects.json",
        "m1",
        br#"[{"titulo":"Robot","zeta":1,"alfa":2}]"#,
    )
    .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["projects", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(manifest_body(
            json!([{ "titulo": "Robot", "zeta": 1, "alfa": 2 }]),
        )));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_uploads_image_then_appends() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);
    let image = temp.path().join("robot.jpg");
    std::fs::write(&image, b"jpeg-bytes").unwrap();

    mount_missing(&server, "images/Robot_v2_image.jpg").await;
    Mock::given(method("PUT"))
        .and(path(contents_path("images/Robot_v2_image.jpg")))
        .and(body_partial_json(json!({
            "content": b64("jpeg-bytes"),
            "branch": "main"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(commit_json("images/Robot_v2_image.jpg", "i1")),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_file(&server, "projects.json", "m1", br#"[{"titulo":"A"}]"#).await;
    let expected = manifest_body(json!([
        { "titulo": "A" },
        {
            "titulo": "Robot v2",
            "descripcion": "Arm",
            "imagePath": "images/Robot_v2_image.jpg"
        }
    ]));
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .and(body_partial_json(json!({
            "content": b64(expected),
            "sha": "m1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_json("projects.json", "m2")))
        .expect(1)
        .mount(&server)
        .await;

    folio_with_config(&config)
        .args(["projects", "add", "--title", "Robot v2", "--field", "descripcion=Arm"])
        .arg("--image")
        .arg(&image)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Uploaded images/Robot_v2_image.jpg")
                .and(predicate::str::contains("Added project 'Robot v2'")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_to_missing_manifest_creates_it_without_sha() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    mount_missing(&server, "projects.json").await;
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .and(body_partial_json(json!({
            "content": b64(manifest_body(json!([{ "titulo": "First" }])))
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(commit_json("projects.json", "m1")))
        .expect(1)
        .mount(&server)
        .await;

    folio_with_config(&config)
        .args(["projects", "add", "--title", "First"])
        .assert()
        .success();

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    assert!(body.get("sha").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_deletes_files_and_entry() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    mount_file(
        &server,
        "projects.json",
        "m1",
        br#"[{"titulo":"A","pdfPath":"pdfs/A.pdf","imagePath":"images/A_image.jpg"},{"titulo":"B"}]"#,
    )
    .await;
    mount_file(&server, "pdfs/A.pdf", "p1", b"pdf").await;
    mount_missing(&server, "images/A_image.jpg").await;

    Mock::given(method("DELETE"))
        .and(path(contents_path("pdfs/A.pdf")))
        .and(body_partial_json(json!({ "sha": "p1", "branch": "main" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": null })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .and(body_partial_json(json!({
            "content": b64(manifest_body(json!([{ "titulo": "B" }]))),
            "sha": "m1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_json("projects.json", "m2")))
        .expect(1)
        .mount(&server)
        .await;

    folio_with_config(&config)
        .args(["projects", "remove", "--title", "A"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("✓ pdf pdfs/A.pdf")
                .and(predicate::str::contains("image images/A_image.jpg (already absent)"))
                .and(predicate::str::contains("✓ manifest entry 'A'")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_reports_manifest_conflict() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    mount_file(&server, "projects.json", "m1", br#"[{"titulo":"A"}]"#).await;
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "projects.json does not match m1" })),
        )
        .mount(&server)
        .await;

    folio_with_config(&config)
        .args(["projects", "remove", "--title", "A"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 of 1 steps failed"))
        .stderr(predicate::str::contains("error[conflict]"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_unknown_title_writes_nothing() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    mount_file(&server, "projects.json", "m1", br#"[{"titulo":"B"}]"#).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    folio_with_config(&config)
        .args(["projects", "remove", "--title", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest entry 'A' (already absent)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bad_token_suggests_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(contents_path("projects.json")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["projects", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("error[unauthorized]")
                .and(predicate::str::contains("Bad credentials"))
                .and(predicate::str::contains("folio login")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_rejects_title_in_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["projects", "add", "--title", "Robot", "--field", "titulo=Other"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("error[config]")
                .and(predicate::str::contains("set it with --title")),
        );
}
