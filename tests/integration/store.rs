//! Manifest stores over the real HTTP client

use super::common::*;
use folio::config::Config;
use folio::di::ServiceContainer;
use folio::github::GitHubClient;
use folio::portfolio::{FileContent, ManifestAction, Project};
use folio::FolioError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn container(server: &MockServer) -> ServiceContainer {
    let mut config = Config::default();
    config.github.api_url = server.uri();
    config.github.owner = OWNER.to_string();
    config.github.repo = REPO.to_string();
    config.gist.id = Some(GIST_ID.to_string());

    let client = GitHubClient::with_token(
        &server.uri(),
        Some("test-token".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();
    ServiceContainer::with_providers(Arc::new(config), Arc::new(client))
}

#[tokio::test]
async fn test_append_reads_sha_once_and_writes_with_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(contents_path("projects.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(file_json("projects.json", "m1", br#"[{"titulo":"A"}]"#)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .and(body_partial_json(json!({ "sha": "m1", "message": "Add project B" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_json("projects.json", "m2")))
        .expect(1)
        .mount(&server)
        .await;

    container(&server)
        .project_store()
        .append(Project::with_title("titulo", "B"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_stale_writer_gets_conflict() {
    let server = MockServer::start().await;
    mount_file(&server, "projects.json", "m1", br#"[]"#).await;
    // The first write moves the manifest to m2; any later write still carrying m1 is stale
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_json("projects.json", "m2")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "projects.json does not match m1" })),
        )
        .mount(&server)
        .await;

    let container = container(&server);
    let store = container.project_store();
    store
        .append(Project::with_title("titulo", "A"))
        .await
        .unwrap();
    let err = store
        .append(Project::with_title("titulo", "B"))
        .await
        .unwrap_err();

    assert!(matches!(err, FolioError::Conflict(ref m) if m.contains("does not match")));
}

#[tokio::test]
async fn test_update_remove_drops_every_match() {
    let server = MockServer::start().await;
    mount_file(
        &server,
        "projects.json",
        "m1",
        br#"[{"titulo":"A"},{"titulo":"B"},{"titulo":"A","v":2}]"#,
    )
    .await;
    Mock::given(method("PUT"))
        .and(path(contents_path("projects.json")))
        .and(body_partial_json(json!({
            "content": b64(manifest_body(json!([{ "titulo": "B" }]))),
            "message": "Remove project A"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_json("projects.json", "m2")))
        .expect(1)
        .mount(&server)
        .await;

    let removed = container(&server)
        .uploader()
        .update_projects_list(&Project::with_title("titulo", "A"), ManifestAction::Remove)
        .await
        .unwrap();
    assert_eq!(removed, 2);
}

#[tokio::test]
async fn test_corrupt_manifest_is_decode_error() {
    let server = MockServer::start().await;
    mount_file(&server, "projects.json", "m1", b"{not json").await;

    let err = container(&server).uploader().get_projects().await.unwrap_err();
    assert!(matches!(err, FolioError::Decode(_)));
}

#[tokio::test]
async fn test_gist_store_writes_without_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/gists/{}", GIST_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": GIST_ID,
            "files": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/gists/{}", GIST_ID)))
        .and(body_partial_json(json!({
            "files": { "actividades.json": { "content": manifest_body(json!([{ "name": "A" }])) } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": GIST_ID, "files": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let store = container(&server).gist_store().unwrap();
    assert!(store.list().await.unwrap().is_empty());
    store
        .append(Project::with_title("name", "A"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_large_file_delete_needs_only_its_sha() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(contents_path("pdfs/big.pdf")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "big.pdf",
            "path": "pdfs/big.pdf",
            "sha": "s1",
            "size": 5_000_000,
            "type": "file",
            "encoding": "none",
            "content": "",
            "download_url": format!("{}/raw/pdfs/big.pdf", server.uri())
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/raw/pdfs/big.pdf"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(contents_path("pdfs/big.pdf")))
        .and(body_partial_json(json!({ "sha": "s1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": null })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(contents_path("pdfs/big.pdf")))
        .and(body_partial_json(json!({ "sha": "s1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_json("pdfs/big.pdf", "s2")))
        .expect(1)
        .mount(&server)
        .await;

    let uploader = container(&server).uploader();
    let uploaded = uploader
        .upload_pdf(&FileContent::from(b"new".to_vec()), "big")
        .await
        .unwrap();
    assert_eq!(uploaded.sha, "s2");

    uploader.delete_file_by_path("pdfs/big.pdf").await.unwrap();
}
