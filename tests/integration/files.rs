//! Tests for `folio files`

use super::common::*;
use assert_cmd::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_pdfs_lists_only_pdf_files() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(contents_path("pdfs")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "cv.pdf", "path": "pdfs/cv.pdf", "sha": "a", "size": 120, "type": "file",
              "download_url": "https://raw.example/pdfs/cv.pdf" },
            { "name": "notes.txt", "path": "pdfs/notes.txt", "sha": "b", "size": 3, "type": "file" },
            { "name": "old", "path": "pdfs/old", "sha": "c", "size": 0, "type": "dir" }
        ])))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["files", "pdfs"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("pdfs/cv.pdf (120 bytes)")
                .and(predicate::str::contains("notes.txt").not())
                .and(predicate::str::contains("pdfs/old").not()),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pdfs_without_folder() {
    let server = MockServer::start().await;
    mount_missing(&server, "pdfs").await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["files", "pdfs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No PDF files."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_missing_file_is_not_found() {
    let server = MockServer::start().await;
    mount_missing(&server, "pdfs/gone.pdf").await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["files", "delete", "pdfs/gone.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[not_found]"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_sends_current_sha() {
    let server = MockServer::start().await;
    mount_file(&server, "pdfs/cv.pdf", "s1", b"pdf").await;
    Mock::given(method("DELETE"))
        .and(path(contents_path("pdfs/cv.pdf")))
        .and(wiremock::matchers::body_json(json!({
            "message": "Delete pdfs/cv.pdf",
            "sha": "s1",
            "branch": "main"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": null })))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, &server);

    folio_with_config(&config)
        .args(["files", "delete", "pdfs/cv.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted pdfs/cv.pdf"));
}
