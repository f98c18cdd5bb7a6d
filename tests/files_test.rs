//! File API integration tests
//!
//! Upload (auth-gated, size-capped), listing and two-phase deletion,
//! including the cases where the record and the blob disagree.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::TestApp;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

#[tokio::test]
async fn test_upload_requires_auth() {
    let app = TestApp::spawn().await;

    let (status, _) = app.upload("notes.txt", b"hello", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_and_list() {
    let app = TestApp::spawn().await;
    let token = app.signed_in_user("up@example.com", "password123").await;

    let (status, body) = app.upload("notes.txt", b"hello world", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filename"], "notes.txt");
    assert!(body["id"].as_str().is_some());

    // The blob landed on disk.
    let path = body["path"].as_str().unwrap();
    assert_eq!(tokio::fs::read(path).await.unwrap(), b"hello world");

    // Listing is public.
    let (status, body) = app.request("GET", "/api/files", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let files = body.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], "notes.txt");
}

#[tokio::test]
async fn test_duplicate_filename_conflicts_and_cleans_up() {
    let app = TestApp::spawn().await;
    let token = app.signed_in_user("dup@example.com", "password123").await;

    let (status, first) = app.upload("report.pdf", b"version one", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.upload("report.pdf", b"version two", Some(&token)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A file with that name already exists");

    // The losing upload's blob was removed; only the first one remains.
    let storage_root = std::path::Path::new(first["path"].as_str().unwrap())
        .parent()
        .unwrap()
        .to_path_buf();
    let mut entries = tokio::fs::read_dir(&storage_root).await.unwrap();
    let mut count = 0;
    while entries.next_entry().await.unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 1);

    // The surviving record still serves the original content.
    assert_eq!(
        tokio::fs::read(first["path"].as_str().unwrap()).await.unwrap(),
        b"version one"
    );
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::spawn().await;
    let token = app.signed_in_user("nofield@example.com", "password123").await;

    let boundary = "xfgate-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"comment\"\r\n\r\n\
         not a file\r\n\
         --{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/files/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "No file field in upload");
}

#[tokio::test]
async fn test_upload_exceeding_limit() {
    let app = TestApp::spawn_with_limit(1024).await;
    let token = app.signed_in_user("big@example.com", "password123").await;

    let oversized = vec![0u8; 4096];
    let (status, _) = app.upload("huge.bin", &oversized, Some(&token)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // Nothing was registered.
    let (_, body) = app.request("GET", "/api/files", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_sorted_by_filename() {
    let app = TestApp::spawn().await;
    let token = app.signed_in_user("sort@example.com", "password123").await;

    app.upload("zebra.txt", b"z", Some(&token)).await;
    app.upload("alpha.txt", b"a", Some(&token)).await;
    app.upload("mango.txt", b"m", Some(&token)).await;

    let (_, body) = app.request("GET", "/api/files", None, None).await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha.txt", "mango.txt", "zebra.txt"]);
}

#[tokio::test]
async fn test_delete_removes_record_and_blob() {
    let app = TestApp::spawn().await;
    let token = app.signed_in_user("del@example.com", "password123").await;

    let (_, uploaded) = app.upload("doomed.txt", b"bye", Some(&token)).await;
    let id = uploaded["id"].as_str().unwrap().to_string();
    let path = uploaded["path"].as_str().unwrap().to_string();

    // Deletion is public.
    let (status, body) = app
        .request("DELETE", &format!("/api/files/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_id"], id);
    assert_eq!(body["record_deleted"], true);
    assert_eq!(body["physical_file_deleted"], true);

    assert!(tokio::fs::metadata(&path).await.is_err());

    let (_, body) = app.request("GET", "/api/files", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // A second delete finds nothing.
    let (status, _) = app
        .request("DELETE", &format!("/api/files/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_with_missing_blob_still_deletes_record() {
    let app = TestApp::spawn().await;
    let token = app.signed_in_user("orphan@example.com", "password123").await;

    let (_, uploaded) = app.upload("orphan.txt", b"data", Some(&token)).await;
    let id = uploaded["id"].as_str().unwrap().to_string();
    let path = uploaded["path"].as_str().unwrap().to_string();

    // Simulate a blob lost out-of-band.
    tokio::fs::remove_file(&path).await.unwrap();

    let (status, body) = app
        .request("DELETE", &format!("/api/files/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_deleted"], true);
    assert_eq!(body["physical_file_deleted"], false);

    let (_, body) = app.request("GET", "/api/files", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_unknown_id() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/files/{}", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
