//! HTTP tests for listing, uploads, and flag toggles.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, id_of};

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/entries", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let response = app
        .request("GET", "/api/entries", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let foreign = TestApp::with_config(|c| c.auth.jwt_secret = "other".into()).token("alice");
    let response = app.request("GET", "/api/entries", None, Some(&foreign)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_into_folder_and_list() {
    let app = TestApp::new();
    let token = app.token("alice");
    let folder = app.folder(&token, "Reports").await;

    let response = app
        .upload(&token, Some(folder), Some("alice"), "Q3.pdf", "application/pdf", b"%PDF-1.7")
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["message"], "File uploaded successfully");
    assert_eq!(data["file"]["parentId"], folder.to_string());
    assert_eq!(data["file"]["userId"], "alice");
    assert_eq!(data["file"]["isFolder"], false);
    assert!(!data["file"]["storagePath"].as_str().unwrap_or("").is_empty());
    assert!(!data["file"]["fileUrl"].as_str().unwrap_or("").is_empty());
    assert_eq!(app.blobs.len().await, 1);

    let listing = app
        .request(
            "GET",
            &format!("/api/entries?userId=alice&parentId={folder}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    let items = listing.body["data"].as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Q3.pdf");

    let root = app.request("GET", "/api/entries", None, Some(&token)).await;
    let root_items = root.body["data"].as_array().expect("array");
    assert_eq!(root_items.len(), 1);
    assert_eq!(id_of(&root_items[0]), folder);
}

#[tokio::test]
async fn test_disallowed_type_never_reaches_blob_store() {
    let app = TestApp::new();
    let token = app.token("alice");
    let folder = app.folder(&token, "Stuff").await;

    let response = app
        .upload(&token, Some(folder), None, "setup.exe", "application/x-msdownload", b"MZ")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .upload(&token, Some(folder), None, "setup.exe", "image/png", b"MZ")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .upload(&token, Some(folder), None, "noextension", "image/png", b"x")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "File extension is required");

    assert!(app.blobs.is_empty().await);
    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn test_upload_requires_parent_and_file() {
    let app = TestApp::new();
    let token = app.token("alice");

    let response = app
        .upload(&token, None, None, "a.png", "image/png", b"\x89PNG")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Parent folder is required");

    let response = app
        .upload(
            &token,
            Some(uuid::Uuid::new_v4()),
            None,
            "a.png",
            "image/png",
            b"\x89PNG",
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Parent folder not found");
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn test_root_upload_when_configured() {
    let app = TestApp::with_config(|c| c.upload.require_parent_for_files = false);
    let token = app.token("alice");
    let response = app
        .upload(&token, None, None, "a.jpg", "image/jpeg", b"\xff\xd8")
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["data"]["file"]["parentId"].is_null());
}

#[tokio::test]
async fn test_claimed_identity_must_match_token() {
    let app = TestApp::new();
    let token = app.token("alice");
    let folder = app.folder(&token, "Mine").await;

    let response = app
        .request("GET", "/api/entries?userId=mallory", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .upload(&token, Some(folder), Some("mallory"), "a.pdf", "application/pdf", b"%PDF")
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn test_invalid_parent_id_is_rejected() {
    let app = TestApp::new();
    let token = app.token("alice");
    let response = app
        .request("GET", "/api/entries?parentId=nope", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trash_toggle_reports_verb() {
    let app = TestApp::new();
    let token = app.token("alice");
    let folder = app.folder(&token, "Docs").await;
    let file = app.pdf(&token, folder, "cv.pdf").await;

    let uri = format!("/api/entries/{file}/trash");
    let trashed = app.request("PATCH", &uri, None, Some(&token)).await;
    assert_eq!(trashed.status, StatusCode::OK);
    assert_eq!(trashed.body["data"]["message"], "File successfully trashed");
    assert_eq!(trashed.body["data"]["file"]["isTrashed"], true);

    let restored = app.request("PATCH", &uri, None, Some(&token)).await;
    assert_eq!(restored.body["data"]["message"], "File successfully restored");
    assert_eq!(restored.body["data"]["file"]["isTrashed"], false);
    assert_eq!(restored.body["data"]["file"]["parentId"], folder.to_string());

    let other = app.token("bob");
    let response = app.request("PATCH", &uri, None, Some(&other)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_and_star() {
    let app = TestApp::new();
    let token = app.token("alice");
    let folder = app.folder(&token, "Docs").await;

    let renamed = app
        .request(
            "PATCH",
            &format!("/api/entries/{folder}"),
            Some(json!({ "name": "Papers" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["name"], "Papers");

    let empty = app
        .request(
            "PATCH",
            &format!("/api/entries/{folder}"),
            Some(json!({ "name": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let starred = app
        .request("PATCH", &format!("/api/entries/{folder}/star"), None, Some(&token))
        .await;
    assert_eq!(starred.body["data"]["isStarred"], true);
}

#[tokio::test]
async fn test_nested_folder_under_foreign_parent_is_rejected() {
    let app = TestApp::new();
    let alice = app.token("alice");
    let bob = app.token("bob");
    let folder = app.folder(&alice, "Alice").await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Sneaky", "parentId": folder })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let nested = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Inner", "parentId": folder })),
            Some(&alice),
        )
        .await;
    assert_eq!(nested.status, StatusCode::CREATED);
    assert_eq!(nested.body["data"]["parentId"], folder.to_string());
}

#[tokio::test]
async fn test_malformed_entry_id_is_not_found() {
    let app = TestApp::new();
    let token = app.token("alice");

    for uri in ["/api/entries/not-a-uuid/trash", "/api/entries/not-a-uuid/star"] {
        let response = app.request("PATCH", uri, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.body["error"], "NOT_FOUND");
        assert_eq!(response.body["message"], "File not found");
    }

    let rename = app
        .request(
            "PATCH",
            "/api/entries/42",
            Some(json!({ "name": "x" })),
            Some(&token),
        )
        .await;
    assert_eq!(rename.status, StatusCode::NOT_FOUND);

    let anonymous = app
        .request("PATCH", "/api/entries/not-a-uuid/trash", None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}
