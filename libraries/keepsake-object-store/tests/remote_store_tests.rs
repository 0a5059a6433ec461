//! Remote object store client tests
//!
//! These tests use a mock server to verify the wire format without a real
//! storage service.

use keepsake_core::{Library, ListOptions};
use keepsake_object_store::{ObjectStoreError, RemoteObjectStore};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "service-key";

fn client(server: &MockServer) -> RemoteObjectStore {
    RemoteObjectStore::new(&server.uri(), KEY).unwrap()
}

#[test]
fn rejects_bad_urls() {
    assert!(matches!(
        RemoteObjectStore::new("", KEY),
        Err(ObjectStoreError::InvalidUrl(_))
    ));
    assert!(matches!(
        RemoteObjectStore::new("ftp://example.com", KEY),
        Err(ObjectStoreError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn list_sends_prefix_and_parses_entries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/list/photos"))
        .and(header("apikey", KEY))
        .and(header("authorization", "Bearer service-key"))
        .and(body_json(json!({
            "prefix": "2024",
            "limit": 100,
            "offset": 0,
            "sortBy": { "column": "name", "order": "asc" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "beach.jpg", "id": "1", "updated_at": "2024-06-01T12:00:00Z", "metadata": { "size": 2048 } },
            { "name": "trip", "id": null, "updated_at": null, "metadata": null }
        ])))
        .mount(&server)
        .await;

    let entries = client(&server)
        .list_entries(Library::Photos, "2024", &ListOptions::default())
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "beach.jpg");
    assert_eq!(entries[0].size, Some(2048));
    assert!(entries[0].updated_at.is_some());
    assert_eq!(entries[1].name, "trip");
    assert_eq!(entries[1].size, None);
}

#[tokio::test]
async fn sign_returns_absolute_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/sign/songs/mix/a.mp3"))
        .and(body_json(json!({ "expiresIn": 86400 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "signedURL": "/object/sign/songs/mix/a.mp3?token=abc"
        })))
        .mount(&server)
        .await;

    let url = client(&server)
        .signed_url(Library::Songs, "mix/a.mp3", Duration::from_secs(86_400))
        .await
        .unwrap();

    assert_eq!(
        url,
        format!("{}/storage/v1/object/sign/songs/mix/a.mp3?token=abc", server.uri())
    );
}

#[tokio::test]
async fn upload_sets_upsert_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/songs/a.mp3"))
        .and(header("x-upsert", "true"))
        .and(header("content-type", "audio/mpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "songs/a.mp3" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .put(Library::Songs, "a.mp3", b"ID3".to_vec(), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn conflict_maps_to_already_exists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/photos/a.jpg"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Duplicate"))
        .mount(&server)
        .await;

    let err = client(&server)
        .put(Library::Photos, "a.jpg", vec![1], false)
        .await
        .unwrap_err();
    assert!(matches!(err, ObjectStoreError::AlreadyExists(_)));
}

#[tokio::test]
async fn remove_sends_prefixes() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/songs"))
        .and(body_json(json!({ "prefixes": ["a.mp3", "mix/b.mp3"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete(
            Library::Songs,
            &["a.mp3".to_string(), "mix/b.mp3".to_string()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn read_missing_object_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage/v1/object/authenticated/diary_media/x.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server)
        .get(Library::DiaryMedia, "x.jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, ObjectStoreError::NotFound(_)));
}

#[tokio::test]
async fn server_errors_carry_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/list/songs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_entries(Library::Songs, "", &ListOptions::default())
        .await
        .unwrap_err();
    match err {
        ObjectStoreError::Remote { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected Remote error, got {other:?}"),
    }
}
