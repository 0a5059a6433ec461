/// Gallery library, signed object and favorites tests over the full router
mod common;

use axum::http::{header, StatusCode};
use common::{
    body_bytes, body_json, bytes_request, empty_request, fixtures, json_request, TestApp,
};
use serde_json::json;

async fn upload(app: &TestApp, cookie: &str, uri: &str, bytes: &[u8]) -> String {
    let response = app
        .send(bytes_request("PUT", uri, Some(cookie), "application/octet-stream", bytes))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED, "{uri}");
    body_json(response).await["path"].as_str().unwrap().to_string()
}

/// Path and query of a signed URL, relative to the public base
fn local_uri(url: &str) -> String {
    url.strip_prefix(fixtures::PUBLIC_URL).unwrap().to_string()
}

#[tokio::test]
async fn test_folders_and_listing() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/libraries/photos/folders",
            Some(&cookie),
            &json!({ "name": "trip" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    upload(&app, &cookie, "/api/libraries/photos/upload?folder=trip&name=b.jpg", b"b").await;
    upload(&app, &cookie, "/api/libraries/photos/upload?folder=trip&name=a.mov", b"a").await;
    let root = upload(&app, &cookie, "/api/libraries/photos/upload?folder=All&name=c.png", b"c").await;
    assert_eq!(root, "c.png");

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/folders", Some(&cookie)))
        .await;
    assert_eq!(body_json(response).await, json!(["All", "trip"]));

    // Default folder is All: folder contents first, then root files
    let response = app
        .send(empty_request("GET", "/api/libraries/photos/media", Some(&cookie)))
        .await;
    let items = body_json(response).await;
    let paths: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["trip/a.mov", "trip/b.jpg", "c.png"]);
    assert_eq!(items[0]["kind"], "video");
    assert_eq!(items[1]["kind"], "image");

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/media?folder=trip", Some(&cookie)))
        .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/media?folder=", Some(&cookie)))
        .await;
    let items = body_json(response).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["name"], "c.png");
}

#[tokio::test]
async fn test_signed_urls_serve_objects() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    upload(&app, &cookie, "/api/libraries/photos/upload?folder=trip&name=a.png", b"pixels").await;
    upload(&app, &cookie, "/api/libraries/photos/upload?folder=trip&name=b.png", b"other").await;

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/media?folder=trip", Some(&cookie)))
        .await;
    let items = body_json(response).await;
    let url_a = items[0]["url"].as_str().unwrap().to_string();
    let url_b = items[1]["url"].as_str().unwrap().to_string();
    assert!(url_a.starts_with("http://keepsake.test/api/objects/photos/trip/a.png?token="));

    // Signed URLs work without a session cookie
    let response = app.send(empty_request("GET", &local_uri(&url_a), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(body_bytes(response).await, b"pixels");

    // A token only opens the object it was issued for
    let token_b = url_b.split("token=").nth(1).unwrap();
    let response = app
        .send(empty_request(
            "GET",
            &format!("/api/objects/photos/trip/a.png?token={token_b}"),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(empty_request("GET", &format!("{}x", local_uri(&url_a)), None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(empty_request("GET", "/api/objects/photos/trip/a.png", None))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorites_toggle_and_listing() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let mut events = app.state.player.subscribe();

    upload(&app, &cookie, "/api/libraries/photos/upload?folder=trip&name=a.jpg", b"a").await;
    upload(&app, &cookie, "/api/libraries/photos/upload?folder=trip&name=b.jpg", b"b").await;

    let toggle = |path: &str| {
        json_request(
            "POST",
            "/api/libraries/photos/favorites/toggle",
            Some(&cookie),
            &json!({ "path": path, "name": "b.jpg" }),
        )
    };

    let response = app.send(toggle("trip/b.jpg")).await;
    assert_eq!(body_json(response).await, json!({ "favorite": true }));

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/favorites", Some(&cookie)))
        .await;
    let favorites = body_json(response).await;
    assert_eq!(favorites.as_array().unwrap().len(), 1);
    assert_eq!(favorites[0]["path"], "trip/b.jpg");

    let response = app
        .send(empty_request(
            "GET",
            "/api/libraries/photos/media?folder=favorites",
            Some(&cookie),
        ))
        .await;
    let items = body_json(response).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["path"], "trip/b.jpg");

    let response = app.send(toggle("trip/b.jpg")).await;
    assert_eq!(body_json(response).await, json!({ "favorite": false }));

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/favorites", Some(&cookie)))
        .await;
    assert_eq!(body_json(response).await, json!([]));

    let event = events.try_recv().unwrap();
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({
            "kind": "favorites_changed",
            "data": { "library": "photos", "path": "trip/b.jpg", "favorite": true }
        })
    );
}

#[tokio::test]
async fn test_delete_removes_object_and_favorite() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    upload(&app, &cookie, "/api/libraries/photos/upload?folder=trip&name=a.jpg", b"a").await;
    app.send(json_request(
        "POST",
        "/api/libraries/photos/favorites/toggle",
        Some(&cookie),
        &json!({ "path": "trip/a.jpg" }),
    ))
    .await;

    let response = app
        .send(empty_request(
            "DELETE",
            "/api/libraries/photos/objects/trip/a.jpg",
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/media?folder=trip", Some(&cookie)))
        .await;
    assert_eq!(body_json(response).await, json!([]));

    let response = app
        .send(empty_request("GET", "/api/libraries/photos/favorites", Some(&cookie)))
        .await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_bad_library_requests() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let response = app
        .send(empty_request("GET", "/api/libraries/videos/folders", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(bytes_request(
            "PUT",
            "/api/libraries/photos/upload?name=a.jpg",
            Some(&cookie),
            "image/jpeg",
            b"",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(bytes_request(
            "PUT",
            "/api/libraries/photos/upload?name=../escape.jpg",
            Some(&cookie),
            "image/jpeg",
            b"x",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(json_request(
            "POST",
            "/api/libraries/photos/folders",
            Some(&cookie),
            &json!({ "name": "has.dot" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
