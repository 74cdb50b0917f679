mod common;

use axum_test::TestServer;
use thrones_gallery::routes::{RouterOptions, router};

fn server() -> TestServer {
    let app = router(common::create_gallery_state(), RouterOptions::default());
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_navigate_next_and_prev() {
    let server = server();

    let next = server.get("/api/character/navigate/next/2").await;
    next.assert_status_ok();
    let json = next.json::<serde_json::Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["id"], 3);
    assert_eq!(json["totalCharacters"], 4);

    let prev = server.get("/api/character/navigate/prev/2").await;
    prev.assert_status_ok();
    assert_eq!(prev.json::<serde_json::Value>()["data"]["id"], 1);
}

#[tokio::test]
async fn test_navigate_wraps_around() {
    let server = server();

    let next = server.get("/api/character/navigate/next/4").await;
    assert_eq!(next.json::<serde_json::Value>()["data"]["id"], 1);

    let prev = server.get("/api/character/navigate/prev/1").await;
    assert_eq!(prev.json::<serde_json::Value>()["data"]["id"], 4);
}

#[tokio::test]
async fn test_navigate_unknown_current_id() {
    let server = server();

    let response = server.get("/api/character/navigate/next/42").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Current character not found");
}

#[tokio::test]
async fn test_navigate_invalid_direction() {
    let server = server();

    let response = server.get("/api/character/navigate/sideways/1").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid direction. Use 'next' or 'prev'");
}
