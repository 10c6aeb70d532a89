// src/tests/bluesky_tests.rs
use crate::bluesky::BlueskyPoster;
use crate::config::BlueskyConfig;
use crate::errors::NotifyError;
use crate::notify::{Notification, Notifier};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

fn poster(server: &Server, handle: Option<&str>, password: Option<&str>) -> BlueskyPoster {
    let cfg = BlueskyConfig {
        service: server.url(),
        handle: handle.map(str::to_string),
        password: password.map(str::to_string),
    };
    BlueskyPoster::new(cfg, Duration::from_secs(5)).unwrap()
}

fn notification() -> Notification {
    Notification {
        subject: "Nintendo Museum Tickets ALERT".to_string(),
        body: "long report".to_string(),
        short_text: "🎟️ Nintendo Museum tickets on sale for 1 day(s): 2026-02-03".to_string(),
    }
}

#[test]
fn session_then_record_with_bearer_token() {
    let mut server = Server::new();

    let session = server
        .mock("POST", "/xrpc/com.atproto.server.createSession")
        .match_body(Matcher::Json(json!({
            "identifier": "watcher.bsky.social",
            "password": "app-password"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "accessJwt": "jwt-123",
                "refreshJwt": "refresh",
                "handle": "watcher.bsky.social",
                "did": "did:plc:watcher"
            })
            .to_string(),
        )
        .create();

    let record = server
        .mock("POST", "/xrpc/com.atproto.repo.createRecord")
        .match_header("authorization", "Bearer jwt-123")
        .match_body(Matcher::PartialJson(json!({
            "repo": "did:plc:watcher",
            "collection": "app.bsky.feed.post",
            "record": {
                "$type": "app.bsky.feed.post",
                "text": "🎟️ Nintendo Museum tickets on sale for 1 day(s): 2026-02-03"
            }
        })))
        .with_status(200)
        .with_body(
            json!({
                "uri": "at://did:plc:watcher/app.bsky.feed.post/3k",
                "cid": "bafy"
            })
            .to_string(),
        )
        .create();

    poster(&server, Some("watcher.bsky.social"), Some("app-password"))
        .send(&notification())
        .unwrap();

    session.assert();
    record.assert();
}

#[test]
fn rejected_login_stops_before_posting() {
    let mut server = Server::new();

    server
        .mock("POST", "/xrpc/com.atproto.server.createSession")
        .with_status(401)
        .with_body(r#"{"error":"AuthenticationRequired","message":"Invalid identifier or password"}"#)
        .create();
    let record = server
        .mock("POST", "/xrpc/com.atproto.repo.createRecord")
        .expect(0)
        .create();

    let err = poster(&server, Some("watcher.bsky.social"), Some("wrong"))
        .send(&notification())
        .unwrap_err();

    record.assert();
    match err {
        NotifyError::ApiError(msg) => {
            assert!(msg.contains("createSession"));
            assert!(msg.contains("401"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[test]
fn missing_credentials_make_no_requests() {
    let mut server = Server::new();
    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let err = poster(&server, Some("watcher.bsky.social"), None)
        .send(&notification())
        .unwrap_err();

    any.assert();
    assert!(matches!(err, NotifyError::MissingCredential(_)));
}

#[test]
fn preview_shows_short_text() {
    let server = Server::new();
    let p = poster(&server, Some("watcher.bsky.social"), None);

    assert!(p.preview(&notification()).starts_with("Post:\n🎟️"));
    assert!(p.describe().contains("watcher.bsky.social"));
}
