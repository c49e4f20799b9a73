use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use clickereen_api::{seed, states::AppState};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app() -> Router {
    let state = AppState::new("test-secret".to_owned());
    seed::seed(&state);
    clickereen_api::app(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn register(app: &Router, username: &str) -> (String, String) {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "pw",
                "displayName": username,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["token"].as_str().unwrap().to_owned(),
        body["user"]["id"].as_str().unwrap().to_owned(),
    )
}

async fn quick_access(app: &Router) -> String {
    let (status, body) = send(app, request("POST", "/api/auth/quick-access", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_owned()
}

async fn create_post(app: &Router, token: &str, content: &str) -> Value {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/posts",
            Some(token),
            Some(json!({ "content": content })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["post"].clone()
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let app = test_app();

    let (_, alice_id) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "pw" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], alice_id.as_str());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = test_app();
    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "pw",
                "displayName": "Alice Again",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn register_with_missing_fields_is_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "alice" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app();

    let (status, _) = send(&app, request("GET", "/api/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request("POST", "/api/posts", None, Some(json!({ "content": "hi" }))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, request("GET", "/api/auth/me", Some("garbage"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn follow_updates_counts_and_rejects_self_follow() {
    let app = test_app();
    let (alice_token, alice_id) = register(&app, "alice").await;
    let (_, bob_id) = register(&app, "bob").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/auth/follow/{bob_id}"),
            Some(&alice_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["followingCount"], 1);
    assert_eq!(body["followersCount"], 1);

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/auth/follow/{alice_id}"),
            Some(&alice_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid action");

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/auth/follow/{bob_id}"),
            Some(&alice_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Already following");

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/auth/unfollow/{bob_id}"),
            Some(&alice_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["followingCount"], 0);
    assert_eq!(body["followersCount"], 0);
}

#[tokio::test]
async fn created_post_extracts_hashtags_and_mentions() {
    let app = test_app();
    let (token, _) = register(&app, "alice").await;

    let post = create_post(&app, &token, "hello #world @bob").await;
    assert_eq!(post["hashtags"], json!(["world"]));
    assert_eq!(post["mentions"], json!(["bob"]));
    assert_eq!(post["likes"], 0);
    assert_eq!(post["author"]["username"], "alice");
}

#[tokio::test]
async fn blank_post_content_is_rejected() {
    let app = test_app();
    let (token, _) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/posts",
            Some(&token),
            Some(json!({ "content": "   " })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid content");
}

#[tokio::test]
async fn like_toggle_round_trips() {
    let app = test_app();
    let (token, _) = register(&app, "alice").await;
    let post = create_post(&app, &token, "toggle me").await;
    let post_id = post["id"].as_str().unwrap();

    let uri = format!("/api/posts/{post_id}/like");

    let (status, body) = send(&app, request("POST", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isLiked"], true);
    assert_eq!(body["totalLikes"], 1);

    let (status, body) = send(&app, request("POST", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isLiked"], false);
    assert_eq!(body["totalLikes"], 0);
}

#[tokio::test]
async fn interaction_flags_are_per_viewer() {
    let app = test_app();
    let (alice_token, _) = register(&app, "alice").await;
    let (bob_token, _) = register(&app, "bob").await;
    let post = create_post(&app, &alice_token, "flag scope").await;
    let post_id = post["id"].as_str().unwrap();

    send(
        &app,
        request(
            "POST",
            &format!("/api/posts/{post_id}/like"),
            Some(&alice_token),
            None,
        ),
    )
    .await;

    let uri = format!("/api/posts/{post_id}");
    let (_, as_alice) = send(&app, request("GET", &uri, Some(&alice_token), None)).await;
    let (_, as_bob) = send(&app, request("GET", &uri, Some(&bob_token), None)).await;
    let (_, anonymous) = send(&app, request("GET", &uri, None, None)).await;

    assert_eq!(as_alice["isLiked"], true);
    assert_eq!(as_bob["isLiked"], false);
    assert_eq!(anonymous["isLiked"], false);
    assert_eq!(as_bob["likes"], 1);
}

#[tokio::test]
async fn only_the_author_may_delete_a_post() {
    let app = test_app();
    let (alice_token, _) = register(&app, "alice").await;
    let (bob_token, _) = register(&app, "bob").await;
    let post = create_post(&app, &alice_token, "mine").await;
    let post_id = post["id"].as_str().unwrap();
    let uri = format!("/api/posts/{post_id}");

    let (status, body) = send(&app, request("DELETE", &uri, Some(&bob_token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, _) = send(&app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("DELETE", &uri, Some(&alice_token), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_list_is_paginated_and_sortable() {
    let app = test_app();

    let (status, body) = send(&app, request("GET", "/api/posts?page=1&limit=2", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["hasNext"], true);
    assert_eq!(body["pagination"]["hasPrev"], false);

    // The seeded photoshoot post carries the highest engagement.
    let (status, body) = send(&app, request("GET", "/api/posts?sort=popular", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"][0]["likes"], 156);

    // Absurd page numbers must still answer with an empty page, not a panic.
    let uri = format!("/api/posts?page={}&limit=10", usize::MAX);
    let (status, body) = send(&app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["posts"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["hasNext"], false);

    let (_, newest) = send(&app, request("GET", "/api/posts?sort=newest", None, None)).await;
    let (_, oldest) = send(&app, request("GET", "/api/posts?sort=oldest", None, None)).await;
    assert_eq!(
        newest["posts"][0]["id"],
        oldest["posts"][oldest["posts"].as_array().unwrap().len() - 1]["id"]
    );
}

#[tokio::test]
async fn search_matches_hashtags_case_insensitively() {
    let app = test_app();

    let (status, body) = send(
        &app,
        request("GET", "/api/posts/search/PHOTOGRAPHY", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["posts"].as_array().unwrap().is_empty());
    assert_eq!(body["query"], "photography");

    let (status, body) = send(&app, request("GET", "/api/posts/search/%20", None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid query");
}

#[tokio::test]
async fn notification_flow_for_the_seeded_demo_user() {
    let app = test_app();
    let token = quick_access(&app).await;

    let (status, body) = send(
        &app,
        request("GET", "/api/notifications/unread-count", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unreadCount"], 3);

    let (status, body) = send(
        &app,
        request(
            "GET",
            "/api/notifications?unreadOnly=true",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notifications"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        &app,
        request("PUT", "/api/notifications/mark-all-read", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedCount"], 3);

    let (_, body) = send(
        &app,
        request("GET", "/api/notifications/unread-count", Some(&token), None),
    )
    .await;
    assert_eq!(body["unreadCount"], 0);
}

#[tokio::test]
async fn notifications_are_scoped_to_their_recipient() {
    let app = test_app();
    let demo_token = quick_access(&app).await;
    let (alice_token, _) = register(&app, "alice").await;

    let (_, body) = send(
        &app,
        request("GET", "/api/notifications", Some(&demo_token), None),
    )
    .await;
    let id = body["notifications"][0]["id"].as_str().unwrap().to_owned();

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            Some(&alice_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            Some(&demo_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"]["read"], true);
}

#[tokio::test]
async fn following_someone_notifies_them() {
    let app = test_app();
    let (alice_token, _) = register(&app, "alice").await;
    let (bob_token, bob_id) = register(&app, "bob").await;

    send(
        &app,
        request(
            "POST",
            &format!("/api/auth/follow/{bob_id}"),
            Some(&alice_token),
            None,
        ),
    )
    .await;

    let (_, body) = send(
        &app,
        request("GET", "/api/notifications", Some(&bob_token), None),
    )
    .await;
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "follow");
    assert_eq!(notifications[0]["fromUser"]["username"], "alice");
}

#[tokio::test]
async fn livestream_lifecycle() {
    let app = test_app();
    let (owner_token, _) = register(&app, "streamer").await;
    let (other_token, _) = register(&app, "viewer").await;

    let scheduled_at = (chrono::Utc::now() + chrono::Duration::hours(1)).to_rfc3339();
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/livestreams",
            Some(&owner_token),
            Some(json!({
                "title": "Test stream",
                "description": "Testing the lifecycle",
                "scheduledAt": scheduled_at,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["livestream"]["status"], "scheduled");
    assert!(body["livestream"]["streamUrl"].is_null());
    let id = body["livestream"]["id"].as_str().unwrap().to_owned();

    // Not live yet, so nobody can join.
    let (status, body) = send(
        &app,
        request("POST", &format!("/api/livestreams/{id}/join"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Livestream not live");

    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/api/livestreams/{id}/start"),
            Some(&other_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/livestreams/{id}/start"),
            Some(&owner_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["livestream"]["status"], "live");
    assert!(body["livestream"]["streamUrl"].is_string());
    assert!(body["livestream"]["startedAt"].is_string());

    let (_, body) = send(
        &app,
        request("POST", &format!("/api/livestreams/{id}/join"), None, None),
    )
    .await;
    assert_eq!(body["viewers"], 1);

    // Leaving more often than joining still floors at zero.
    for _ in 0..3 {
        let (status, _) = send(
            &app,
            request("POST", &format!("/api/livestreams/{id}/leave"), None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, body) = send(
        &app,
        request("GET", &format!("/api/livestreams/{id}"), None, None),
    )
    .await;
    assert_eq!(body["viewers"], 0);

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/livestreams/{id}/end"),
            Some(&owner_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["livestream"]["status"], "ended");

    let (status, _) = send(
        &app,
        request("POST", &format!("/api/livestreams/{id}/join"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/api/livestreams/{id}/start"),
            Some(&owner_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn live_streams_sort_first_in_listings() {
    let app = test_app();

    let (status, body) = send(&app, request("GET", "/api/livestreams", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let streams = body["livestreams"].as_array().unwrap();
    assert_eq!(streams[0]["status"], "live");

    let (_, body) = send(&app, request("GET", "/api/livestreams/live", None, None)).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn analytics_counters_are_additive() {
    let app = test_app();
    let token = quick_access(&app).await;

    let (status, body) = send(
        &app,
        request("GET", "/api/analytics/overview", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overview"]["totalLikes"], 1250);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/analytics/update",
            Some(&token),
            Some(json!({ "action": "post_liked" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        request("GET", "/api/analytics/overview", Some(&token), None),
    )
    .await;
    assert_eq!(body["overview"]["totalLikes"], 1251);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/analytics/update",
            Some(&token),
            Some(json!({ "action": "account_deleted" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analytics_aggregates_appear_on_first_update() {
    let app = test_app();
    let (token, _) = register(&app, "alice").await;

    let (status, _) = send(
        &app,
        request("GET", "/api/analytics/overview", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        request(
            "POST",
            "/api/analytics/update",
            Some(&token),
            Some(json!({ "action": "post_created" })),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request("GET", "/api/analytics/overview", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overview"]["totalPosts"], 1);
}

fn multipart_request(
    uri: &str,
    token: &str,
    files: &[(&str, &str, &str)],
) -> Request<Body> {
    let boundary = "clickereen-test-boundary";
    let mut body = String::new();
    for (filename, mime, contents) in files {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"media\"; \
             filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n{contents}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn media_upload_records_metadata() {
    let app = test_app();
    let (token, _) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        multipart_request(
            "/api/media/upload",
            &token,
            &[("pic.png", "image/png", "not-really-a-png")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["media"]["type"], "image");
    assert_eq!(body["media"]["originalName"], "pic.png");
    assert!(body["media"]["url"].as_str().unwrap().ends_with(".png"));

    let id = body["media"]["id"].as_str().unwrap().to_owned();
    let (status, body) = send(
        &app,
        request("GET", &format!("/api/media/{id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mimeType"], "image/png");
}

#[tokio::test]
async fn media_upload_rejects_unsupported_types() {
    let app = test_app();
    let (token, _) = register(&app, "alice").await;

    let (status, _) = send(
        &app,
        multipart_request(
            "/api/media/upload",
            &token,
            &[("doc.pdf", "application/pdf", "pdf-bytes")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn multi_upload_is_all_or_nothing() {
    let app = test_app();
    let (token, _) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        multipart_request(
            "/api/media/upload-multiple",
            &token,
            &[
                ("a.png", "image/png", "a"),
                ("b.mp4", "video/mp4", "b"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["count"], 2);

    // One bad file fails the whole batch; nothing from it is retrievable.
    let (status, body) = send(
        &app,
        multipart_request(
            "/api/media/upload-multiple",
            &token,
            &[
                ("c.png", "image/png", "c"),
                ("evil.exe", "application/octet-stream", "boom"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("image and video"));
}

#[tokio::test]
async fn profile_update_ignores_immutable_fields() {
    let app = test_app();
    let (token, id) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/api/auth/profile",
            Some(&token),
            Some(json!({
                "bio": "new bio",
                "location": "Berlin",
                "id": "11111111-1111-1111-1111-111111111111",
                "email": "hijack@example.com",
                "followersCount": 9000,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["bio"], "new bio");
    assert_eq!(body["user"]["location"], "Berlin");
    assert_eq!(body["user"]["id"], id.as_str());
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["followersCount"], 0);
}

#[tokio::test]
async fn health_and_status_endpoints_respond() {
    let app = test_app();

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (status, body) = send(&app, request("GET", "/api/status", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["features"].as_array().unwrap().len() > 3);
}
