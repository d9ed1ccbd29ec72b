//! End-to-end tests: the real router wired to a `GithubClient` pointed at a
//! wiremock stand-in for the GitHub commits API.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gh_contributors::github::{GithubClient, USER_AGENT};
use gh_contributors::resolver::SharedResolver;
use gh_contributors::routes;

const CONTRIBUTORS_URI: &str = "/api/v1/testOwner/testRepo/contributors";

fn app(api_url: &str) -> Router {
    let resolver: SharedResolver = Arc::new(GithubClient::new(api_url, None).unwrap());
    routes::create_router(resolver)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn mock_commits(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/repos/testOwner/testRepo/commits"))
        .and(query_param("per_page", "100"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn returns_distinct_contributors_for_a_repository() {
    let server = MockServer::start().await;
    let body = json!([
        { "sha": "7fd1a60b", "author": { "login": "user1" }, "committer": { "login": "committer1" } },
        { "sha": "76294131", "author": { "login": "user2" }, "committer": { "login": "committer2" } },
        { "sha": "553c2077", "author": { "login": "user3" }, "committer": { "login": "committer3" } },
    ]);
    mock_commits(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let (status, body) = get(app(&server.uri()), CONTRIBUTORS_URI).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!(["user1", "committer1", "user2", "committer2", "user3", "committer3"])
    );
}

#[tokio::test]
async fn shared_author_and_committer_appear_once() {
    let server = MockServer::start().await;
    let body = json!([
        { "author": { "login": "user1" }, "committer": { "login": "user1" } },
        { "author": { "login": "user1" }, "committer": { "login": "user2" } },
    ]);
    mock_commits(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let (status, body) = get(app(&server.uri()), CONTRIBUTORS_URI).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["user1", "user2"]));
}

#[tokio::test]
async fn unknown_repository_yields_404_with_error_body() {
    let server = MockServer::start().await;
    mock_commits(&server, ResponseTemplate::new(404)).await;

    let (status, body) = get(app(&server.uri()), CONTRIBUTORS_URI).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Repository 'testOwner/testRepo' not found" }));
}

#[tokio::test]
async fn upstream_server_error_yields_404_with_error_body() {
    let server = MockServer::start().await;
    mock_commits(&server, ResponseTemplate::new(500)).await;

    let (status, body) = get(app(&server.uri()), CONTRIBUTORS_URI).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "error": "Error fetching contributors: Internal Server Error" })
    );
}

#[tokio::test]
async fn repository_without_commits_yields_404_with_error_body() {
    let server = MockServer::start().await;
    mock_commits(&server, ResponseTemplate::new(200).set_body_raw("[]", "application/json")).await;

    let (status, body) = get(app(&server.uri()), CONTRIBUTORS_URI).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No commits found" }));
}

#[tokio::test]
async fn malformed_payload_yields_404_with_error_body() {
    let server = MockServer::start().await;
    mock_commits(&server, ResponseTemplate::new(200).set_body_raw("{}", "application/json")).await;

    let (status, body) = get(app(&server.uri()), CONTRIBUTORS_URI).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Error deserialising response: "), "got: {message}");
}

#[tokio::test]
async fn unreachable_upstream_yields_404_through_the_error_boundary() {
    // Nothing listens here; the transport fault escapes the resolver and is
    // mapped by the boundary, so the body carries `message` rather than
    // `error`.
    let (status, body) = get(app("http://127.0.0.1:1"), CONTRIBUTORS_URI).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("message").is_some());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn unmatched_paths_fall_through_to_404() {
    let server = MockServer::start().await;

    let (status, body) = get(app(&server.uri()), "/api/v1/testOwner").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not found: /api/v1/testOwner" }));
}

#[tokio::test]
async fn identical_requests_yield_identical_outcomes() {
    let server = MockServer::start().await;
    let body = json!([
        { "author": { "login": "user1" }, "committer": { "login": "user2" } },
    ]);
    mock_commits(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let app = app(&server.uri());
    let first = get(app.clone(), CONTRIBUTORS_URI).await;
    let second = get(app, CONTRIBUTORS_URI).await;

    assert_eq!(first, second);
}
