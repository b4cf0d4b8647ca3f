mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;

use common::{app, post_json, TestApp};

#[rstest]
#[tokio::test]
async fn health_is_ok(app: TestApp) {
    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[tokio::test]
async fn unknown_candidate_is_not_found(app: TestApp) {
    let (status, body) = post_json(
        &app.router,
        "/api/v1/recommendations",
        json!({ "user_id": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[rstest]
#[tokio::test]
async fn zero_limit_is_rejected(app: TestApp) {
    let (status, body) = post_json(
        &app.router,
        "/api/v1/recommendations",
        json!({ "user_id": app.candidate_id, "limit": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[rstest]
#[tokio::test]
async fn candidate_without_skills_is_malformed(app: TestApp) {
    let (status, body) = post_json(
        &app.router,
        "/api/v1/recommendations",
        json!({ "user_id": app.incomplete_id }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "MALFORMED_INPUT");
}
