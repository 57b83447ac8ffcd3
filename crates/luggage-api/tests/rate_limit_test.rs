//! Rate limiting integration tests.
//!
//! Run with: `cargo test -p luggage-api --test rate_limit_test`

mod helpers;

use helpers::{
    setup_test_app, setup_test_app_with_config, test_config, StubModel, ESTIMATE_PATH, JPEG_B64,
};
use serde_json::{json, Value};

#[tokio::test]
async fn test_eleventh_request_rejected_without_calling_model() {
    let app = setup_test_app(StubModel::replying("[]"));

    for expected_remaining in (0..10).rev() {
        let response = app
            .server
            .post(ESTIMATE_PATH)
            .json(&json!({ "image": JPEG_B64 }))
            .await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.header("x-ratelimit-limit"), "10");
        assert_eq!(
            response.header("x-ratelimit-remaining"),
            expected_remaining.to_string().as_str()
        );
    }

    let response = app
        .server
        .post(ESTIMATE_PATH)
        .json(&json!({ "image": JPEG_B64 }))
        .await;

    assert_eq!(response.status_code(), 429);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Too many requests. Please slow down."})
    );
    assert_eq!(response.header("x-ratelimit-remaining"), "0");
    let retry_after: u64 = response
        .header("retry-after")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));

    assert_eq!(app.model.calls(), 10);
}

#[tokio::test]
async fn test_rejected_inputs_count_against_limit() {
    let config = test_config(&[("RATE_LIMIT_PER_MINUTE", "2")]);
    let app = setup_test_app_with_config(StubModel::replying("[]"), &config);

    for _ in 0..2 {
        let response = app.server.post(ESTIMATE_PATH).json(&json!({})).await;
        assert_eq!(response.status_code(), 400);
    }

    let response = app
        .server
        .post(ESTIMATE_PATH)
        .json(&json!({ "image": JPEG_B64 }))
        .await;
    assert_eq!(response.status_code(), 429);
    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_health_not_rate_limited() {
    let config = test_config(&[("RATE_LIMIT_PER_MINUTE", "1")]);
    let app = setup_test_app_with_config(StubModel::replying("[]"), &config);

    for _ in 0..5 {
        let response = app.server.get("/health").await;
        assert_eq!(response.status_code(), 200);
    }

    let response = app
        .server
        .post(ESTIMATE_PATH)
        .json(&json!({ "image": JPEG_B64 }))
        .await;
    assert_eq!(response.status_code(), 200);
}
