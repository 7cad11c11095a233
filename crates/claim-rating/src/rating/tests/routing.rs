use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::rating::router::{assessment_handler, assessment_router};

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request")
}

#[tokio::test]
async fn combine_route_returns_result() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/ratings/combine",
            json!({
                "ratings": [
                    { "id": "a", "name": "Condition A", "value": 50 },
                    { "id": "b", "name": "Condition B", "value": 30 }
                ]
            }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["combined"], 70);
    assert_eq!(body["exactValue"], 65.0);
}

#[tokio::test]
async fn combine_route_rejects_off_schedule_values() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/ratings/combine",
            json!({ "ratings": [{ "id": "a", "name": "Condition A", "value": 35 }] }),
        ))
        .await
        .expect("router response");

    let body = assert_unprocessable(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("Condition A")));
}

#[tokio::test]
async fn range_route_reports_bounds() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/ratings/range",
            json!({ "conditions": [{ "name": "Migraine", "possibleRatings": [0, 30, 50] }] }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["min"], 30);
    assert_eq!(body["max"], 50);
}

#[tokio::test]
async fn range_route_rejects_off_schedule_tiers() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/ratings/range",
            json!({ "conditions": [{ "name": "Migraine", "possibleRatings": [0, 35] }] }),
        ))
        .await
        .expect("router response");

    let body = assert_unprocessable(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("Migraine")));
}

#[tokio::test]
async fn range_route_clamps_tiers_above_one_hundred() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/ratings/range",
            json!({ "conditions": [{ "possibleRatings": [150] }, { "possibleRatings": [150] }] }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["min"], 100);
    assert_eq!(body["max"], 100);
    assert_eq!(body["maxExact"], 100.0);
}

#[tokio::test]
async fn compensation_route_validates_combined_rating() {
    let router = assessment_router(build_service());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/claims/compensation",
            json!({ "combinedRating": 35 }),
        ))
        .await
        .expect("router response");
    assert_unprocessable(response).await;

    let response = router
        .oneshot(post_json(
            "/api/v1/claims/compensation",
            json!({ "combinedRating": 250 }),
        ))
        .await
        .expect("router response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["combinedRating"], 100);
}

#[tokio::test]
async fn compensation_route_prices_dependents() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/claims/compensation",
            json!({ "combinedRating": 30, "dependents": { "spouse": true } }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["monthly"], 58_631);
}

#[tokio::test]
async fn assessment_handler_returns_full_assessment() {
    let response = assessment_handler(State(build_service()), axum::Json(submission())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["rating"]["combined"], 70);
    assert_eq!(body["tdiu"]["eligibility"], "eligible");
    assert!(body["score"]["total"].is_number());
}

#[tokio::test]
async fn catalog_assessment_route_rejects_unknown_condition() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/claims/catalog-assessment",
            json!({ "selections": [{ "conditionId": "missing", "value": 10 }] }),
        ))
        .await
        .expect("router response");

    let body = assert_unprocessable(response).await;
    assert_eq!(body["error"], "unknown condition 'missing'");
}

#[tokio::test]
async fn catalog_route_lists_conditions() {
    let router = assessment_router(build_service());

    let response = router
        .oneshot(
            Request::get("/api/v1/catalog/conditions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let entries = body.as_array().expect("entry array");
    assert_eq!(entries.len(), 14);
    assert!(entries.iter().any(|entry| entry["id"] == "knee-left"));
}
