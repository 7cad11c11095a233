use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::CatalogEntry;
use super::domain::Dependents;
use super::intake::{
    CatalogClaimSubmission, ClaimSubmission, ConditionSelection, RangeSelection,
};
use super::service::{ClaimRatingService, ClaimServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CombineRequest {
    pub(crate) ratings: Vec<ConditionSelection>,
    #[serde(default = "include_bilateral_default")]
    pub(crate) include_bilateral: bool,
}

fn include_bilateral_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct RangeRequest {
    pub(crate) conditions: Vec<RangeSelection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompensationRequest {
    pub(crate) combined_rating: i32,
    #[serde(default)]
    pub(crate) dependents: Dependents,
}

/// Router builder exposing the rating engine over JSON.
pub fn assessment_router(service: Arc<ClaimRatingService>) -> Router {
    Router::new()
        .route("/api/v1/ratings/combine", post(combine_handler))
        .route("/api/v1/ratings/range", post(range_handler))
        .route("/api/v1/claims/compensation", post(compensation_handler))
        .route("/api/v1/claims/assessment", post(assessment_handler))
        .route(
            "/api/v1/claims/catalog-assessment",
            post(catalog_assessment_handler),
        )
        .route("/api/v1/catalog/conditions", get(catalog_handler))
        .with_state(service)
}

fn error_response(error: ClaimServiceError) -> Response {
    let status = match error {
        ClaimServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn combine_handler(
    State(service): State<Arc<ClaimRatingService>>,
    Json(request): Json<CombineRequest>,
) -> Response {
    match service.combine(request.ratings, request.include_bilateral) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn range_handler(
    State(service): State<Arc<ClaimRatingService>>,
    Json(request): Json<RangeRequest>,
) -> Response {
    match service.estimate_range(request.conditions) {
        Ok(range) => (StatusCode::OK, Json(range)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compensation_handler(
    State(service): State<Arc<ClaimRatingService>>,
    Json(request): Json<CompensationRequest>,
) -> Response {
    match service.compensate(request.combined_rating, &request.dependents) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assessment_handler(
    State(service): State<Arc<ClaimRatingService>>,
    Json(submission): Json<ClaimSubmission>,
) -> Response {
    match service.assess(submission) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_assessment_handler(
    State(service): State<Arc<ClaimRatingService>>,
    Json(submission): Json<CatalogClaimSubmission>,
) -> Response {
    match service.assess_catalog(&submission) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_handler(State(service): State<Arc<ClaimRatingService>>) -> Response {
    let entries: Vec<CatalogEntry> = service.catalog().entries().cloned().collect();
    (StatusCode::OK, Json(entries)).into_response()
}
