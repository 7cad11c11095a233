use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::rating::catalog::ConditionCatalog;
use crate::rating::domain::{ConditionId, Dependents, LimbType, RatingInput, Side, TriggerTag};
use crate::rating::engine::RatingEngine;
use crate::rating::intake::{
    CatalogClaimSubmission, CatalogSelection, ClaimSubmission, ConditionSelection, IntakeGuard,
    TierNormalization, TierPolicy,
};
use crate::rating::rates::RateTable;
use crate::rating::service::ClaimRatingService;

pub(super) fn rating(name: &str, value: u8) -> RatingInput {
    RatingInput::new(name.to_ascii_lowercase().replace(' ', "-"), name, value)
}

pub(super) fn ratings(values: &[u8]) -> Vec<RatingInput> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| rating(&format!("Condition {index}"), *value))
        .collect()
}

pub(super) fn knee(side: Side, value: u8) -> RatingInput {
    rating(&format!("{} knee", side.label()), value).paired(LimbType::Knee, side)
}

pub(super) fn amputation(side: Side, value: u8) -> RatingInput {
    rating(&format!("Amputation, {} leg", side.label()), value)
        .paired(LimbType::Leg, side)
        .with_triggers([TriggerTag::Amputation])
}

pub(super) fn tbi(value: u8) -> RatingInput {
    rating("Traumatic brain injury residuals", value)
        .with_triggers([TriggerTag::TraumaticBrainInjury])
}

pub(super) fn rates() -> RateTable {
    RateTable::standard()
}

pub(super) fn selection(id: &str, name: &str, value: i32) -> ConditionSelection {
    ConditionSelection {
        id: ConditionId::new(id),
        name: name.to_string(),
        value,
        is_bilateral: false,
        side: None,
        limb_type: None,
        triggers: Vec::new(),
    }
}

pub(super) fn submission() -> ClaimSubmission {
    ClaimSubmission {
        conditions: vec![
            selection("ptsd", "Post-traumatic stress disorder", 50),
            selection("migraine", "Migraine headaches", 30),
        ],
        dependents: Dependents {
            spouse: true,
            children: 1,
            parents: 0,
        },
        evidence_score: 80,
    }
}

pub(super) fn catalog_submission() -> CatalogClaimSubmission {
    CatalogClaimSubmission {
        selections: vec![
            catalog_selection("knee-left", 30, Some(Side::Left)),
            catalog_selection("knee-right", 20, Some(Side::Right)),
            catalog_selection("ed", 0, None),
        ],
        dependents: Dependents::default(),
        evidence_score: 50,
    }
}

pub(super) fn catalog_selection(id: &str, value: i32, side: Option<Side>) -> CatalogSelection {
    CatalogSelection {
        condition_id: ConditionId::new(id),
        value,
        side,
    }
}

pub(super) fn lenient_guard() -> IntakeGuard {
    IntakeGuard::with_policy(TierPolicy {
        normalization: TierNormalization::NearestStep,
    })
}

pub(super) fn build_service() -> Arc<ClaimRatingService> {
    Arc::new(ClaimRatingService::new(
        IntakeGuard::default(),
        ConditionCatalog::standard(),
        RatingEngine::new(rates()),
    ))
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) async fn assert_unprocessable(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    json_body(response).await
}
