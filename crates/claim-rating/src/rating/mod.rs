//! Deterministic rating and entitlement engine.
//!
//! Every calculation is a pure function of its arguments: the combination calculator, the
//! range estimator, compensation lookup, the TDIU and SMC evaluators, and the composite
//! score. Rate tables and the condition catalog are injected data. Input validation
//! happens once, at the intake boundary, before anything reaches the engine.

pub mod catalog;
pub mod combine;
pub mod compensation;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod range;
pub mod rates;
pub mod router;
pub mod score;
pub mod service;
pub mod smc;
pub mod tdiu;

#[cfg(test)]
mod tests;

pub use catalog::{infer_triggers, CatalogEntry, CatalogError, ConditionCatalog};
pub use combine::{
    combine, combine_values, round_to_nearest_ten, CombinedRatingResult, RatingBreakdown,
};
pub use compensation::{compensate, ColaMetadata, CompensationBreakdown, CompensationResult};
pub use domain::{ConditionId, Dependents, LimbType, RatingInput, Side, TriggerTag};
pub use engine::{ClaimAssessment, ClaimProfile, RatingEngine};
pub use intake::{
    CatalogClaimSubmission, CatalogSelection, ClaimSubmission, ConditionSelection, IntakeError,
    IntakeGuard, RangeSelection, TierNormalization, TierPolicy,
};
pub use range::{estimate_range, RangeCondition, RatingRange};
pub use rates::{Cents, RateTable, RateTableError, SmcRates, TierRates};
pub use router::assessment_router;
pub use score::{composite_score, CompositeScore, ScoreComponent, ScoreFactor, ScoreInputs};
pub use service::{ClaimRatingService, ClaimServiceError};
pub use smc::{check_smc, evaluate_smc, SmcAward, SmcAwardType};
pub use tdiu::{check_tdiu, evaluate_tdiu, TdiuEligibility, TdiuPathway, TdiuResult};
