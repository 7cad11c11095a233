use std::sync::Arc;

use tracing::info;

use super::catalog::ConditionCatalog;
use super::combine::CombinedRatingResult;
use super::compensation::CompensationResult;
use super::domain::Dependents;
use super::engine::{ClaimAssessment, RatingEngine};
use super::intake::{
    CatalogClaimSubmission, ClaimSubmission, ConditionSelection, IntakeError, IntakeGuard,
    RangeSelection,
};
use super::range::RatingRange;

/// Service composing the intake guard, condition catalog, and rating engine.
#[derive(Debug, Clone)]
pub struct ClaimRatingService {
    guard: Arc<IntakeGuard>,
    catalog: Arc<ConditionCatalog>,
    engine: Arc<RatingEngine>,
}

impl ClaimRatingService {
    pub fn new(guard: IntakeGuard, catalog: ConditionCatalog, engine: RatingEngine) -> Self {
        Self {
            guard: Arc::new(guard),
            catalog: Arc::new(catalog),
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &ConditionCatalog {
        &self.catalog
    }

    /// Validate free-form ratings and combine them.
    pub fn combine(
        &self,
        selections: Vec<ConditionSelection>,
        include_bilateral: bool,
    ) -> Result<CombinedRatingResult, ClaimServiceError> {
        let ratings = selections
            .into_iter()
            .map(|selection| self.guard.rating_from_selection(selection))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.engine.combine(&ratings, include_bilateral))
    }

    /// Validate candidate tiers and estimate the combined-rating range.
    pub fn estimate_range(
        &self,
        selections: Vec<RangeSelection>,
    ) -> Result<RatingRange, ClaimServiceError> {
        let conditions = self.guard.range_conditions(selections)?;
        Ok(self.engine.estimate_range(&conditions))
    }

    /// Validate a combined rating and price it.
    pub fn compensate(
        &self,
        combined_rating: i32,
        dependents: &Dependents,
    ) -> Result<CompensationResult, ClaimServiceError> {
        let rating = self
            .guard
            .normalize_value("Combined rating", combined_rating)?;
        Ok(self.engine.compensate(rating, dependents))
    }

    /// Validate a free-form claim and run the full pipeline.
    pub fn assess(
        &self,
        submission: ClaimSubmission,
    ) -> Result<ClaimAssessment, ClaimServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        let assessment = self.engine.assess(&profile);
        info!(
            conditions = profile.ratings.len(),
            combined = assessment.rating.combined,
            score = assessment.score.total,
            "claim assessed"
        );
        Ok(assessment)
    }

    /// Resolve catalog selections and run the full pipeline.
    pub fn assess_catalog(
        &self,
        submission: &CatalogClaimSubmission,
    ) -> Result<ClaimAssessment, ClaimServiceError> {
        let profile = self.guard.profile_from_catalog(&self.catalog, submission)?;
        let assessment = self.engine.assess(&profile);
        info!(
            conditions = profile.ratings.len(),
            combined = assessment.rating.combined,
            score = assessment.score.total,
            "catalog claim assessed"
        );
        Ok(assessment)
    }
}

impl Default for ClaimRatingService {
    fn default() -> Self {
        Self::new(
            IntakeGuard::default(),
            ConditionCatalog::standard(),
            RatingEngine::default(),
        )
    }
}

/// Error raised by the claim rating service.
#[derive(Debug, thiserror::Error)]
pub enum ClaimServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
}
