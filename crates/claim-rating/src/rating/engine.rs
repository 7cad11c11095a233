use serde::{Deserialize, Serialize};
use tracing::debug;

use super::combine::{combine, CombinedRatingResult};
use super::compensation::{compensate, CompensationResult};
use super::domain::{Dependents, RatingInput};
use super::range::{estimate_range, RangeCondition, RatingRange};
use super::rates::RateTable;
use super::score::{composite_score, CompositeScore, ScoreInputs};
use super::smc::{evaluate_smc, SmcAward};
use super::tdiu::{evaluate_tdiu, TdiuResult};

/// Validated claim data the engine evaluates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimProfile {
    pub ratings: Vec<RatingInput>,
    #[serde(default)]
    pub dependents: Dependents,
    #[serde(default)]
    pub evidence_score: u8,
}

/// Every engine output for one claim, recomputed from scratch on each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAssessment {
    pub rating: CombinedRatingResult,
    pub compensation: CompensationResult,
    pub tdiu: TdiuResult,
    pub smc: Vec<SmcAward>,
    pub score: CompositeScore,
}

/// Stateless evaluator that applies an injected rate table to claim profiles.
#[derive(Debug, Clone)]
pub struct RatingEngine {
    rates: RateTable,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(RateTable::standard())
    }
}

impl RatingEngine {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn combine(
        &self,
        ratings: &[RatingInput],
        include_bilateral: bool,
    ) -> CombinedRatingResult {
        combine(ratings, include_bilateral)
    }

    pub fn estimate_range(&self, conditions: &[RangeCondition]) -> RatingRange {
        estimate_range(conditions)
    }

    pub fn compensate(&self, combined_rating: u8, dependents: &Dependents) -> CompensationResult {
        compensate(combined_rating, dependents, &self.rates)
    }

    /// Run the full pipeline: combination, compensation, TDIU, SMC, then the composite
    /// score. No stage reads anything computed after it.
    pub fn assess(&self, profile: &ClaimProfile) -> ClaimAssessment {
        let rating = combine(&profile.ratings, true);
        debug!(
            conditions = profile.ratings.len(),
            exact = rating.exact_value,
            combined = rating.combined,
            bilateral_factor = rating.bilateral_factor,
            "combined rating computed"
        );

        let compensation = compensate(rating.combined, &profile.dependents, &self.rates);
        debug!(
            monthly = %compensation.monthly,
            schedule = %self.rates.schedule,
            "compensation computed"
        );

        let tdiu = evaluate_tdiu(&profile.ratings, &rating);
        debug!(eligibility = tdiu.eligibility.label(), "tdiu evaluated");

        let smc = evaluate_smc(&profile.ratings, &rating, &self.rates);
        debug!(awards = smc.len(), "smc triggers evaluated");

        let score = composite_score(&ScoreInputs {
            combined_rating: rating.combined,
            tdiu: tdiu.eligibility,
            smc_awards: smc.iter().filter(|award| award.eligible).count(),
            evidence_score: profile.evidence_score,
            condition_count: profile.ratings.len(),
        });

        ClaimAssessment {
            rating,
            compensation,
            tdiu,
            smc,
            score,
        }
    }
}
