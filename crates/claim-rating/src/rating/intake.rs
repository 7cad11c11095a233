use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::{infer_triggers, CatalogEntry, ConditionCatalog};
use super::domain::{ConditionId, Dependents, LimbType, RatingInput, Side, TriggerTag};
use super::engine::ClaimProfile;
use super::range::RangeCondition;

/// Validation errors raised at the ingestion boundary, before the engine sees any input.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{name}: rating {value}% is not on the 10% schedule")]
    OffSchedule { name: String, value: u8 },
    #[error("{name}: {value}% is not a tier offered for this condition")]
    UnknownTier { name: String, value: u8 },
    #[error("unknown condition '{0}'")]
    UnknownCondition(ConditionId),
}

/// How off-schedule values are handled once clamped into [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierNormalization {
    #[default]
    Reject,
    NearestStep,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TierPolicy {
    pub normalization: TierNormalization,
}

/// A free-form rating as entered upstream. `value` is unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSelection {
    pub id: ConditionId,
    pub name: String,
    pub value: i32,
    #[serde(default)]
    pub is_bilateral: bool,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub limb_type: Option<LimbType>,
    #[serde(default)]
    pub triggers: Vec<TriggerTag>,
}

/// An undecided condition as entered upstream. Tiers are unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSelection {
    #[serde(default)]
    pub name: String,
    pub possible_ratings: Vec<i32>,
}

/// A severity chosen for a catalog condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSelection {
    pub condition_id: ConditionId,
    pub value: i32,
    #[serde(default)]
    pub side: Option<Side>,
}

/// Raw claim payload as received from the claim wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSubmission {
    pub conditions: Vec<ConditionSelection>,
    #[serde(default)]
    pub dependents: Dependents,
    #[serde(default)]
    pub evidence_score: i32,
}

/// Raw claim payload referencing catalog conditions by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogClaimSubmission {
    pub selections: Vec<CatalogSelection>,
    #[serde(default)]
    pub dependents: Dependents,
    #[serde(default)]
    pub evidence_score: i32,
}

/// Guard responsible for producing well-formed `RatingInput`s.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: TierPolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: TierPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TierPolicy {
        self.policy
    }

    /// Clamp a raw value into [0, 100] and enforce the 10% schedule.
    pub fn normalize_value(&self, name: &str, raw: i32) -> Result<u8, IntakeError> {
        let clamped = raw.clamp(0, 100) as u8;
        if !(0..=100).contains(&raw) {
            warn!(condition = name, raw, clamped, "rating clamped into schedular range");
        }
        if clamped % 10 == 0 {
            return Ok(clamped);
        }

        match self.policy.normalization {
            TierNormalization::Reject => Err(IntakeError::OffSchedule {
                name: name.to_string(),
                value: clamped,
            }),
            TierNormalization::NearestStep => {
                let step = ((u16::from(clamped) + 5) / 10 * 10) as u8;
                warn!(
                    condition = name,
                    from = clamped,
                    to = step,
                    "rating normalized to schedule"
                );
                Ok(step)
            }
        }
    }

    /// Validate a free-form rating. Untagged selections get their trigger tags derived
    /// from the name here, once, the same way catalog entries do.
    pub fn rating_from_selection(
        &self,
        selection: ConditionSelection,
    ) -> Result<RatingInput, IntakeError> {
        let value = self.normalize_value(&selection.name, selection.value)?;
        let triggers = if selection.triggers.is_empty() {
            infer_triggers(&selection.name)
        } else {
            selection.triggers
        };
        Ok(RatingInput {
            id: selection.id,
            name: selection.name,
            value,
            is_bilateral: selection.is_bilateral,
            side: selection.side,
            limb_type: selection.limb_type,
            triggers,
        })
    }

    /// Validate every candidate tier of undecided conditions. Unnamed conditions are
    /// reported by position.
    pub fn range_conditions(
        &self,
        selections: Vec<RangeSelection>,
    ) -> Result<Vec<RangeCondition>, IntakeError> {
        selections
            .into_iter()
            .enumerate()
            .map(|(index, selection)| {
                let name = if selection.name.trim().is_empty() {
                    format!("Condition {}", index + 1)
                } else {
                    selection.name
                };
                let possible_ratings = selection
                    .possible_ratings
                    .into_iter()
                    .map(|tier| self.normalize_value(&name, tier))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RangeCondition {
                    name,
                    possible_ratings,
                })
            })
            .collect()
    }

    /// Resolve a catalog selection. The value must be one of the entry's tiers; paired-limb
    /// data is only carried for bilateral-eligible entries.
    pub fn rating_from_catalog(
        &self,
        catalog: &ConditionCatalog,
        selection: &CatalogSelection,
    ) -> Result<RatingInput, IntakeError> {
        let entry = catalog
            .get(&selection.condition_id)
            .ok_or_else(|| IntakeError::UnknownCondition(selection.condition_id.clone()))?;

        let clamped = selection.value.clamp(0, 100) as u8;
        let value = if entry.offers(clamped) {
            clamped
        } else {
            match self.policy.normalization {
                TierNormalization::Reject => {
                    return Err(IntakeError::UnknownTier {
                        name: entry.name.clone(),
                        value: clamped,
                    })
                }
                TierNormalization::NearestStep => nearest_tier(entry, clamped).ok_or_else(|| {
                    IntakeError::UnknownTier {
                        name: entry.name.clone(),
                        value: clamped,
                    }
                })?,
            }
        };

        let (side, limb_type) = if entry.bilateral_eligible {
            (selection.side, entry.limb_type)
        } else {
            (None, None)
        };

        Ok(RatingInput {
            id: entry.id.clone(),
            name: entry.name.clone(),
            value,
            is_bilateral: entry.bilateral_eligible,
            side,
            limb_type,
            triggers: entry.triggers.clone(),
        })
    }

    /// Clamp the externally supplied evidence-completeness score into [0, 100].
    pub fn evidence_score(&self, raw: i32) -> u8 {
        raw.clamp(0, 100) as u8
    }

    pub fn profile_from_submission(
        &self,
        submission: ClaimSubmission,
    ) -> Result<ClaimProfile, IntakeError> {
        let ratings = submission
            .conditions
            .into_iter()
            .map(|selection| self.rating_from_selection(selection))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClaimProfile {
            ratings,
            dependents: submission.dependents,
            evidence_score: self.evidence_score(submission.evidence_score),
        })
    }

    pub fn profile_from_catalog(
        &self,
        catalog: &ConditionCatalog,
        submission: &CatalogClaimSubmission,
    ) -> Result<ClaimProfile, IntakeError> {
        let ratings = submission
            .selections
            .iter()
            .map(|selection| self.rating_from_catalog(catalog, selection))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClaimProfile {
            ratings,
            dependents: submission.dependents,
            evidence_score: self.evidence_score(submission.evidence_score),
        })
    }
}

/// Closest offered tier; ties resolve to the higher tier.
fn nearest_tier(entry: &CatalogEntry, value: u8) -> Option<u8> {
    entry
        .ratings
        .iter()
        .copied()
        .min_by_key(|tier| (tier.abs_diff(value), std::cmp::Reverse(*tier)))
}
