use serde::{Deserialize, Serialize};

use super::tdiu::TdiuEligibility;

const RATING_WEIGHT: f64 = 0.40;
const EVIDENCE_WEIGHT: f64 = 0.15;
const SMC_POINTS_PER_AWARD: f64 = 5.0;
const SMC_POINTS_CAP: f64 = 15.0;
const CONDITION_POINTS_PER_ENTRY: f64 = 2.0;
const CONDITION_POINTS_CAP: f64 = 10.0;

/// Signals the composite score is synthesized from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInputs {
    pub combined_rating: u8,
    pub tdiu: TdiuEligibility,
    pub smc_awards: usize,
    pub evidence_score: u8,
    pub condition_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    CombinedRating,
    Tdiu,
    SpecialCompensation,
    Evidence,
    ConditionCoverage,
}

/// Discrete weighted term, kept for transparent display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub total: u8,
    pub components: Vec<ScoreComponent>,
}

/// Advisory 0-100 score for display. It carries no eligibility meaning.
pub fn composite_score(inputs: &ScoreInputs) -> CompositeScore {
    let tdiu_points = match inputs.tdiu {
        TdiuEligibility::Eligible => 20.0,
        TdiuEligibility::EligibleExtraschedular => 10.0,
        TdiuEligibility::Ineligible => 0.0,
    };
    let smc_points = (SMC_POINTS_PER_AWARD * inputs.smc_awards as f64).min(SMC_POINTS_CAP);
    let condition_points =
        (CONDITION_POINTS_PER_ENTRY * inputs.condition_count as f64).min(CONDITION_POINTS_CAP);

    let components = vec![
        ScoreComponent {
            factor: ScoreFactor::CombinedRating,
            points: RATING_WEIGHT * f64::from(inputs.combined_rating),
            notes: format!("combined rating {}%", inputs.combined_rating),
        },
        ScoreComponent {
            factor: ScoreFactor::Tdiu,
            points: tdiu_points,
            notes: format!("TDIU {}", inputs.tdiu.label()),
        },
        ScoreComponent {
            factor: ScoreFactor::SpecialCompensation,
            points: smc_points,
            notes: format!("{} special compensation award(s)", inputs.smc_awards),
        },
        ScoreComponent {
            factor: ScoreFactor::Evidence,
            points: EVIDENCE_WEIGHT * f64::from(inputs.evidence_score),
            notes: format!("evidence completeness {}", inputs.evidence_score),
        },
        ScoreComponent {
            factor: ScoreFactor::ConditionCoverage,
            points: condition_points,
            notes: format!("{} condition(s) claimed", inputs.condition_count),
        },
    ];

    let raw: f64 = components.iter().map(|component| component.points).sum();
    let total = raw.round().clamp(0.0, 100.0) as u8;

    CompositeScore { total, components }
}
