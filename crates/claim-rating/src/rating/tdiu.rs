use serde::{Deserialize, Serialize};

use super::combine::{combine, CombinedRatingResult};
use super::domain::RatingInput;

pub const SINGLE_CONDITION_THRESHOLD: u8 = 60;
pub const COMBINED_HIGHEST_THRESHOLD: u8 = 40;
pub const COMBINED_TOTAL_THRESHOLD: u8 = 70;
pub const EXTRASCHEDULAR_THRESHOLD: u8 = 40;

const SCHEDULAR_REQUIREMENTS: [&str; 4] = [
    "Evidence that service-connected conditions prevent substantially gainful employment",
    "Employment history for the five years before becoming too disabled to work",
    "Medical opinion addressing the occupational impact of each condition",
    "Education and vocational training history",
];

const EXTRASCHEDULAR_REQUIREMENTS: [&str; 2] = [
    "Statement describing the exceptional or unusual disability picture",
    "Evidence supporting referral to the Director, Compensation Service",
];

const SCHEDULAR_FORMS: [&str; 2] = ["VA Form 21-8940", "VA Form 21-4192"];
const EXTRASCHEDULAR_FORMS: [&str; 3] = ["VA Form 21-8940", "VA Form 21-4192", "VA Form 21-4138"];

/// Outcome of the individual-unemployability decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdiuEligibility {
    Eligible,
    Ineligible,
    EligibleExtraschedular,
}

impl TdiuEligibility {
    pub const fn label(self) -> &'static str {
        match self {
            TdiuEligibility::Eligible => "eligible",
            TdiuEligibility::Ineligible => "ineligible",
            TdiuEligibility::EligibleExtraschedular => "eligible (extraschedular)",
        }
    }

    pub const fn is_eligible(self) -> bool {
        !matches!(self, TdiuEligibility::Ineligible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdiuPathway {
    SingleCondition,
    CombinedConditions,
    Extraschedular,
}

impl TdiuPathway {
    pub const fn label(self) -> &'static str {
        match self {
            TdiuPathway::SingleCondition => "Single Condition",
            TdiuPathway::CombinedConditions => "Combined Conditions",
            TdiuPathway::Extraschedular => "Extraschedular",
        }
    }

    fn requirements(self) -> Vec<String> {
        let mut items: Vec<String> = SCHEDULAR_REQUIREMENTS
            .iter()
            .map(|item| item.to_string())
            .collect();
        if self == TdiuPathway::Extraschedular {
            items.extend(EXTRASCHEDULAR_REQUIREMENTS.iter().map(|item| item.to_string()));
        }
        items
    }

    fn forms(self) -> Vec<String> {
        let forms: &[&str] = match self {
            TdiuPathway::Extraschedular => &EXTRASCHEDULAR_FORMS,
            _ => &SCHEDULAR_FORMS,
        };
        forms.iter().map(|form| form.to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdiuResult {
    pub eligibility: TdiuEligibility,
    pub pathway: Option<TdiuPathway>,
    pub explanation: String,
    pub requirements: Vec<String>,
    pub forms: Vec<String>,
}

impl TdiuResult {
    fn ineligible(explanation: String) -> Self {
        Self {
            eligibility: TdiuEligibility::Ineligible,
            pathway: None,
            explanation,
            requirements: Vec::new(),
            forms: Vec::new(),
        }
    }

    fn granted(eligibility: TdiuEligibility, pathway: TdiuPathway, explanation: String) -> Self {
        Self {
            eligibility,
            pathway: Some(pathway),
            explanation,
            requirements: pathway.requirements(),
            forms: pathway.forms(),
        }
    }
}

/// Evaluate TDIU eligibility, computing the bilateral-inclusive combined rating.
pub fn check_tdiu(ratings: &[RatingInput]) -> TdiuResult {
    let combined = combine(ratings, true);
    evaluate_tdiu(ratings, &combined)
}

/// Evaluate TDIU eligibility against an already computed bilateral-inclusive rating.
///
/// Branches are tried in priority order and the first match wins.
pub fn evaluate_tdiu(ratings: &[RatingInput], combined: &CombinedRatingResult) -> TdiuResult {
    let Some(highest) = highest_rating(ratings) else {
        return TdiuResult::ineligible(
            "No ratings provided; TDIU eligibility cannot be evaluated.".to_string(),
        );
    };
    let name = highest.name.as_str();
    let value = highest.value;
    let total = combined.combined;

    if value >= SINGLE_CONDITION_THRESHOLD {
        return TdiuResult::granted(
            TdiuEligibility::Eligible,
            TdiuPathway::SingleCondition,
            format!(
                "{name} is rated {value}%, meeting the {SINGLE_CONDITION_THRESHOLD}% single-disability threshold of 38 CFR 4.16(a). Combined rating: {total}%."
            ),
        );
    }

    if value >= COMBINED_HIGHEST_THRESHOLD && total >= COMBINED_TOTAL_THRESHOLD {
        return TdiuResult::granted(
            TdiuEligibility::Eligible,
            TdiuPathway::CombinedConditions,
            format!(
                "{name} is rated {value}% (at least {COMBINED_HIGHEST_THRESHOLD}%) and the combined rating is {total}% (at least {COMBINED_TOTAL_THRESHOLD}%), meeting the multiple-disability threshold of 38 CFR 4.16(a)."
            ),
        );
    }

    if total >= EXTRASCHEDULAR_THRESHOLD {
        return TdiuResult::granted(
            TdiuEligibility::EligibleExtraschedular,
            TdiuPathway::Extraschedular,
            format!(
                "The highest rating ({name}, {value}%) and combined rating of {total}% fall short of the schedular thresholds; a combined rating of at least {EXTRASCHEDULAR_THRESHOLD}% supports extraschedular referral under 38 CFR 4.16(b)."
            ),
        );
    }

    TdiuResult::ineligible(format!(
        "The highest rating ({name}, {value}%) and combined rating of {total}% do not meet TDIU thresholds."
    ))
}

/// First input holding the highest value.
fn highest_rating(ratings: &[RatingInput]) -> Option<&RatingInput> {
    ratings.iter().fold(None, |best: Option<&RatingInput>, rating| match best {
        Some(current) if current.value >= rating.value => Some(current),
        _ => Some(rating),
    })
}
