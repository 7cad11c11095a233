use serde::{Deserialize, Serialize};

use super::combine::combine;
use super::domain::RatingInput;

/// A condition whose severity has not been fixed yet, with every tier it could land on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCondition {
    pub name: String,
    pub possible_ratings: Vec<u8>,
}

/// Best-case and worst-case combined ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRange {
    pub min: u8,
    pub max: u8,
    pub min_exact: f64,
    pub max_exact: f64,
}

pub fn estimate_range(conditions: &[RangeCondition]) -> RatingRange {
    if conditions.is_empty() {
        return RatingRange::default();
    }

    let lowest = tier_inputs(conditions, |tiers| {
        tiers.iter().copied().filter(|value| *value > 0).min()
    });
    let highest = tier_inputs(conditions, |tiers| tiers.iter().copied().max());

    let worst = combine(&lowest, false);
    let best = combine(&highest, false);

    RatingRange {
        min: worst.combined,
        max: best.combined,
        min_exact: worst.exact_value,
        max_exact: best.exact_value,
    }
}

fn tier_inputs(
    conditions: &[RangeCondition],
    pick: impl Fn(&[u8]) -> Option<u8>,
) -> Vec<RatingInput> {
    conditions
        .iter()
        .enumerate()
        .filter_map(|(index, condition)| {
            pick(&condition.possible_ratings).map(|value| {
                RatingInput::new(format!("range-{index}"), condition.name.clone(), value)
            })
        })
        .collect()
}
