use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::Dependents;
use super::rates::{Cents, RateTable};

/// Dependent supplements only apply from this combined rating upward.
pub const DEPENDENT_SUPPLEMENT_THRESHOLD: u8 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationResult {
    pub combined_rating: u8,
    pub monthly: Cents,
    pub annual: Cents,
    pub breakdown: CompensationBreakdown,
    pub cola: ColaMetadata,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    pub base: Cents,
    pub spouse: Cents,
    pub children: Cents,
    pub parents: Cents,
}

impl CompensationBreakdown {
    pub fn total(&self) -> Cents {
        [self.base, self.spouse, self.children, self.parents]
            .into_iter()
            .sum()
    }
}

/// Cost-of-living details of the schedule used. Display only: `applied` is always false
/// because the schedule amounts already include the adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColaMetadata {
    pub schedule: String,
    pub percent: f64,
    pub year: i32,
    pub effective_date: NaiveDate,
    pub applied: bool,
}

pub fn compensate(
    combined_rating: u8,
    dependents: &Dependents,
    rates: &RateTable,
) -> CompensationResult {
    let tier = rates.tier(combined_rating);
    let mut breakdown = CompensationBreakdown {
        base: tier.base,
        ..CompensationBreakdown::default()
    };

    if combined_rating >= DEPENDENT_SUPPLEMENT_THRESHOLD {
        if dependents.spouse {
            breakdown.spouse = tier.spouse;
        }
        if dependents.children >= 1 {
            let additional = u64::from(dependents.children - 1);
            breakdown.children = tier.first_child + tier.additional_child.times(additional);
        }
        // Flat per-parent amount; simplification pending a tier- and income-aware rule.
        breakdown.parents = rates.parent_monthly.times(u64::from(dependents.parents));
    }

    let monthly = breakdown.total();

    CompensationResult {
        combined_rating,
        monthly,
        annual: monthly.times(12),
        breakdown,
        cola: ColaMetadata {
            schedule: rates.schedule.clone(),
            percent: rates.cola_percent,
            year: rates.cola_year(),
            effective_date: rates.effective_date,
            applied: false,
        },
    }
}
