use serde::{Deserialize, Serialize};

use super::combine::{combine, CombinedRatingResult};
use super::domain::{RatingInput, TriggerTag};
use super::rates::{Cents, RateTable};

pub const HOUSEBOUND_REMAINDER_THRESHOLD: u8 = 60;
pub const TBI_RATING_THRESHOLD: u8 = 70;
/// Review-flag heuristic, not a regulation-complete rule.
pub const EXTREMITY_LOSS_REVIEW_COUNT: usize = 2;

/// Special monthly compensation award codes evaluated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmcAwardType {
    K,
    S,
    T,
    L,
}

impl SmcAwardType {
    pub const fn code(self) -> &'static str {
        match self {
            SmcAwardType::K => "SMC-K",
            SmcAwardType::S => "SMC-S",
            SmcAwardType::T => "SMC-T",
            SmcAwardType::L => "SMC-L",
        }
    }

    pub const fn citation(self) -> &'static str {
        match self {
            SmcAwardType::K => "38 U.S.C. 1114(k); 38 CFR 3.350(a)",
            SmcAwardType::S => "38 U.S.C. 1114(s); 38 CFR 3.350(i)",
            SmcAwardType::T => "38 U.S.C. 1114(t); 38 CFR 3.352(b)",
            SmcAwardType::L => "38 U.S.C. 1114(l); 38 CFR 3.350(b)",
        }
    }

    fn amount(self, rates: &RateTable) -> Cents {
        match self {
            SmcAwardType::K => rates.smc.k,
            SmcAwardType::S => rates.smc.s,
            SmcAwardType::T => rates.smc.t,
            SmcAwardType::L => rates.smc.l,
        }
    }
}

/// One fired trigger. Triggers that do not fire produce no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmcAward {
    #[serde(rename = "type")]
    pub award_type: SmcAwardType,
    pub eligible: bool,
    /// Set when the record flags a claim for manual review instead of determining it.
    pub advisory: bool,
    pub amount: Cents,
    pub reason: String,
    pub citation: String,
    pub conditions: Vec<String>,
}

impl SmcAward {
    fn fired(
        award_type: SmcAwardType,
        rates: &RateTable,
        reason: String,
        conditions: Vec<String>,
    ) -> Self {
        Self {
            award_type,
            eligible: true,
            advisory: false,
            amount: award_type.amount(rates),
            reason,
            citation: award_type.citation().to_string(),
            conditions,
        }
    }
}

/// Evaluate every trigger, computing the bilateral-inclusive combined rating.
pub fn check_smc(ratings: &[RatingInput], rates: &RateTable) -> Vec<SmcAward> {
    let combined = combine(ratings, true);
    evaluate_smc(ratings, &combined, rates)
}

/// Evaluate every trigger independently; results follow the fixed K, S, T, L order.
pub fn evaluate_smc(
    ratings: &[RatingInput],
    combined: &CombinedRatingResult,
    rates: &RateTable,
) -> Vec<SmcAward> {
    [
        k_trigger(ratings, rates),
        s_trigger(ratings, combined, rates),
        t_trigger(ratings, rates),
        l_trigger(ratings, rates),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn names_where(ratings: &[RatingInput], predicate: impl Fn(&RatingInput) -> bool) -> Vec<String> {
    ratings
        .iter()
        .filter(|rating| predicate(rating))
        .map(|rating| rating.name.clone())
        .collect()
}

fn k_trigger(ratings: &[RatingInput], rates: &RateTable) -> Option<SmcAward> {
    let matched = names_where(ratings, |rating| {
        rating.has_trigger(TriggerTag::supports_k_award)
    });
    if matched.is_empty() {
        return None;
    }

    Some(SmcAward::fired(
        SmcAwardType::K,
        rates,
        format!("Anatomical loss or loss of use: {}", matched.join(", ")),
        matched,
    ))
}

fn s_trigger(
    ratings: &[RatingInput],
    combined: &CombinedRatingResult,
    rates: &RateTable,
) -> Option<SmcAward> {
    if combined.combined != 100 || ratings.len() < 2 {
        return None;
    }

    let (index, total) = ratings
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, &RatingInput)>, (index, rating)| {
            match best {
                Some((_, current)) if current.value >= rating.value => best,
                _ => Some((index, rating)),
            }
        })?;
    if total.value != 100 {
        return None;
    }

    let remaining: Vec<RatingInput> = ratings
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, rating)| rating.clone())
        .collect();
    let remainder = combine(&remaining, true);
    if remainder.combined < HOUSEBOUND_REMAINDER_THRESHOLD {
        return None;
    }

    Some(SmcAward::fired(
        SmcAwardType::S,
        rates,
        format!(
            "{} is rated 100% and the remaining conditions combine to {}% (at least {HOUSEBOUND_REMAINDER_THRESHOLD}%)",
            total.name, remainder.combined
        ),
        vec![total.name.clone()],
    ))
}

fn t_trigger(ratings: &[RatingInput], rates: &RateTable) -> Option<SmcAward> {
    let matched = names_where(ratings, |rating| {
        rating.value >= TBI_RATING_THRESHOLD
            && rating.has_trigger(|tag| tag == TriggerTag::TraumaticBrainInjury)
    });
    if matched.is_empty() {
        return None;
    }

    Some(SmcAward::fired(
        SmcAwardType::T,
        rates,
        format!(
            "Traumatic brain injury rated at least {TBI_RATING_THRESHOLD}%: {}",
            matched.join(", ")
        ),
        matched,
    ))
}

fn l_trigger(ratings: &[RatingInput], rates: &RateTable) -> Option<SmcAward> {
    let matched = names_where(ratings, |rating| {
        rating.has_trigger(TriggerTag::is_extremity_loss)
    });
    if matched.len() < EXTREMITY_LOSS_REVIEW_COUNT {
        return None;
    }

    let mut award = SmcAward::fired(
        SmcAwardType::L,
        rates,
        format!(
            "Review flag: {} conditions involve amputation or loss of use of an extremity ({}); aid-and-attendance entitlement needs manual review",
            matched.len(),
            matched.join(", ")
        ),
        matched,
    );
    award.advisory = true;
    Some(award)
}
