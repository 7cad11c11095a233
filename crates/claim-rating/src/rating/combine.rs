use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{LimbType, RatingInput, Side};

/// Slack applied before half-up rounding so binary floating-point noise (64.99999…)
/// cannot drop a value across a rounding threshold.
const ROUNDING_TOLERANCE: f64 = 1e-9;

const BILATERAL_FACTOR_RATE: f64 = 0.10;

/// Output of the combination calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRatingResult {
    pub exact_value: f64,
    pub combined: u8,
    pub bilateral_factor: u8,
    pub bilateral_combined: u8,
    pub breakdown: RatingBreakdown,
    pub steps: Vec<String>,
}

/// Partition of the non-zero inputs actually used by the calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBreakdown {
    pub bilateral: Vec<RatingInput>,
    pub non_bilateral: Vec<RatingInput>,
}

/// Combine individual ratings into one schedular percentage.
///
/// Uses the whole-person efficiency law: each rating removes its share of the efficiency
/// left over by the ratings before it. The law is commutative; ratings are visited in
/// descending order only so the audit trail reads the way rating decisions present it.
pub fn combine(ratings: &[RatingInput], include_bilateral: bool) -> CombinedRatingResult {
    let active: Vec<&RatingInput> = ratings.iter().filter(|rating| rating.value > 0).collect();
    if active.is_empty() {
        return CombinedRatingResult::default();
    }

    let (bilateral, mut non_bilateral) = if include_bilateral {
        partition_bilateral(&active)
    } else {
        (Vec::new(), active)
    };
    sort_descending(&mut non_bilateral);

    let mut steps = Vec::new();
    let mut bilateral_factor = 0;
    let mut bilateral_combined = 0;
    let mut entries: Vec<(u8, String)> = Vec::with_capacity(non_bilateral.len() + 1);

    if !bilateral.is_empty() {
        let mut members = bilateral.clone();
        sort_descending(&mut members);

        let names: Vec<&str> = members.iter().map(|rating| rating.name.as_str()).collect();
        steps.push(format!("Bilateral group: {}", names.join(", ")));

        let values: Vec<(u8, String)> = members
            .iter()
            .map(|rating| (rating.value, rating.name.clone()))
            .collect();
        let raw = deduct(&values, &mut steps);
        let subtotal = round_half_up(raw).clamp(0.0, 100.0) as u8;
        bilateral_factor = round_half_up(f64::from(subtotal) * BILATERAL_FACTOR_RATE) as u8;
        bilateral_combined = subtotal.saturating_add(bilateral_factor).min(100);

        steps.push(format!(
            "Bilateral subtotal {raw:.2}% rounds to {subtotal}%; bilateral factor 10% of {subtotal} = {bilateral_factor}; bilateral combined {bilateral_combined}%"
        ));

        // The synthetic bilateral entry goes first regardless of magnitude; the law is
        // commutative so only the trail's presentation is affected.
        entries.push((bilateral_combined, "Bilateral combined".to_string()));
    }

    entries.extend(
        non_bilateral
            .iter()
            .map(|rating| (rating.value, rating.name.clone())),
    );

    if !bilateral.is_empty() {
        steps.push("Final combination".to_string());
    }
    let exact_value = deduct(&entries, &mut steps);
    let combined = round_to_nearest_ten(exact_value);
    steps.push(format!("Combined value {exact_value:.2}% rounds to {combined}%"));

    CombinedRatingResult {
        exact_value,
        combined,
        bilateral_factor,
        bilateral_combined,
        breakdown: RatingBreakdown {
            bilateral: bilateral.into_iter().cloned().collect(),
            non_bilateral: non_bilateral.into_iter().cloned().collect(),
        },
        steps,
    }
}

/// Raw efficiency law over bare percentages, without bilateral handling or rounding.
pub fn combine_values(values: &[u8]) -> f64 {
    let mut sorted: Vec<u8> = values.iter().copied().filter(|value| *value > 0).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let remaining = sorted.iter().fold(100.0_f64, |efficiency, value| {
        efficiency - efficiency * f64::from(*value) / 100.0
    });
    100.0 - remaining
}

/// Round half-up to the nearest multiple of ten, clamped to the schedular range.
pub fn round_to_nearest_ten(value: f64) -> u8 {
    let tens = round_half_up(value / 10.0).clamp(0.0, 10.0);
    (tens as u8) * 10
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5 + ROUNDING_TOLERANCE).floor()
}

fn sort_descending(ratings: &mut [&RatingInput]) {
    ratings.sort_by(|a, b| b.value.cmp(&a.value));
}

fn deduct(entries: &[(u8, String)], steps: &mut Vec<String>) -> f64 {
    let mut efficiency = 100.0_f64;
    for (value, label) in entries {
        let contribution = efficiency * f64::from(*value) / 100.0;
        let next = efficiency - contribution;
        steps.push(format!(
            "{label} {value}%: {efficiency:.2} x {value}% = {contribution:.2}, remaining efficiency {next:.2}"
        ));
        efficiency = next;
    }
    100.0 - efficiency
}

#[derive(Default)]
struct LimbGroup<'a> {
    members: Vec<&'a RatingInput>,
    left: bool,
    right: bool,
    explicit_bilateral: bool,
}

impl LimbGroup<'_> {
    fn qualifies(&self) -> bool {
        (self.left && self.right) || self.explicit_bilateral || self.members.len() >= 2
    }
}

/// Split ratings into the pooled bilateral set and everything else.
///
/// A limb group qualifies with a left/right pair, an explicit bilateral entry, or two or
/// more flagged entries; members of every qualifying group are pooled together.
fn partition_bilateral<'a>(
    ratings: &[&'a RatingInput],
) -> (Vec<&'a RatingInput>, Vec<&'a RatingInput>) {
    let mut groups: BTreeMap<LimbType, LimbGroup<'a>> = BTreeMap::new();

    for rating in ratings.iter().copied() {
        if !rating.is_bilateral {
            continue;
        }
        let Some(limb) = rating.limb_type else {
            continue;
        };
        let group = groups.entry(limb).or_default();
        group.members.push(rating);
        match rating.side {
            Some(Side::Left) => group.left = true,
            Some(Side::Right) => group.right = true,
            Some(Side::Bilateral) => group.explicit_bilateral = true,
            None => {}
        }
    }

    let qualifying: Vec<&RatingInput> = groups
        .values()
        .filter(|group| group.qualifies())
        .flat_map(|group| group.members.iter().copied())
        .collect();

    let (bilateral, non_bilateral): (Vec<&RatingInput>, Vec<&RatingInput>) = ratings
        .iter()
        .copied()
        .partition(|rating| qualifying.iter().any(|member| std::ptr::eq(*member, *rating)));

    (bilateral, non_bilateral)
}
