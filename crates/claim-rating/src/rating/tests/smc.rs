use super::common::*;
use crate::rating::catalog::CatalogEntry;
use crate::rating::domain::{RatingInput, Side};
use crate::rating::smc::{check_smc, SmcAwardType};

#[test]
fn creative_organ_loss_fires_single_k_award() {
    let entry = CatalogEntry::new(
        "ed",
        "Erectile dysfunction (loss of use of creative organ)",
        &[0, 20],
    );
    let input = RatingInput::new("ed", entry.name.clone(), 0).with_triggers(entry.triggers);

    let awards = check_smc(&[input], &rates());

    assert_eq!(awards.len(), 1);
    let award = &awards[0];
    assert_eq!(award.award_type, SmcAwardType::K);
    assert!(award.eligible);
    assert!(!award.advisory);
    assert_eq!(award.amount, rates().smc.k);
    assert_eq!(award.amount.to_string(), "$132.74");
}

#[test]
fn untagged_conditions_fire_nothing() {
    let awards = check_smc(&ratings(&[70, 40, 20]), &rates());
    assert!(awards.is_empty());
}

#[test]
fn housebound_requires_sixty_percent_remainder() {
    let awards = check_smc(&[rating("Total", 100), rating("Other", 60)], &rates());
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].award_type, SmcAwardType::S);
    assert_eq!(awards[0].conditions, vec!["Total".to_string()]);

    let short = check_smc(&[rating("Total", 100), rating("Other", 50)], &rates());
    assert!(short.is_empty());
}

#[test]
fn single_total_rating_is_not_housebound() {
    let awards = check_smc(&[rating("Total", 100)], &rates());
    assert!(awards.is_empty());
}

#[test]
fn severe_brain_injury_fires_t_award() {
    let awards = check_smc(&[tbi(70)], &rates());

    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].award_type, SmcAwardType::T);
    assert_eq!(awards[0].amount, rates().smc.t);

    assert!(check_smc(&[tbi(40)], &rates()).is_empty());
}

#[test]
fn two_extremity_losses_raise_advisory_l_flag() {
    let awards = check_smc(
        &[amputation(Side::Left, 60), amputation(Side::Right, 40)],
        &rates(),
    );

    let types: Vec<SmcAwardType> = awards.iter().map(|award| award.award_type).collect();
    assert_eq!(types, vec![SmcAwardType::K, SmcAwardType::L]);

    let review = &awards[1];
    assert!(review.advisory);
    assert!(review.reason.starts_with("Review flag"));
    assert_eq!(review.conditions.len(), 2);
}

#[test]
fn awards_follow_fixed_order() {
    let awards = check_smc(
        &[
            rating("Total", 100),
            tbi(70),
            amputation(Side::Left, 60),
            amputation(Side::Right, 60),
        ],
        &rates(),
    );

    let types: Vec<SmcAwardType> = awards.iter().map(|award| award.award_type).collect();
    assert_eq!(
        types,
        vec![
            SmcAwardType::K,
            SmcAwardType::S,
            SmcAwardType::T,
            SmcAwardType::L
        ]
    );
}

#[test]
fn award_serializes_type_code() {
    let awards = check_smc(&[tbi(100)], &rates());
    let value = serde_json::to_value(&awards[0]).expect("serialize award");
    assert_eq!(value["type"], "T");
    assert_eq!(value["eligible"], true);
}
