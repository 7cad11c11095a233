use super::common::*;
use crate::rating::tdiu::{check_tdiu, TdiuEligibility, TdiuPathway};

#[test]
fn single_condition_at_sixty_is_eligible() {
    let result = check_tdiu(&[rating("Condition A", 60)]);

    assert_eq!(result.eligibility, TdiuEligibility::Eligible);
    assert_eq!(result.pathway, Some(TdiuPathway::SingleCondition));
    assert_eq!(
        result.pathway.map(TdiuPathway::label),
        Some("Single Condition")
    );
    assert!(result.explanation.contains("Condition A"));
    assert!(result.forms.iter().any(|form| form == "VA Form 21-8940"));
    assert!(!result.requirements.is_empty());
}

#[test]
fn fifty_nine_misses_single_condition_threshold() {
    let result = check_tdiu(&[rating("Condition A", 59)]);

    assert_ne!(result.pathway, Some(TdiuPathway::SingleCondition));
    // The combined 60% still supports extraschedular referral.
    assert_eq!(result.eligibility, TdiuEligibility::EligibleExtraschedular);
}

#[test]
fn combined_pathway_needs_forty_and_seventy() {
    let result = check_tdiu(&ratings(&[40, 50, 30]));

    assert_eq!(result.eligibility, TdiuEligibility::Eligible);
    assert_eq!(result.pathway, Some(TdiuPathway::CombinedConditions));
    assert!(result.explanation.contains("80%"));
}

#[test]
fn extraschedular_pathway_below_schedular_thresholds() {
    let result = check_tdiu(&ratings(&[30, 20]));

    assert_eq!(result.eligibility, TdiuEligibility::EligibleExtraschedular);
    assert_eq!(result.pathway, Some(TdiuPathway::Extraschedular));
    assert!(result.eligibility.is_eligible());
    assert!(result.forms.iter().any(|form| form == "VA Form 21-4138"));
}

#[test]
fn low_ratings_are_ineligible() {
    let result = check_tdiu(&ratings(&[20, 10]));

    assert_eq!(result.eligibility, TdiuEligibility::Ineligible);
    assert_eq!(result.pathway, None);
    assert!(result.forms.is_empty());
    assert!(result.explanation.contains("30%"));
}

#[test]
fn empty_ratings_explain_absence() {
    let result = check_tdiu(&[]);

    assert!(!result.eligibility.is_eligible());
    assert_eq!(result.pathway, None);
    assert!(result.explanation.contains("No ratings provided"));
}

#[test]
fn first_highest_rating_is_named() {
    let result = check_tdiu(&[rating("First", 60), rating("Second", 60)]);

    assert!(result.explanation.starts_with("First"));
}
