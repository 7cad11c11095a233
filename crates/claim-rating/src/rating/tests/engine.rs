use super::common::*;
use crate::rating::engine::{ClaimProfile, RatingEngine};
use crate::rating::intake::IntakeGuard;
use crate::rating::rates::Cents;
use crate::rating::service::ClaimServiceError;
use crate::rating::smc::SmcAwardType;
use crate::rating::tdiu::{TdiuEligibility, TdiuPathway};

#[test]
fn assessment_runs_every_stage() {
    let profile = IntakeGuard::default()
        .profile_from_submission(submission())
        .expect("valid submission");

    let assessment = RatingEngine::new(rates()).assess(&profile);

    assert_eq!(assessment.rating.combined, 70);
    // 1716.28 base, 145.00 spouse, 97.00 first child
    assert_eq!(assessment.compensation.monthly, Cents(195_828));
    assert_eq!(assessment.tdiu.eligibility, TdiuEligibility::Eligible);
    assert_eq!(
        assessment.tdiu.pathway,
        Some(TdiuPathway::CombinedConditions)
    );
    assert!(assessment.smc.is_empty());
    // 28 + 20 + 0 + 12 + 4
    assert_eq!(assessment.score.total, 64);
}

#[test]
fn empty_profile_assesses_to_zero() {
    let assessment = RatingEngine::default().assess(&ClaimProfile::default());

    assert_eq!(assessment.rating.combined, 0);
    assert_eq!(assessment.compensation.monthly, Cents::ZERO);
    assert_eq!(assessment.tdiu.eligibility, TdiuEligibility::Ineligible);
    assert!(assessment.smc.is_empty());
    assert_eq!(assessment.score.total, 0);
}

#[test]
fn assessment_is_recomputed_identically() {
    let profile = IntakeGuard::default()
        .profile_from_submission(submission())
        .expect("valid submission");
    let engine = RatingEngine::default();

    assert_eq!(engine.assess(&profile), engine.assess(&profile));
}

#[test]
fn catalog_claim_applies_bilateral_and_triggers() {
    let service = build_service();

    let assessment = service
        .assess_catalog(&catalog_submission())
        .expect("catalog claim");

    assert_eq!(assessment.rating.bilateral_factor, 4);
    assert_eq!(assessment.rating.combined, 50);
    assert_eq!(assessment.smc.len(), 1);
    assert_eq!(assessment.smc[0].award_type, SmcAwardType::K);
    assert_eq!(
        assessment.tdiu.eligibility,
        TdiuEligibility::EligibleExtraschedular
    );
}

#[test]
fn free_form_loss_of_use_fires_k_award() {
    let service = build_service();
    let mut claim = submission();
    claim
        .conditions
        .push(selection("hand", "Loss of use of right hand", 40));

    let assessment = service.assess(claim).expect("valid claim");

    assert_eq!(assessment.smc.len(), 1);
    assert_eq!(assessment.smc[0].award_type, SmcAwardType::K);
    assert_eq!(assessment.smc[0].amount, rates().smc.k);
    assert_eq!(
        assessment.smc[0].conditions,
        vec!["Loss of use of right hand".to_string()]
    );
}

#[test]
fn service_surfaces_intake_errors() {
    let service = build_service();
    let mut claim = submission();
    claim.conditions[0].value = 55;

    match service.assess(claim) {
        Err(ClaimServiceError::Intake(error)) => {
            assert!(error.to_string().contains("55%"));
        }
        other => panic!("expected intake error, got {other:?}"),
    }
}
