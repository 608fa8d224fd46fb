use super::common::*;
use crate::matching::{Pathway, PathwayRules};

fn rules() -> PathwayRules {
    PathwayRules::standard()
}

#[test]
fn weak_language_without_certificate_goes_through_bridge_and_foundation() {
    let profile = university_profile(72.0, None, Some(5.0));

    assert_eq!(
        rules().determine(&profile),
        Some(Pathway::LanguageBridgeThenFoundation)
    );
}

#[test]
fn failed_school_test_counts_as_weak_language_despite_scores() {
    let mut profile = university_profile(72.0, None, Some(7.5));
    profile.has_high_school_cert = true;

    assert_eq!(
        rules().determine(&profile),
        Some(Pathway::LanguageBridgeThenInternationalFreshman)
    );
}

#[test]
fn medium_language_without_certificate_goes_to_foundation() {
    let mut profile = university_profile(72.0, None, Some(5.5));
    profile.language_pass = true;

    assert_eq!(rules().determine(&profile), Some(Pathway::Foundation));
}

#[test]
fn strong_language_with_certificate_goes_to_international_freshman() {
    let mut profile = university_profile(72.0, None, None);
    profile.toefl_score = Some(95);
    profile.language_pass = true;
    profile.has_high_school_cert = true;

    assert_eq!(
        rules().determine(&profile),
        Some(Pathway::InternationalFreshman)
    );
}

#[test]
fn weak_rule_wins_when_det_overlaps_strong_band() {
    let mut profile = university_profile(72.0, None, None);
    profile.det_score = Some(97);
    profile.language_pass = true;
    profile.has_high_school_cert = true;

    assert_eq!(
        rules().determine(&profile),
        Some(Pathway::LanguageBridgeThenInternationalFreshman)
    );
}

#[test]
fn every_pass_and_certificate_combination_yields_a_pathway() {
    // any profile that escapes the weak rules has language_pass set, which satisfies
    // both remaining rules
    for language_pass in [false, true] {
        for has_high_school_cert in [false, true] {
            for ielts_score in [None, Some(4.0), Some(5.5), Some(6.5)] {
                let mut profile = university_profile(65.0, None, ielts_score);
                profile.language_pass = language_pass;
                profile.has_high_school_cert = has_high_school_cert;

                assert!(
                    rules().determine(&profile).is_some(),
                    "no pathway for pass={language_pass} cert={has_high_school_cert} ielts={ielts_score:?}"
                );
            }
        }
    }
}

#[test]
fn standard_rules_are_ordered_weak_medium_strong() {
    let pathways: Vec<Pathway> = rules().rules().iter().map(|rule| rule.pathway).collect();
    assert_eq!(
        pathways,
        vec![
            Pathway::LanguageBridgeThenFoundation,
            Pathway::LanguageBridgeThenInternationalFreshman,
            Pathway::Foundation,
            Pathway::InternationalFreshman,
        ]
    );
}
