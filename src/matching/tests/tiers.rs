use super::common::*;
use crate::matching::{
    MatchResult, Pathway, StudentProfile, TierKind, UniversityLadder, ENTRY_PRIVATE_UNIVERSITIES,
    MIDDLE_PRIVATE_UNIVERSITIES, PUBLIC_UNIVERSITIES, TOP_PUBLIC_UNIVERSITIES,
    UPPER_PRIVATE_UNIVERSITIES,
};

#[test]
fn ladder_lists_five_tiers_in_descending_order() {
    let ladder = UniversityLadder::standard();
    let kinds: Vec<TierKind> = ladder.tiers().iter().map(|tier| tier.kind).collect();
    assert_eq!(kinds, TierKind::ordered().to_vec());

    let private: Vec<bool> = ladder
        .tiers()
        .iter()
        .map(|tier| tier.assigns_pathway())
        .collect();
    assert_eq!(private, vec![false, false, true, true, true]);

    let upper = ladder.tier(TierKind::UpperPrivate).expect("tier 3 present");
    assert_eq!(upper.institutions.len(), 3);
    assert!(upper.language.is_none());
}

#[test]
fn strong_student_matches_top_public_without_pathway() {
    let mut profile = university_profile(85.0, Some(650), Some(7.0));
    profile.language_pass = true;
    profile.has_high_school_cert = true;

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(TOP_PUBLIC_UNIVERSITIES));
    assert_eq!(outcome.path_to_university, None);
}

#[test]
fn mid_band_student_matches_public_tier() {
    let profile = university_profile(78.0, Some(550), Some(6.5));

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(PUBLIC_UNIVERSITIES));
    assert_eq!(outcome.path_to_university, None);
}

#[test]
fn toefl_and_det_scores_qualify_for_top_public() {
    let mut profile = university_profile(82.0, None, None);
    profile.toefl_score = Some(90);
    profile.det_score = Some(110);

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(TOP_PUBLIC_UNIVERSITIES));
}

#[test]
fn upper_private_tier_assigns_language_bridge_pathway() {
    let mut profile = university_profile(72.0, Some(470), Some(5.0));
    profile.has_high_school_cert = true;

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(UPPER_PRIVATE_UNIVERSITIES));
    assert_eq!(
        outcome.pathway(),
        Some(Pathway::LanguageBridgeThenInternationalFreshman)
    );
}

#[test]
fn middle_private_tier_assigns_international_freshman_pathway() {
    let mut profile = university_profile(67.0, Some(430), Some(6.5));
    profile.language_pass = true;
    profile.has_high_school_cert = true;

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(MIDDLE_PRIVATE_UNIVERSITIES));
    assert_eq!(outcome.pathway(), Some(Pathway::InternationalFreshman));
}

#[test]
fn entry_private_tier_matches_on_gaokao_alone() {
    let profile = university_profile(0.0, Some(375), None);

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(ENTRY_PRIVATE_UNIVERSITIES));
    assert_eq!(
        outcome.pathway(),
        Some(Pathway::LanguageBridgeThenFoundation)
    );
}

#[test]
fn low_scores_match_nothing() {
    let profile = university_profile(45.0, Some(300), None);

    let outcome = UniversityLadder::standard().classify(&profile);

    assert!(outcome.matched_universities.is_empty());
    assert_eq!(outcome.path_to_university, None);
}

#[test]
fn percentage_of_exactly_eighty_is_public_not_top_public() {
    let profile = university_profile(80.0, None, Some(7.0));

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(PUBLIC_UNIVERSITIES));
}

#[test]
fn high_academic_without_language_keeps_testing_lower_tiers() {
    // gaokao clears the top tier academically but no language score qualifies anywhere
    let profile = university_profile(72.0, Some(650), None);

    let ladder = UniversityLadder::standard();
    let top = ladder.tier(TierKind::TopPublic).expect("tier 1 present");
    assert!(top.academic.is_met(&profile));
    assert!(!top.admits(&profile));

    let outcome = ladder.classify(&profile);
    assert_eq!(outcome.matched_universities, names(UPPER_PRIVATE_UNIVERSITIES));
    assert!(outcome.path_to_university.is_some());
}

#[test]
fn high_percentage_without_language_falls_through_to_no_match() {
    let profile = university_profile(85.0, None, None);

    let outcome = UniversityLadder::standard().classify(&profile);

    assert!(outcome.matched_universities.is_empty());
    assert_eq!(outcome.path_to_university, None);
}

#[test]
fn top_tier_language_miss_can_still_clear_public_tier() {
    let mut profile = university_profile(78.0, Some(610), None);
    profile.toefl_score = Some(70);

    let outcome = UniversityLadder::standard().classify(&profile);

    assert_eq!(outcome.matched_universities, names(PUBLIC_UNIVERSITIES));
}

#[test]
fn engine_evaluation_is_deterministic() {
    let engine = engine();
    let mut profile = university_profile(72.0, Some(470), Some(5.0));
    profile.has_high_school_cert = true;

    let first = engine.evaluate(&profile);
    let second = engine.evaluate(&profile);

    assert_eq!(first, second);
    match first {
        MatchResult::University(matched) => {
            assert_eq!(matched.matched_universities.len(), 3);
        }
        other => panic!("expected university result, got {other:?}"),
    }
}

fn scored_profile(
    academic_percentage: f64,
    gaokao_score: Option<i64>,
    toefl_score: Option<i64>,
    det_score: Option<i64>,
) -> StudentProfile {
    StudentProfile {
        toefl_score,
        det_score,
        ..university_profile(academic_percentage, gaokao_score, None)
    }
}

#[test]
fn standard_tiers_honor_their_boundary_values() {
    use TierKind::*;

    let cases: &[(f64, Option<i64>, Option<i64>, Option<i64>, Option<TierKind>)] = &[
        // gaokao must exceed 600 for the top tier
        (0.0, Some(600), Some(79), None, Some(Public)),
        (0.0, Some(601), None, Some(105), Some(TopPublic)),
        (0.0, Some(601), Some(78), None, None),
        // top-tier language floors: TOEFL 79, DET 105
        (81.0, Some(600), Some(79), None, Some(TopPublic)),
        (81.0, Some(600), Some(78), None, Some(Public)),
        (81.0, Some(600), None, Some(105), Some(TopPublic)),
        (81.0, Some(600), None, Some(104), Some(Public)),
        // public-tier language floors: TOEFL 60, DET 95
        (0.0, Some(520), Some(60), None, Some(Public)),
        (0.0, Some(520), Some(59), None, None),
        (0.0, Some(520), None, Some(95), Some(Public)),
        (0.0, Some(520), None, Some(94), None),
        (80.0, None, Some(60), None, Some(Public)),
        (75.0, None, Some(60), None, Some(Public)),
        // private tiers: inclusive lower ends, exclusive upper ends
        (75.0, None, None, None, None),
        (74.99, None, None, None, Some(UpperPrivate)),
        (70.0, None, None, None, Some(UpperPrivate)),
        (69.99, None, None, None, Some(MiddlePrivate)),
        (65.0, None, None, None, Some(MiddlePrivate)),
        (64.99, None, None, None, Some(EntryPrivate)),
        (60.0, None, None, None, Some(EntryPrivate)),
        (59.99, None, None, None, None),
        (0.0, Some(520), None, None, None),
        (0.0, Some(519), None, None, Some(UpperPrivate)),
        (0.0, Some(450), None, None, Some(UpperPrivate)),
        (0.0, Some(449), None, None, Some(MiddlePrivate)),
        (0.0, Some(400), None, None, Some(MiddlePrivate)),
        (0.0, Some(399), None, None, Some(EntryPrivate)),
        (0.0, Some(350), None, None, Some(EntryPrivate)),
        (0.0, Some(349), None, None, None),
    ];

    let ladder = UniversityLadder::standard();
    for &(percentage, gaokao, toefl, det, expected) in cases {
        let profile = scored_profile(percentage, gaokao, toefl, det);
        let admitted = ladder.admitting_tier(&profile).map(|tier| tier.kind);
        assert_eq!(
            admitted, expected,
            "percentage={percentage} gaokao={gaokao:?} toefl={toefl:?} det={det:?}"
        );

        let matched = ladder.classify(&profile).matched_universities.len();
        let expected_len = expected
            .and_then(|kind| ladder.tier(kind))
            .map_or(0, |tier| tier.institutions.len());
        assert_eq!(matched, expected_len);
    }
}
