use std::sync::{Arc, Mutex};

use crate::matching::{
    CoercionDiagnostics, CoercionFailure, MatchEngine, ProfileField, ProfileNormalizer,
    ProfileOptions, RawValue, StudentProfile, Track,
};

/// Diagnostics sink that keeps every failure for later assertions.
#[derive(Default, Clone)]
pub(super) struct RecordingDiagnostics {
    failures: Arc<Mutex<Vec<CoercionFailure>>>,
}

impl CoercionDiagnostics for RecordingDiagnostics {
    fn coercion_failed(&self, failure: &CoercionFailure) {
        self.failures
            .lock()
            .expect("diagnostics mutex poisoned")
            .push(failure.clone());
    }
}

impl RecordingDiagnostics {
    pub(super) fn failures(&self) -> Vec<CoercionFailure> {
        self.failures
            .lock()
            .expect("diagnostics mutex poisoned")
            .clone()
    }

    pub(super) fn fields(&self) -> Vec<ProfileField> {
        self.failures()
            .into_iter()
            .map(|failure| failure.field)
            .collect()
    }
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::standard()
}

pub(super) fn recording_normalizer() -> (ProfileNormalizer<RecordingDiagnostics>, RecordingDiagnostics)
{
    let diagnostics = RecordingDiagnostics::default();
    (
        ProfileNormalizer::with_diagnostics(diagnostics.clone()),
        diagnostics,
    )
}

pub(super) fn university_profile(
    academic_percentage: f64,
    gaokao_score: Option<i64>,
    ielts_score: Option<f64>,
) -> StudentProfile {
    StudentProfile {
        academic_percentage,
        gaokao_score,
        ielts_score,
        ..StudentProfile::new(Track::UniversityApplication)
    }
}

pub(super) fn school_profile(
    academic_percentage: f64,
    has_international_school_experience: bool,
    budget_per_year: f64,
) -> StudentProfile {
    StudentProfile {
        academic_percentage,
        has_international_school_experience,
        budget_per_year,
        ..StudentProfile::new(Track::InternationalSchool)
    }
}

pub(super) fn options_with(track: Track, values: &[(ProfileField, RawValue)]) -> ProfileOptions {
    values
        .iter()
        .cloned()
        .fold(ProfileOptions::new(track), |options, (field, value)| {
            options.with(field, value)
        })
}

pub(super) fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}
