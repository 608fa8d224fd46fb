//! Student-to-institution matching rules.
//!
//! Evaluation is a pure function of the normalized profile: the normalizer coerces raw
//! inputs (reporting failures through an injected diagnostics sink), then the track decides
//! whether the university ladder or the international-school bands classify the profile.

mod bands;
mod domain;
mod international;
mod normalizer;
mod pathway;
mod tiers;

#[cfg(test)]
mod tests;

pub use bands::Band;
pub use domain::{
    InternationalSchoolMatch, MatchResult, Pathway, StudentProfile, Track, UniversityMatch,
};
pub use international::{
    SchoolBand, SchoolBandKind, SchoolBands, ACCESSIBLE_SCHOOLS, MID_RANGE_SCHOOLS,
    PREMIER_SCHOOLS,
};
pub use normalizer::{
    CoercionDiagnostics, CoercionFailure, Fallback, ProfileField, ProfileNormalizer,
    ProfileOptions, RawValue, TracingDiagnostics,
};
pub use pathway::{LanguageSignals, PathwayRule, PathwayRules};
pub use tiers::{
    AcademicRequirement, LanguageRequirement, TierKind, UniversityLadder, UniversityTier,
    ENTRY_PRIVATE_UNIVERSITIES, MIDDLE_PRIVATE_UNIVERSITIES, PUBLIC_UNIVERSITIES,
    TOP_PUBLIC_UNIVERSITIES, UPPER_PRIVATE_UNIVERSITIES,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stateless matcher combining the normalizer with the university and school rule tables.
#[derive(Debug, Clone)]
pub struct MatchEngine<D = TracingDiagnostics> {
    normalizer: ProfileNormalizer<D>,
    universities: UniversityLadder,
    schools: SchoolBands,
}

impl MatchEngine<TracingDiagnostics> {
    pub fn standard() -> Self {
        Self::with_diagnostics(TracingDiagnostics)
    }
}

impl Default for MatchEngine<TracingDiagnostics> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<D: CoercionDiagnostics> MatchEngine<D> {
    pub fn with_diagnostics(diagnostics: D) -> Self {
        Self {
            normalizer: ProfileNormalizer::with_diagnostics(diagnostics),
            universities: UniversityLadder::standard(),
            schools: SchoolBands::standard(),
        }
    }

    pub fn universities(&self) -> &UniversityLadder {
        &self.universities
    }

    pub fn schools(&self) -> &SchoolBands {
        &self.schools
    }

    pub fn normalize(&self, options: &ProfileOptions) -> StudentProfile {
        self.normalizer.normalize(options)
    }

    /// Classify a normalized profile on its own track.
    pub fn evaluate(&self, profile: &StudentProfile) -> MatchResult {
        match profile.track {
            Track::UniversityApplication => {
                MatchResult::University(self.universities.classify(profile))
            }
            Track::InternationalSchool => {
                MatchResult::InternationalSchool(self.schools.classify(profile))
            }
        }
    }

    pub fn match_options(&self, options: &ProfileOptions) -> MatchResult {
        let profile = self.normalize(options);
        self.evaluate(&profile)
    }

    /// Evaluate each profile independently. Output order follows input order.
    pub fn evaluate_batch(&self, profiles: &[StudentProfile]) -> Vec<MatchResult> {
        #[cfg(feature = "parallel")]
        {
            profiles
                .par_iter()
                .map(|profile| self.evaluate(profile))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            profiles
                .iter()
                .map(|profile| self.evaluate(profile))
                .collect()
        }
    }
}

/// Normalize and classify with the standard tables, logging coercion failures via tracing.
pub fn match_student(options: &ProfileOptions) -> MatchResult {
    MatchEngine::standard().match_options(options)
}
