use super::bands::Band;
use super::domain::{Pathway, StudentProfile};
use serde::Serialize;

/// Language readiness signals. Each set is satisfied by any one score band, or by the
/// school-administered test result matching `language_pass`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguageSignals {
    pub ielts: Band,
    pub toefl: Band,
    pub det: Band,
    pub language_pass: bool,
}

impl LanguageSignals {
    pub fn is_met(&self, profile: &StudentProfile) -> bool {
        self.ielts.contains_score(profile.ielts_score)
            || self.toefl.contains_score(profile.toefl_score)
            || self.det.contains_score(profile.det_score)
            || profile.language_pass == self.language_pass
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathwayRule {
    pub language: LanguageSignals,
    pub requires_certificate: bool,
    pub pathway: Pathway,
}

impl PathwayRule {
    pub fn applies(&self, profile: &StudentProfile) -> bool {
        self.language.is_met(profile) && profile.has_high_school_cert == self.requires_certificate
    }
}

/// Ordered pathway rules for private-tier matches; first applicable rule wins.
#[derive(Debug, Clone)]
pub struct PathwayRules {
    rules: Vec<PathwayRule>,
}

impl PathwayRules {
    pub fn standard() -> Self {
        let weak = LanguageSignals {
            ielts: Band::below(5.5),
            toefl: Band::below(59.0),
            det: Band::below(100.0),
            language_pass: false,
        };
        let medium = LanguageSignals {
            ielts: Band::closed(5.5, 5.5),
            toefl: Band::half_open(46.0, 59.0),
            det: Band::half_open(85.0, 100.0),
            language_pass: true,
        };
        let strong = LanguageSignals {
            ielts: Band::closed(6.0, 9.0),
            toefl: Band::closed(60.0, 120.0),
            det: Band::at_least(95.0),
            language_pass: true,
        };

        Self {
            rules: vec![
                PathwayRule {
                    language: weak,
                    requires_certificate: false,
                    pathway: Pathway::LanguageBridgeThenFoundation,
                },
                PathwayRule {
                    language: weak,
                    requires_certificate: true,
                    pathway: Pathway::LanguageBridgeThenInternationalFreshman,
                },
                PathwayRule {
                    language: medium,
                    requires_certificate: false,
                    pathway: Pathway::Foundation,
                },
                PathwayRule {
                    language: strong,
                    requires_certificate: true,
                    pathway: Pathway::InternationalFreshman,
                },
            ],
        }
    }

    pub fn rules(&self) -> &[PathwayRule] {
        &self.rules
    }

    pub fn determine(&self, profile: &StudentProfile) -> Option<Pathway> {
        self.rules
            .iter()
            .find(|rule| rule.applies(profile))
            .map(|rule| rule.pathway)
    }
}

impl Default for PathwayRules {
    fn default() -> Self {
        Self::standard()
    }
}
