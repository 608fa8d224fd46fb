use super::bands::Band;
use super::domain::{StudentProfile, UniversityMatch};
use super::pathway::PathwayRules;
use serde::Serialize;
use tracing::debug;

pub const TOP_PUBLIC_UNIVERSITIES: &[&str] = &[
    "National University of Singapore",
    "Nanyang Technological University",
];

pub const PUBLIC_UNIVERSITIES: &[&str] = &[
    "Singapore Management University",
    "Singapore University of Technology and Design",
];

pub const UPPER_PRIVATE_UNIVERSITIES: &[&str] = &[
    "University of Birmingham",
    "RMIT University",
    "University College Dublin",
];

pub const MIDDLE_PRIVATE_UNIVERSITIES: &[&str] = &[
    "University of Wollongong",
    "University of Newcastle",
    "Curtin University",
    "Massey University",
    "La Trobe University",
];

pub const ENTRY_PRIVATE_UNIVERSITIES: &[&str] = &[
    "Coventry University",
    "Murdoch University",
    "Northumbria University",
    "University of Stirling",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    TopPublic,
    Public,
    UpperPrivate,
    MiddlePrivate,
    EntryPrivate,
}

impl TierKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::TopPublic,
            Self::Public,
            Self::UpperPrivate,
            Self::MiddlePrivate,
            Self::EntryPrivate,
        ]
    }

    pub const fn rank(self) -> u8 {
        match self {
            Self::TopPublic => 1,
            Self::Public => 2,
            Self::UpperPrivate => 3,
            Self::MiddlePrivate => 4,
            Self::EntryPrivate => 5,
        }
    }

    pub const fn is_private(self) -> bool {
        matches!(
            self,
            Self::UpperPrivate | Self::MiddlePrivate | Self::EntryPrivate
        )
    }
}

/// Academic entry condition: either the percentage or the gaokao score may qualify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcademicRequirement {
    pub percentage: Band,
    pub gaokao: Band,
}

impl AcademicRequirement {
    pub fn is_met(&self, profile: &StudentProfile) -> bool {
        self.percentage.contains(profile.academic_percentage)
            || self.gaokao.contains_score(profile.gaokao_score)
    }
}

/// Language entry condition: any one qualifying test score suffices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguageRequirement {
    pub ielts: Band,
    pub toefl: Band,
    pub det: Band,
}

impl LanguageRequirement {
    pub fn is_met(&self, profile: &StudentProfile) -> bool {
        self.ielts.contains_score(profile.ielts_score)
            || self.toefl.contains_score(profile.toefl_score)
            || self.det.contains_score(profile.det_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityTier {
    pub kind: TierKind,
    pub academic: AcademicRequirement,
    pub language: Option<LanguageRequirement>,
    pub institutions: &'static [&'static str],
}

impl UniversityTier {
    /// Academic and language conditions together; no language condition means academic alone.
    pub fn admits(&self, profile: &StudentProfile) -> bool {
        self.academic.is_met(profile)
            && self
                .language
                .as_ref()
                .map_or(true, |language| language.is_met(profile))
    }

    pub fn assigns_pathway(&self) -> bool {
        self.kind.is_private()
    }
}

/// Ordered tier table. Every tier is tested in turn; a tier whose academic condition holds
/// but whose language condition fails does not stop the walk.
#[derive(Debug, Clone)]
pub struct UniversityLadder {
    tiers: Vec<UniversityTier>,
    pathways: PathwayRules,
}

impl UniversityLadder {
    pub fn standard() -> Self {
        Self {
            tiers: standard_tiers(),
            pathways: PathwayRules::standard(),
        }
    }

    pub fn tiers(&self) -> &[UniversityTier] {
        &self.tiers
    }

    pub fn tier(&self, kind: TierKind) -> Option<&UniversityTier> {
        self.tiers.iter().find(|tier| tier.kind == kind)
    }

    /// First tier admitting the profile, if any.
    pub fn admitting_tier(&self, profile: &StudentProfile) -> Option<&UniversityTier> {
        self.tiers.iter().find(|tier| tier.admits(profile))
    }

    pub fn classify(&self, profile: &StudentProfile) -> UniversityMatch {
        let Some(tier) = self.admitting_tier(profile) else {
            debug!("no university tier admits profile");
            return UniversityMatch::unmatched();
        };

        let path_to_university = if tier.assigns_pathway() {
            Some(self.pathways.determine(profile))
        } else {
            None
        };

        debug!(
            tier = tier.kind.rank(),
            pathway = ?path_to_university,
            "university tier matched"
        );

        UniversityMatch {
            matched_universities: tier.institutions.iter().map(|name| name.to_string()).collect(),
            path_to_university,
        }
    }
}

impl Default for UniversityLadder {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_tiers() -> Vec<UniversityTier> {
    vec![
        UniversityTier {
            kind: TierKind::TopPublic,
            academic: AcademicRequirement {
                percentage: Band::above(80.0),
                gaokao: Band::above(600.0),
            },
            language: Some(LanguageRequirement {
                ielts: Band::closed(6.5, 9.0),
                toefl: Band::closed(79.0, 120.0),
                det: Band::at_least(105.0),
            }),
            institutions: TOP_PUBLIC_UNIVERSITIES,
        },
        UniversityTier {
            kind: TierKind::Public,
            academic: AcademicRequirement {
                percentage: Band::closed(75.0, 80.0),
                gaokao: Band::closed(520.0, 600.0),
            },
            language: Some(LanguageRequirement {
                ielts: Band::closed(6.0, 9.0),
                toefl: Band::closed(60.0, 120.0),
                det: Band::at_least(95.0),
            }),
            institutions: PUBLIC_UNIVERSITIES,
        },
        UniversityTier {
            kind: TierKind::UpperPrivate,
            academic: AcademicRequirement {
                percentage: Band::half_open(70.0, 75.0),
                gaokao: Band::half_open(450.0, 520.0),
            },
            language: None,
            institutions: UPPER_PRIVATE_UNIVERSITIES,
        },
        UniversityTier {
            kind: TierKind::MiddlePrivate,
            academic: AcademicRequirement {
                percentage: Band::half_open(65.0, 70.0),
                gaokao: Band::half_open(400.0, 450.0),
            },
            language: None,
            institutions: MIDDLE_PRIVATE_UNIVERSITIES,
        },
        UniversityTier {
            kind: TierKind::EntryPrivate,
            academic: AcademicRequirement {
                percentage: Band::half_open(60.0, 65.0),
                gaokao: Band::half_open(350.0, 400.0),
            },
            language: None,
            institutions: ENTRY_PRIVATE_UNIVERSITIES,
        },
    ]
}
