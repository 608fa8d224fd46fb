use super::bands::Band;
use super::domain::{InternationalSchoolMatch, StudentProfile};
use serde::Serialize;
use tracing::debug;

pub const PREMIER_SCHOOLS: &[&str] = &[
    "United World College",
    "Tanglin Trust School",
    "Singapore American School",
    "Dulwich College",
    "North London Collegiate School",
];

pub const MID_RANGE_SCHOOLS: &[&str] = &[
    "Stamford American International School",
    "Canadian International School",
    "NPS International School",
    "Australian International School",
    "Brighton College",
    "Dover Court International School",
];

pub const ACCESSIBLE_SCHOOLS: &[&str] = &[
    "EtonHouse International School",
    "Middleton International School",
    "Invictus International School",
    "Overseas Family School",
    "Leishi International School",
    "Global Indian International School",
    "One World International School",
    "Hwa Chong International School",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolBandKind {
    Premier,
    MidRange,
    Accessible,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolBand {
    pub kind: SchoolBandKind,
    pub percentage: Band,
    /// International-school experience substitutes for the percentage condition.
    pub experience_qualifies: bool,
    pub budget: Band,
    pub schools: &'static [&'static str],
}

impl SchoolBand {
    pub fn admits(&self, profile: &StudentProfile) -> bool {
        let academic = self.percentage.contains(profile.academic_percentage)
            || (self.experience_qualifies && profile.has_international_school_experience);
        academic && self.budget.contains(profile.budget_per_year)
    }
}

/// International-school bands, tested top-down. Percentages in (50, 70] with a budget outside
/// [50000, 90000], and budgets in (90000, 100000), fall through every band.
#[derive(Debug, Clone)]
pub struct SchoolBands {
    bands: Vec<SchoolBand>,
}

impl SchoolBands {
    pub fn standard() -> Self {
        Self {
            bands: vec![
                SchoolBand {
                    kind: SchoolBandKind::Premier,
                    percentage: Band::above(70.0),
                    experience_qualifies: true,
                    budget: Band::at_least(100_000.0),
                    schools: PREMIER_SCHOOLS,
                },
                SchoolBand {
                    kind: SchoolBandKind::MidRange,
                    percentage: Band::above(50.0),
                    experience_qualifies: false,
                    budget: Band::closed(50_000.0, 90_000.0),
                    schools: MID_RANGE_SCHOOLS,
                },
                SchoolBand {
                    kind: SchoolBandKind::Accessible,
                    percentage: Band::below(50.0),
                    experience_qualifies: false,
                    budget: Band::below(50_000.0),
                    schools: ACCESSIBLE_SCHOOLS,
                },
            ],
        }
    }

    pub fn bands(&self) -> &[SchoolBand] {
        &self.bands
    }

    pub fn classify(&self, profile: &StudentProfile) -> InternationalSchoolMatch {
        let band = self.bands.iter().find(|band| band.admits(profile));
        debug!(band = ?band.map(|band| band.kind), "international school classification");

        InternationalSchoolMatch {
            matched_international_schools: band
                .map(|band| band.schools.iter().map(|name| name.to_string()).collect())
                .unwrap_or_default(),
        }
    }
}

impl Default for SchoolBands {
    fn default() -> Self {
        Self::standard()
    }
}
