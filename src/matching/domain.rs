use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Application type selected by the student. Deserializes from any label
/// [`Track::from_label`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    UniversityApplication,
    InternationalSchool,
}

impl Track {
    pub const fn label(self) -> &'static str {
        match self {
            Self::UniversityApplication => "university application",
            Self::InternationalSchool => "international school",
        }
    }

    /// Resolve a free-text track label as it appears in record-store exports.
    pub fn from_label(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ");
        match normalized.as_str() {
            "university application" | "university" | "undergraduate" | "申请私立大学本科"
            | "大学" => Some(Self::UniversityApplication),
            "international school" | "国际学校" => Some(Self::InternationalSchool),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Track {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Track::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized track '{label}'")))
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Profile after every raw field has been coerced to its target type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub track: Track,
    pub academic_percentage: f64,
    pub gaokao_score: Option<i64>,
    pub ielts_score: Option<f64>,
    pub toefl_score: Option<i64>,
    pub det_score: Option<i64>,
    pub language_pass: bool,
    pub has_high_school_cert: bool,
    pub has_international_school_experience: bool,
    pub budget_per_year: f64,
}

impl StudentProfile {
    /// Empty profile on the given track; every score absent, every flag false.
    pub fn new(track: Track) -> Self {
        Self {
            track,
            academic_percentage: 0.0,
            gaokao_score: None,
            ielts_score: None,
            toefl_score: None,
            det_score: None,
            language_pass: false,
            has_high_school_cert: false,
            has_international_school_experience: false,
            budget_per_year: 0.0,
        }
    }
}

/// Enrollment route assigned to private-tier university matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pathway {
    #[serde(rename = "language-bridge then foundation program")]
    LanguageBridgeThenFoundation,
    #[serde(rename = "language-bridge then international-freshman program")]
    LanguageBridgeThenInternationalFreshman,
    #[serde(rename = "foundation program")]
    Foundation,
    #[serde(rename = "international-freshman program")]
    InternationalFreshman,
}

impl Pathway {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LanguageBridgeThenFoundation => "language-bridge then foundation program",
            Self::LanguageBridgeThenInternationalFreshman => {
                "language-bridge then international-freshman program"
            }
            Self::Foundation => "foundation program",
            Self::InternationalFreshman => "international-freshman program",
        }
    }
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// University-track outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityMatch {
    pub matched_universities: Vec<String>,
    /// Outer `None`: no pathway field at all (public tier or no match).
    /// `Some(None)`: private tier whose pathway rules produced nothing.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "pathway_field"
    )]
    pub path_to_university: Option<Option<Pathway>>,
}

impl UniversityMatch {
    pub fn unmatched() -> Self {
        Self {
            matched_universities: Vec::new(),
            path_to_university: None,
        }
    }

    pub fn pathway(&self) -> Option<Pathway> {
        self.path_to_university.flatten()
    }
}

/// International-school-track outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalSchoolMatch {
    pub matched_international_schools: Vec<String>,
}

/// Result of one evaluation. Exactly one institution list exists, selected by track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchResult {
    University(UniversityMatch),
    InternationalSchool(InternationalSchoolMatch),
}

impl MatchResult {
    pub fn track(&self) -> Track {
        match self {
            Self::University(_) => Track::UniversityApplication,
            Self::InternationalSchool(_) => Track::InternationalSchool,
        }
    }

    /// Matched institution names regardless of track.
    pub fn institutions(&self) -> &[String] {
        match self {
            Self::University(matched) => &matched.matched_universities,
            Self::InternationalSchool(matched) => &matched.matched_international_schools,
        }
    }

    pub fn pathway(&self) -> Option<Pathway> {
        match self {
            Self::University(matched) => matched.pathway(),
            Self::InternationalSchool(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.institutions().is_empty()
    }
}

// serde's default Option handling collapses `Some(None)` into an absent field on the way
// back in, so the double option needs an explicit mapping.
mod pathway_field {
    use super::Pathway;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S>(
        value: &Option<Option<Pathway>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<Option<Option<Pathway>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Pathway>::deserialize(deserializer).map(Some)
    }
}
