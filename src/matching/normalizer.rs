use super::domain::{StudentProfile, Track};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Scalar as delivered by a caller or a record store, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for text that is empty once trimmed.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Recognized profile inputs. Only these keys are accepted; anything absent stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOptions {
    pub track: Track,
    #[serde(default)]
    pub academic_percentage: Option<RawValue>,
    #[serde(default)]
    pub gaokao_score: Option<RawValue>,
    #[serde(default)]
    pub ielts_score: Option<RawValue>,
    #[serde(default)]
    pub toefl_score: Option<RawValue>,
    #[serde(default)]
    pub det_score: Option<RawValue>,
    #[serde(default)]
    pub language_pass: Option<RawValue>,
    #[serde(default)]
    pub has_high_school_cert: Option<RawValue>,
    #[serde(default)]
    pub has_international_school_experience: Option<RawValue>,
    #[serde(default)]
    pub budget_per_year: Option<RawValue>,
}

impl ProfileOptions {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            academic_percentage: None,
            gaokao_score: None,
            ielts_score: None,
            toefl_score: None,
            det_score: None,
            language_pass: None,
            has_high_school_cert: None,
            has_international_school_experience: None,
            budget_per_year: None,
        }
    }

    /// Raw value for a field; `None` for the typed track field.
    pub fn get(&self, field: ProfileField) -> Option<&RawValue> {
        self.slot(field).and_then(|slot| slot.as_ref())
    }

    /// Assign a raw value. Returns `false` for the track field, which is typed.
    pub fn set(&mut self, field: ProfileField, value: Option<RawValue>) -> bool {
        match self.slot_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn with(mut self, field: ProfileField, value: impl Into<RawValue>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    fn slot(&self, field: ProfileField) -> Option<&Option<RawValue>> {
        match field {
            ProfileField::Track => None,
            ProfileField::AcademicPercentage => Some(&self.academic_percentage),
            ProfileField::GaokaoScore => Some(&self.gaokao_score),
            ProfileField::IeltsScore => Some(&self.ielts_score),
            ProfileField::ToeflScore => Some(&self.toefl_score),
            ProfileField::DetScore => Some(&self.det_score),
            ProfileField::LanguagePass => Some(&self.language_pass),
            ProfileField::HasHighSchoolCert => Some(&self.has_high_school_cert),
            ProfileField::HasInternationalSchoolExperience => {
                Some(&self.has_international_school_experience)
            }
            ProfileField::BudgetPerYear => Some(&self.budget_per_year),
        }
    }

    fn slot_mut(&mut self, field: ProfileField) -> Option<&mut Option<RawValue>> {
        match field {
            ProfileField::Track => None,
            ProfileField::AcademicPercentage => Some(&mut self.academic_percentage),
            ProfileField::GaokaoScore => Some(&mut self.gaokao_score),
            ProfileField::IeltsScore => Some(&mut self.ielts_score),
            ProfileField::ToeflScore => Some(&mut self.toefl_score),
            ProfileField::DetScore => Some(&mut self.det_score),
            ProfileField::LanguagePass => Some(&mut self.language_pass),
            ProfileField::HasHighSchoolCert => Some(&mut self.has_high_school_cert),
            ProfileField::HasInternationalSchoolExperience => {
                Some(&mut self.has_international_school_experience)
            }
            ProfileField::BudgetPerYear => Some(&mut self.budget_per_year),
        }
    }
}

/// Named profile inputs, shared by the normalizer and the record-store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Track,
    AcademicPercentage,
    GaokaoScore,
    IeltsScore,
    ToeflScore,
    DetScore,
    LanguagePass,
    HasHighSchoolCert,
    HasInternationalSchoolExperience,
    BudgetPerYear,
}

impl ProfileField {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Track,
            Self::AcademicPercentage,
            Self::GaokaoScore,
            Self::IeltsScore,
            Self::ToeflScore,
            Self::DetScore,
            Self::LanguagePass,
            Self::HasHighSchoolCert,
            Self::HasInternationalSchoolExperience,
            Self::BudgetPerYear,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::AcademicPercentage => "academic_percentage",
            Self::GaokaoScore => "gaokao_score",
            Self::IeltsScore => "ielts_score",
            Self::ToeflScore => "toefl_score",
            Self::DetScore => "det_score",
            Self::LanguagePass => "language_pass",
            Self::HasHighSchoolCert => "has_high_school_cert",
            Self::HasInternationalSchoolExperience => "has_international_school_experience",
            Self::BudgetPerYear => "budget_per_year",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value substituted when coercion fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Zero,
    Absent,
    False,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Zero => f.write_str("0"),
            Fallback::Absent => f.write_str("none"),
            Fallback::False => f.write_str("false"),
        }
    }
}

/// A raw value that could not be coerced, and what replaced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionFailure {
    pub field: ProfileField,
    pub raw: RawValue,
    pub fallback: Fallback,
}

/// Receives coercion diagnostics. Implementations must tolerate concurrent calls.
pub trait CoercionDiagnostics: Send + Sync {
    fn coercion_failed(&self, failure: &CoercionFailure);
}

/// Default sink: one `warn` event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl CoercionDiagnostics for TracingDiagnostics {
    fn coercion_failed(&self, failure: &CoercionFailure) {
        warn!(
            field = %failure.field,
            raw = %failure.raw,
            fallback = %failure.fallback,
            "could not coerce profile field; substituting default"
        );
    }
}

impl<T: CoercionDiagnostics + ?Sized> CoercionDiagnostics for std::sync::Arc<T> {
    fn coercion_failed(&self, failure: &CoercionFailure) {
        (**self).coercion_failed(failure)
    }
}

/// Coerces `ProfileOptions` into a `StudentProfile`. Never fails.
#[derive(Debug, Clone, Default)]
pub struct ProfileNormalizer<D = TracingDiagnostics> {
    diagnostics: D,
}

impl ProfileNormalizer<TracingDiagnostics> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: CoercionDiagnostics> ProfileNormalizer<D> {
    pub fn with_diagnostics(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn normalize(&self, options: &ProfileOptions) -> StudentProfile {
        let profile = StudentProfile {
            track: options.track,
            academic_percentage: self
                .coerce_float(ProfileField::AcademicPercentage, Fallback::Zero, options)
                .unwrap_or(0.0),
            gaokao_score: self.coerce_integer(ProfileField::GaokaoScore, options),
            ielts_score: self.coerce_float(ProfileField::IeltsScore, Fallback::Absent, options),
            toefl_score: self.coerce_integer(ProfileField::ToeflScore, options),
            det_score: self.coerce_integer(ProfileField::DetScore, options),
            language_pass: self.coerce_flag(ProfileField::LanguagePass, options),
            has_high_school_cert: self.coerce_flag(ProfileField::HasHighSchoolCert, options),
            has_international_school_experience: self
                .coerce_flag(ProfileField::HasInternationalSchoolExperience, options),
            budget_per_year: self
                .coerce_float(ProfileField::BudgetPerYear, Fallback::Zero, options)
                .unwrap_or(0.0),
        };

        debug!(
            track = %profile.track,
            academic_percentage = profile.academic_percentage,
            gaokao_score = ?profile.gaokao_score,
            ielts_score = ?profile.ielts_score,
            toefl_score = ?profile.toefl_score,
            det_score = ?profile.det_score,
            budget_per_year = profile.budget_per_year,
            "normalized student profile"
        );

        profile
    }

    fn coerce_float(
        &self,
        field: ProfileField,
        fallback: Fallback,
        options: &ProfileOptions,
    ) -> Option<f64> {
        let raw = options.get(field)?;
        let parsed = match raw {
            RawValue::Number(value) => Some(*value),
            RawValue::Text(text) if field == ProfileField::AcademicPercentage => {
                text.replace('%', "").trim().parse::<f64>().ok()
            }
            RawValue::Text(text) => text.trim().parse::<f64>().ok(),
            RawValue::Bool(_) => None,
        };

        match parsed.filter(|value| value.is_finite()) {
            Some(value) => Some(value),
            None => {
                self.report(field, raw, fallback);
                None
            }
        }
    }

    fn coerce_integer(&self, field: ProfileField, options: &ProfileOptions) -> Option<i64> {
        let raw = options.get(field)?;
        let parsed = match raw {
            RawValue::Number(value) if value.is_finite() => Some(value.trunc() as i64),
            RawValue::Number(_) | RawValue::Bool(_) => None,
            RawValue::Text(text) => text.trim().parse::<i64>().ok(),
        };

        if parsed.is_none() {
            self.report(field, raw, Fallback::Absent);
        }
        parsed
    }

    fn coerce_flag(&self, field: ProfileField, options: &ProfileOptions) -> bool {
        let Some(raw) = options.get(field) else {
            return false;
        };

        match raw {
            RawValue::Bool(value) => *value,
            RawValue::Number(value) => *value != 0.0,
            RawValue::Text(text) => match parse_flag(text) {
                Some(value) => value,
                None => {
                    self.report(field, raw, Fallback::False);
                    false
                }
            },
        }
    }

    fn report(&self, field: ProfileField, raw: &RawValue, fallback: Fallback) {
        self.diagnostics.coercion_failed(&CoercionFailure {
            field,
            raw: raw.clone(),
            fallback,
        });
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "是" | "通过" | "有" => Some(true),
        "false" | "no" | "n" | "0" | "" | "否" | "未通过" | "无" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_flag_for_tests(text: &str) -> Option<bool> {
    parse_flag(text)
}
