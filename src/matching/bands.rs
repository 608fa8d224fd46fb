use serde::Serialize;

/// Numeric threshold range. Each variant states its own boundary inclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Band {
    /// `value > min`
    Above { min: f64 },
    /// `value >= min`
    AtLeast { min: f64 },
    /// `value < max`
    Below { max: f64 },
    /// `min <= value <= max`
    Closed { min: f64, max: f64 },
    /// `min <= value < max`
    HalfOpen { min: f64, max: f64 },
}

impl Band {
    pub const fn above(min: f64) -> Self {
        Self::Above { min }
    }

    pub const fn at_least(min: f64) -> Self {
        Self::AtLeast { min }
    }

    pub const fn below(max: f64) -> Self {
        Self::Below { max }
    }

    pub const fn closed(min: f64, max: f64) -> Self {
        Self::Closed { min, max }
    }

    pub const fn half_open(min: f64, max: f64) -> Self {
        Self::HalfOpen { min, max }
    }

    pub fn contains(self, value: f64) -> bool {
        match self {
            Self::Above { min } => value > min,
            Self::AtLeast { min } => value >= min,
            Self::Below { max } => value < max,
            Self::Closed { min, max } => min <= value && value <= max,
            Self::HalfOpen { min, max } => min <= value && value < max,
        }
    }

    /// Absent scores never fall inside a band.
    pub fn contains_score<T>(self, score: Option<T>) -> bool
    where
        T: Into<ScoreValue>,
    {
        score.is_some_and(|score| self.contains(score.into().0))
    }
}

/// Widening wrapper so integer and float scores share one band check.
#[derive(Debug, Clone, Copy)]
pub struct ScoreValue(pub f64);

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i64> for ScoreValue {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}
