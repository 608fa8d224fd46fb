//! Rule engine that matches a student profile to a set of universities (with an
//! enrollment pathway for private-tier matches) or international schools.
//!
//! The engine in [`matching`] is pure: it never performs I/O and never fails. The
//! [`intake`] and [`summary`] modules sit on either side of it and translate record-store
//! data in and match records out.

pub mod config;
pub mod error;
pub mod intake;
pub mod matching;
pub mod summary;
pub mod telemetry;

pub use matching::{
    match_student, InternationalSchoolMatch, MatchEngine, MatchResult, Pathway, ProfileOptions,
    RawValue, StudentProfile, Track, UniversityMatch,
};
pub use summary::{match_summary, MatchReport};
