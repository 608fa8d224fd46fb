use crate::matching::MatchResult;
use serde::Serialize;

/// One-line human summary of a match, as written back to the record sink.
pub fn match_summary(result: &MatchResult) -> String {
    if result.is_empty() {
        return "no match found".to_string();
    }

    let names = result.institutions().join(", ");
    match result {
        MatchResult::University(_) => match result.pathway() {
            Some(pathway) => format!("university match: {names} - path: {pathway}"),
            None => format!("university match: {names}"),
        },
        MatchResult::InternationalSchool(_) => format!("international-school match: {names}"),
    }
}

/// Match record handed to sinks: where the profile came from, the result, and its summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub source: String,
    pub result: MatchResult,
    pub summary: String,
}

impl MatchReport {
    pub fn new(source: impl Into<String>, result: MatchResult) -> Self {
        let summary = match_summary(&result);
        Self {
            source: source.into(),
            result,
            summary,
        }
    }
}
