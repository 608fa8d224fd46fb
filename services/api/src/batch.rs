use clap::Args;
use school_match::config::AppConfig;
use school_match::error::AppError;
use school_match::intake::{ImportOutcome, ProfileImporter, RejectedRecord};
use school_match::matching::{CoercionDiagnostics, MatchEngine, ProfileOptions, RawValue, Track};
use school_match::summary::MatchReport;
use school_match::telemetry::{self, LogTarget};
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;

/// Evaluated batch: one report per accepted record plus the rejected records.
#[derive(Debug, Default, Serialize)]
pub(crate) struct BatchReport {
    pub(crate) matches: Vec<MatchReport>,
    pub(crate) rejected: Vec<RejectedRecord>,
}

pub(crate) fn evaluate_outcome<D: CoercionDiagnostics>(
    engine: &MatchEngine<D>,
    outcome: ImportOutcome,
) -> BatchReport {
    let ImportOutcome { profiles, rejected } = outcome;
    let normalized: Vec<_> = profiles
        .iter()
        .map(|imported| engine.normalize(&imported.options))
        .collect();
    let results = engine.evaluate_batch(&normalized);

    let matches = profiles
        .into_iter()
        .zip(results)
        .map(|(imported, result)| MatchReport::new(imported.record, result))
        .collect();

    BatchReport { matches, rejected }
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Application track ("university application" or "international school")
    #[arg(long, value_parser = parse_track)]
    pub(crate) track: Track,
    /// Academic score as a percentage, "%" allowed
    #[arg(long)]
    pub(crate) academic_percentage: Option<String>,
    #[arg(long)]
    pub(crate) gaokao_score: Option<String>,
    #[arg(long)]
    pub(crate) ielts_score: Option<String>,
    #[arg(long)]
    pub(crate) toefl_score: Option<String>,
    #[arg(long)]
    pub(crate) det_score: Option<String>,
    /// Passed the school-administered language test
    #[arg(long)]
    pub(crate) language_pass: bool,
    #[arg(long)]
    pub(crate) high_school_cert: bool,
    #[arg(long)]
    pub(crate) international_experience: bool,
    /// Annual budget in the local currency
    #[arg(long)]
    pub(crate) budget_per_year: Option<String>,
    /// Print the full match record as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl MatchArgs {
    pub(crate) fn options(&self) -> ProfileOptions {
        ProfileOptions {
            track: self.track,
            academic_percentage: self.academic_percentage.as_deref().map(RawValue::text),
            gaokao_score: self.gaokao_score.as_deref().map(RawValue::text),
            ielts_score: self.ielts_score.as_deref().map(RawValue::text),
            toefl_score: self.toefl_score.as_deref().map(RawValue::text),
            det_score: self.det_score.as_deref().map(RawValue::text),
            language_pass: flag(self.language_pass),
            has_high_school_cert: flag(self.high_school_cert),
            has_international_school_experience: flag(self.international_experience),
            budget_per_year: self.budget_per_year.as_deref().map(RawValue::text),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one student per row
    #[arg(long, conflicts_with = "records", required_unless_present = "records")]
    pub(crate) csv: Option<PathBuf>,
    /// JSON listing of record-store items
    #[arg(long)]
    pub(crate) records: Option<PathBuf>,
    /// Print the batch report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    init_cli_logging()?;

    let engine = MatchEngine::standard();
    let result = engine.match_options(&args.options());
    let report = MatchReport::new("cli", result);

    if args.json {
        let payload = json!({ "result": report.result, "summary": report.summary });
        println!("{}", to_pretty_json(&payload)?);
    } else {
        println!("{}", report.summary);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    init_cli_logging()?;

    let importer = ProfileImporter::new();
    let outcome = match (args.csv, args.records) {
        (Some(path), _) => importer.from_path(path)?,
        (None, Some(path)) => importer.records_from_json(File::open(path)?)?,
        (None, None) => ImportOutcome::default(),
    };

    let report = evaluate_outcome(&MatchEngine::standard(), outcome);

    if args.json {
        println!("{}", to_pretty_json(&report)?);
        return Ok(());
    }

    println!(
        "Evaluated {} students ({} rejected)",
        report.matches.len(),
        report.rejected.len()
    );
    for matched in &report.matches {
        println!("  {}: {}", matched.source, matched.summary);
    }
    for rejected in &report.rejected {
        println!("  {}: rejected ({})", rejected.record, rejected.reason);
    }

    Ok(())
}

fn init_cli_logging() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogTarget::Stderr)?;
    Ok(())
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn flag(set: bool) -> Option<RawValue> {
    set.then_some(RawValue::Bool(true))
}

fn parse_track(raw: &str) -> Result<Track, String> {
    Track::from_label(raw).ok_or_else(|| format!("unrecognized track '{raw}'"))
}
