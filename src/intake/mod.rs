//! Record-store boundary: CSV exports and record-store items in, [`ProfileOptions`] out.

mod fields;
mod mapping;
mod parser;
mod record;

pub use fields::flatten_field;
pub use record::{FieldMapping, StudentRecord};

use crate::matching::{ProfileField, ProfileOptions, RawValue, Track};
use serde::{Serialize, Serializer};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use record::RecordBatch;

/// Fields a record must carry before it is evaluated.
pub const REQUIRED_FIELDS: [ProfileField; 2] =
    [ProfileField::Track, ProfileField::AcademicPercentage];

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read student export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid student CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid student records payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("required field `{field}` is missing or blank")]
    MissingRequiredField { field: ProfileField },
    #[error("unrecognized track '{label}'")]
    UnknownTrack { label: String },
    #[error("export holds more than {limit} student records")]
    TooManyRecords { limit: usize },
}

impl IntakeError {
    /// Rejections concern a single record; the other variants abort the whole import.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            IntakeError::MissingRequiredField { .. } | IntakeError::UnknownTrack { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedProfile {
    pub record: String,
    pub options: ProfileOptions,
}

#[derive(Debug, Serialize)]
pub struct RejectedRecord {
    pub record: String,
    #[serde(serialize_with = "reason_text")]
    pub reason: IntakeError,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportOutcome {
    pub profiles: Vec<ImportedProfile>,
    pub rejected: Vec<RejectedRecord>,
}

impl ImportOutcome {
    fn push(&mut self, record: String, options: Result<ProfileOptions, IntakeError>) {
        match options {
            Ok(options) => self.profiles.push(ImportedProfile { record, options }),
            Err(reason) => {
                warn!(record = %record, reason = %reason, "student record rejected");
                self.rejected.push(RejectedRecord { record, reason });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileImporter {
    mapping: FieldMapping,
}

impl ProfileImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field identifiers used when reading record-store items. CSV columns resolve through
    /// the header alias table instead.
    pub fn with_mapping(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<ImportOutcome, IntakeError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<ImportOutcome, IntakeError> {
        self.import_csv(reader, None)
    }

    /// Like [`from_reader`](Self::from_reader), but fails with
    /// [`IntakeError::TooManyRecords`] as soon as a row beyond `limit` is reached.
    pub fn from_reader_limited<R: Read>(
        &self,
        reader: R,
        limit: usize,
    ) -> Result<ImportOutcome, IntakeError> {
        self.import_csv(reader, Some(limit))
    }

    fn import_csv<R: Read>(
        &self,
        reader: R,
        limit: Option<usize>,
    ) -> Result<ImportOutcome, IntakeError> {
        let mut outcome = ImportOutcome::default();
        for row in parser::parse_rows(reader, limit)? {
            let options = build_options(|field| row.values.get(&field).cloned());
            outcome.push(row.name, options);
        }

        debug!(
            accepted = outcome.profiles.len(),
            rejected = outcome.rejected.len(),
            "student CSV imported"
        );
        Ok(outcome)
    }

    pub fn from_records(&self, records: &[StudentRecord]) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();
        for (index, record) in records.iter().enumerate() {
            let name = record
                .item_id
                .clone()
                .unwrap_or_else(|| format!("item-{}", index + 1));
            let options = build_options(|field| record.raw(&self.mapping, field));
            outcome.push(name, options);
        }
        outcome
    }

    /// Parse a record-store listing, either a bare JSON array or an object with `items`.
    pub fn records_from_json<R: Read>(&self, reader: R) -> Result<ImportOutcome, IntakeError> {
        let batch: RecordBatch = serde_json::from_reader(reader)?;
        Ok(self.from_records(&batch.into_records()))
    }
}

fn build_options<F>(lookup: F) -> Result<ProfileOptions, IntakeError>
where
    F: Fn(ProfileField) -> Option<RawValue>,
{
    for field in REQUIRED_FIELDS {
        if lookup(field).map_or(true, |value| value.is_blank()) {
            return Err(IntakeError::MissingRequiredField { field });
        }
    }

    let label = lookup(ProfileField::Track)
        .map(|value| value.to_string())
        .unwrap_or_default();
    let Some(track) = Track::from_label(&label) else {
        return Err(IntakeError::UnknownTrack { label });
    };

    let mut options = ProfileOptions::new(track);
    for field in ProfileField::ordered() {
        if field != ProfileField::Track {
            options.set(field, lookup(field));
        }
    }
    Ok(options)
}

fn reason_text<S: Serializer>(reason: &IntakeError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn csv_rows_become_options_or_rejections() {
        let csv = "\
student_id,track,academic_percentage,ielts_score,has_high_school_cert
s-1,university,85%,7.0,yes
s-2,international school,,,
s-3,graduate school,70,,
";
        let outcome = ProfileImporter::new()
            .from_reader(Cursor::new(csv))
            .expect("import");

        assert_eq!(outcome.profiles.len(), 1);
        let imported = &outcome.profiles[0];
        assert_eq!(imported.record, "s-1");
        assert_eq!(imported.options.track, Track::UniversityApplication);
        assert_eq!(imported.options.ielts_score, Some(RawValue::text("7.0")));
        assert_eq!(imported.options.has_high_school_cert, Some(RawValue::text("yes")));

        assert_eq!(outcome.rejected.len(), 2);
        assert!(matches!(
            outcome.rejected[0].reason,
            IntakeError::MissingRequiredField {
                field: ProfileField::AcademicPercentage
            }
        ));
        assert!(matches!(
            &outcome.rejected[1].reason,
            IntakeError::UnknownTrack { label } if label == "graduate school"
        ));
    }

    #[test]
    fn record_store_items_use_the_field_mapping() {
        let importer = ProfileImporter::with_mapping(FieldMapping::record_store_labels());
        let payload = json!({
            "items": [
                {
                    "item_id": 101,
                    "fields": {
                        "申请类型": { "id": 2, "text": "国际学校" },
                        "学术成绩": "75",
                        "年度预算": 120000,
                        "有国际学校经验": [{ "name": "是" }]
                    }
                },
                { "fields": { "学术成绩": "80" } }
            ]
        });

        let outcome = importer
            .records_from_json(Cursor::new(payload.to_string()))
            .expect("import");

        assert_eq!(outcome.profiles.len(), 1);
        let options = &outcome.profiles[0].options;
        assert_eq!(outcome.profiles[0].record, "101");
        assert_eq!(options.track, Track::InternationalSchool);
        assert_eq!(options.budget_per_year, Some(RawValue::Number(120_000.0)));
        assert_eq!(
            options.has_international_school_experience,
            Some(RawValue::text("是"))
        );

        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].record, "item-2");
        assert!(outcome.rejected[0].reason.is_rejection());
    }

    #[test]
    fn blank_required_values_are_rejected() {
        let record: StudentRecord = serde_json::from_value(json!({
            "item_id": "s-9",
            "fields": { "track": "university", "academic_percentage": "   " }
        }))
        .expect("record");

        let outcome = ProfileImporter::new().from_records(&[record]);
        assert!(outcome.profiles.is_empty());
        assert_eq!(
            outcome.rejected[0].reason.to_string(),
            "required field `academic_percentage` is missing or blank"
        );
    }

    #[test]
    fn limited_csv_import_refuses_oversize_exports() {
        let csv = "track,academic_percentage\nuniversity,70\nuniversity,\n";
        let importer = ProfileImporter::new();

        let outcome = importer
            .from_reader_limited(Cursor::new(csv), 2)
            .expect("within limit");
        assert_eq!(outcome.len(), 2);

        let error = importer
            .from_reader_limited(Cursor::new(csv), 1)
            .expect_err("over limit");
        assert!(matches!(error, IntakeError::TooManyRecords { limit: 1 }));
        assert!(!error.is_rejection());
    }

    #[test]
    fn malformed_payloads_abort_the_import() {
        let error = ProfileImporter::new()
            .records_from_json(Cursor::new("{\"items\": 4}"))
            .expect_err("payload rejected");
        assert!(matches!(error, IntakeError::Json(_)));
        assert!(!error.is_rejection());
    }

    #[test]
    fn rejected_records_serialize_their_reason_as_text() {
        let rejected = RejectedRecord {
            record: "row-3".to_string(),
            reason: IntakeError::UnknownTrack {
                label: "college".to_string(),
            },
        };
        let value = serde_json::to_value(&rejected).expect("serialize");
        assert_eq!(
            value,
            json!({ "record": "row-3", "reason": "unrecognized track 'college'" })
        );
    }
}
