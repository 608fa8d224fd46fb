use super::mapping::{column_target, ColumnTarget};
use super::IntakeError;
use crate::matching::{ProfileField, RawValue};
use std::collections::BTreeMap;
use std::io::Read;

/// One CSV data row, keyed by the profile fields its columns resolved to.
#[derive(Debug)]
pub(crate) struct CsvRow {
    pub(crate) name: String,
    pub(crate) values: BTreeMap<ProfileField, RawValue>,
}

/// Parse every data row. With a `limit`, parsing stops at the first row beyond it.
pub(crate) fn parse_rows<R: Read>(
    reader: R,
    limit: Option<usize>,
) -> Result<Vec<CsvRow>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let targets: Vec<Option<ColumnTarget>> = csv_reader
        .headers()?
        .iter()
        .map(column_target)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        if let Some(limit) = limit.filter(|limit| index >= *limit) {
            return Err(IntakeError::TooManyRecords { limit });
        }
        let record = record?;
        let mut name = None;
        let mut values = BTreeMap::new();

        for (cell, target) in record.iter().zip(&targets) {
            if cell.is_empty() {
                continue;
            }
            match target {
                Some(ColumnTarget::RecordId) => name = Some(cell.to_string()),
                Some(ColumnTarget::Field(field)) => {
                    values.insert(*field, RawValue::text(cell));
                }
                None => {}
            }
        }

        rows.push(CsvRow {
            name: name.unwrap_or_else(|| format!("row-{}", index + 1)),
            values,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rows_pick_up_known_columns_and_ignore_the_rest() {
        let csv = "Student ID,Track,Academic Score,Notes,IELTS\ns-1,university,85%,keen,7.0\n";
        let rows = parse_rows(Cursor::new(csv), None).expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "s-1");
        assert_eq!(
            rows[0].values.get(&ProfileField::AcademicPercentage),
            Some(&RawValue::text("85%"))
        );
        assert_eq!(
            rows[0].values.get(&ProfileField::IeltsScore),
            Some(&RawValue::text("7.0"))
        );
        assert_eq!(rows[0].values.len(), 3);
    }

    #[test]
    fn unnamed_rows_are_numbered_and_blank_cells_skipped() {
        let csv = "track,academic_percentage,gaokao_score\nuniversity,72,\ninternational school,65\n";
        let rows = parse_rows(Cursor::new(csv), None).expect("parse");

        assert_eq!(rows[0].name, "row-1");
        assert!(!rows[0].values.contains_key(&ProfileField::GaokaoScore));
        assert_eq!(rows[1].name, "row-2");
        assert_eq!(rows[1].values.len(), 2);
    }

    #[test]
    fn row_limit_stops_parsing_past_the_limit() {
        let csv = "track,academic_percentage\nuniversity,70\nuniversity,71\nuniversity,72\n";

        assert_eq!(parse_rows(Cursor::new(csv), Some(3)).expect("parse").len(), 3);
        assert!(matches!(
            parse_rows(Cursor::new(csv), Some(2)),
            Err(IntakeError::TooManyRecords { limit: 2 })
        ));
    }
}
