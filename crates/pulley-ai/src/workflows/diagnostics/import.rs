use std::io::Read;
use std::path::Path;

use serde_json::Value;

use super::domain::{Inspection, InspectionError};

#[derive(Debug, thiserror::Error)]
pub enum InspectionImportError {
    #[error("failed to read inspection file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid inspection JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid inspection CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("inspection {row} rejected: {source}")]
    Invalid {
        row: usize,
        #[source]
        source: InspectionError,
    },
}

/// Loads inspections from JSON documents or CSV exports.
pub struct InspectionImporter;

impl InspectionImporter {
    pub fn from_json_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Inspection>, InspectionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Accepts a single inspection object or an array of them.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Inspection>, InspectionImportError> {
        let document: Value = serde_json::from_reader(reader)?;
        let inspections = match document {
            Value::Array(_) => serde_json::from_value::<Vec<Inspection>>(document)?,
            other => vec![serde_json::from_value::<Inspection>(other)?],
        };
        validate_all(inspections)
    }

    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Inspection>, InspectionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Header row uses the JSON field names; empty cells are unassessed fields.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Inspection>, InspectionImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut inspections = Vec::new();
        for row in csv_reader.deserialize::<Inspection>() {
            inspections.push(row?);
        }
        validate_all(inspections)
    }
}

fn validate_all(inspections: Vec<Inspection>) -> Result<Vec<Inspection>, InspectionImportError> {
    for (index, inspection) in inspections.iter().enumerate() {
        inspection
            .validate()
            .map_err(|source| InspectionImportError::Invalid {
                row: index + 1,
                source,
            })?;
    }
    Ok(inspections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::diagnostics::domain::{BeltTracking, SurfaceWear};
    use std::io::Cursor;

    #[test]
    fn reads_single_object_or_array() {
        let single = InspectionImporter::from_json_reader(Cursor::new(r#"{"speed": 155}"#))
            .expect("single object");
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].speed, Some(155.0));

        let many = InspectionImporter::from_json_reader(Cursor::new(
            r#"[{"tension": 1600}, {}, {"surfaceWear": "light"}]"#,
        ))
        .expect("array");
        assert_eq!(many.len(), 3);
        assert!(many[1].is_empty());
        assert_eq!(many[2].surface_wear, Some(SurfaceWear::Light));
    }

    #[test]
    fn reads_csv_with_blank_cells_as_unassessed() {
        let csv = "temperature,bearingTemperature,speed,tension,surfaceWear,beltTracking,bearingCondition,lubricationStatus\n\
                   65, ,120,,severe,centered,,\n\
                   ,,,,,significant-offset,poor,critical\n";

        let inspections =
            InspectionImporter::from_csv_reader(Cursor::new(csv)).expect("csv parses");

        assert_eq!(inspections.len(), 2);
        assert_eq!(inspections[0].temperature, Some(65.0));
        assert_eq!(inspections[0].bearing_temperature, None);
        assert_eq!(inspections[0].tension, None);
        assert_eq!(inspections[0].belt_tracking, Some(BeltTracking::Centered));
        assert_eq!(inspections[1].temperature, None);
        assert_eq!(
            inspections[1].belt_tracking,
            Some(BeltTracking::SignificantOffset)
        );
    }

    #[test]
    fn csv_may_omit_columns() {
        let csv = "speed,surfaceWear\n160,moderate\n";
        let inspections =
            InspectionImporter::from_csv_reader(Cursor::new(csv)).expect("csv parses");
        assert_eq!(inspections[0].speed, Some(160.0));
        assert_eq!(inspections[0].temperature, None);
    }

    #[test]
    fn rejects_non_finite_csv_readings_with_row_number() {
        let csv = "temperature,speed\n40,100\n45,NaN\n";
        let err = InspectionImporter::from_csv_reader(Cursor::new(csv))
            .expect_err("NaN is not a reading");
        match err {
            InspectionImportError::Invalid { row, source } => {
                assert_eq!(row, 2);
                assert!(matches!(
                    source,
                    InspectionError::NonFiniteReading { field: "speed", .. }
                ));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = InspectionImporter::from_json_reader(Cursor::new(
            r#"{"lubricationStatus": "dry"}"#,
        ))
        .expect_err("unknown token");
        assert!(matches!(err, InspectionImportError::Json(_)));
    }
}
