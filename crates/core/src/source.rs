//! Admission record sources.
//!
//! The board core never queries the hospital information system itself; it asks an
//! [`AdmissionSource`] for the current batch once per cycle. Failures are returned to the caller
//! unchanged, and the core does no retrying.

use crate::admission::AdmissionRecord;
use crate::validation::validate_ward_code;
use crate::{WardError, WardResult};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Supplier of the current admissions for one ward.
///
/// Implementations must return records ordered by registration date then time, earliest first.
/// Reconciliation gives a contested bed to the first record in this order and never re-sorts,
/// so the ordering is part of the contract rather than a presentation detail.
pub trait AdmissionSource: Send + Sync {
    fn fetch(&self) -> WardResult<Vec<AdmissionRecord>>;
}

/// A fixed batch of records, returned as given on every fetch.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    records: Vec<AdmissionRecord>,
}

impl InMemorySource {
    /// The records must already follow the registration ordering contract.
    pub fn new(records: Vec<AdmissionRecord>) -> Self {
        Self { records }
    }
}

impl AdmissionSource for InMemorySource {
    fn fetch(&self) -> WardResult<Vec<AdmissionRecord>> {
        Ok(self.records.clone())
    }
}

/// Export format of an admissions file, chosen from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportFormat {
    Json,
    Yaml,
}

/// Reads a HIS export (a JSON or YAML array of rows) on every fetch.
///
/// Rows for other wards and rows with a confirmed discharge are dropped, and the rest are
/// stable-sorted by `regdate`, `regtime` with missing values last, mirroring the ordering of the
/// ward query the export comes from.
#[derive(Clone, Debug)]
pub struct FileAdmissionSource {
    path: PathBuf,
    ward: Option<String>,
    format: ExportFormat,
}

impl FileAdmissionSource {
    /// # Errors
    ///
    /// Returns `WardError::InvalidInput` if the extension is not `.json`, `.yaml` or `.yml`, or
    /// if the ward code is invalid.
    pub fn new(path: PathBuf, ward: Option<String>) -> WardResult<Self> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ExportFormat::Yaml
            }
            _ => {
                return Err(WardError::InvalidInput(format!(
                    "admissions file must be .json, .yaml or .yml: {}",
                    path.display()
                )))
            }
        };

        if let Some(code) = &ward {
            validate_ward_code(code)?;
        }

        Ok(Self { path, ward, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, text: &str) -> WardResult<Vec<AdmissionRecord>> {
        let result = match self.format {
            ExportFormat::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(text);
                serde_path_to_error::deserialize::<_, Vec<AdmissionRecord>>(&mut deserializer)
                    .map_err(|err| (err.path().to_string(), err.into_inner().to_string()))
            }
            ExportFormat::Yaml => {
                let deserializer = serde_yaml::Deserializer::from_str(text);
                serde_path_to_error::deserialize::<_, Vec<AdmissionRecord>>(deserializer)
                    .map_err(|err| (err.path().to_string(), err.into_inner().to_string()))
            }
        };

        result.map_err(|(path, message)| WardError::SourceParse {
            path: if path.is_empty() || path == "." {
                "<root>".into()
            } else {
                path
            },
            message,
        })
    }

    fn belongs_to_ward(&self, record: &AdmissionRecord) -> bool {
        match &self.ward {
            Some(code) => record.ward.as_deref().map(str::trim) == Some(code.as_str()),
            None => true,
        }
    }
}

impl AdmissionSource for FileAdmissionSource {
    fn fetch(&self) -> WardResult<Vec<AdmissionRecord>> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| WardError::SourceRead {
            path: self.path.clone(),
            source,
        })?;

        let rows = self.parse(&text)?;
        let total = rows.len();

        let mut records: Vec<AdmissionRecord> = rows
            .into_iter()
            .filter(|r| self.belongs_to_ward(r) && !r.is_discharged())
            .collect();
        records.sort_by(registration_order);

        tracing::debug!(
            path = %self.path.display(),
            rows = total,
            admitted = records.len(),
            "read admissions export"
        );

        Ok(records)
    }
}

/// Earliest registration first; rows without a date or time sort after those with one.
fn registration_order(a: &AdmissionRecord, b: &AdmissionRecord) -> Ordering {
    fn key(r: &AdmissionRecord) -> (bool, Option<&str>, bool, Option<&str>) {
        (
            r.regdate.is_none(),
            r.regdate.as_deref(),
            r.regtime.is_none(),
            r.regtime.as_deref(),
        )
    }
    key(a).cmp(&key(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).expect("write export");
        path
    }

    fn names(records: &[AdmissionRecord]) -> Vec<&str> {
        records
            .iter()
            .filter_map(|r| r.patient_name.as_deref())
            .collect()
    }

    #[test]
    fn in_memory_source_returns_records_as_given() {
        let source = InMemorySource::new(vec![
            AdmissionRecord {
                patient_name: Some("b".into()),
                ..Default::default()
            },
            AdmissionRecord {
                patient_name: Some("a".into()),
                ..Default::default()
            },
        ]);
        let records = source.fetch().expect("fetch");
        assert_eq!(names(&records), vec!["b", "a"]);
    }

    #[test]
    fn json_export_is_filtered_and_ordered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "admissions.json",
            r#"[
  {"ward": "07", "patient_name": "late", "regdate": "2026-10-02", "regtime": "08:00:00"},
  {"ward": "07", "patient_name": "undated"},
  {"ward": "07", "patient_name": "early", "regdate": "2026-10-01", "regtime": "23:10:00"},
  {"ward": "07", "patient_name": "same-day", "regdate": "2026-10-02", "regtime": "07:30:00"},
  {"ward": "08", "patient_name": "other ward", "regdate": "2026-09-01"},
  {"ward": "07", "patient_name": "gone", "regdate": "2026-09-01", "confirm_discharge": "Y"}
]"#,
        );

        let source = FileAdmissionSource::new(path, Some("07".into())).expect("source");
        let records = source.fetch().expect("fetch");
        assert_eq!(names(&records), vec!["early", "same-day", "late", "undated"]);
    }

    #[test]
    fn equal_registration_keeps_export_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "admissions.json",
            r#"[
  {"patient_name": "one", "regdate": "2026-10-01", "regtime": "09:00:00"},
  {"patient_name": "two", "regdate": "2026-10-01", "regtime": "09:00:00"}
]"#,
        );

        let source = FileAdmissionSource::new(path, None).expect("source");
        assert_eq!(names(&source.fetch().expect("fetch")), vec!["one", "two"]);
    }

    #[test]
    fn yaml_export_is_supported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "admissions.yml",
            "- bedno: s1\n  patient_name: X\n  age_y: 40\n- bedno: 3\n  patient_name: Y\n",
        );

        let records = FileAdmissionSource::new(path, None)
            .expect("source")
            .fetch()
            .expect("fetch");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bedno.as_deref(), Some("s1"));
        assert_eq!(records[0].age_y, Some(40));
        assert_eq!(records[1].bedno.as_deref(), Some("3"));
    }

    #[test]
    fn malformed_cells_do_not_drop_the_batch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "admissions.json",
            r#"[
  {"patient_name": "ok", "bw": "61.5000"},
  {"patient_name": "odd", "age_y": "forty", "bw": "unknown"},
  {"patient_name": "last", "age_y": 70}
]"#,
        );

        let records = FileAdmissionSource::new(path, None)
            .expect("source")
            .fetch()
            .expect("fetch");
        assert_eq!(names(&records), vec!["ok", "odd", "last"]);
        assert_eq!(records[0].bw, Some(61.5));
        assert!(records[1].age_y.is_none());
        assert!(records[1].bw.is_none());
        assert_eq!(records[2].age_y, Some(70));
    }

    #[test]
    fn structural_errors_report_the_failing_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "admissions.json",
            r#"[{"patient_name": "ok"}, "not a row"]"#,
        );

        let err = FileAdmissionSource::new(path, None)
            .expect("source")
            .fetch()
            .expect_err("bad row");
        match err {
            WardError::SourceParse { path, .. } => assert!(path.contains('1'), "{path}"),
            other => panic!("expected SourceParse, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source =
            FileAdmissionSource::new(dir.path().join("absent.json"), None).expect("source");
        assert!(matches!(
            source.fetch().expect_err("missing"),
            WardError::SourceRead { .. }
        ));
    }

    #[test]
    fn rejects_unknown_extensions_and_bad_ward_codes() {
        assert!(FileAdmissionSource::new(PathBuf::from("rows.csv"), None).is_err());
        assert!(FileAdmissionSource::new(PathBuf::from("rows.json"), Some("0 7".into())).is_err());
    }
}
