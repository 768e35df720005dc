//! Exam report assembly for the rendering layer.
//!
//! The assembler only decides *what* is printed: rows, reference text and
//! indicator geometry. Text layout and drawing belong to the renderer.

mod assembler;

pub use assembler::*;

use serde::{Deserialize, Serialize};

use crate::evaluate::BarDimensions;
use crate::models::{is_blank, IndicatorGeometry, ParameterKey, Section, Species, Status};

/// Report format version.
pub const REPORT_FORMAT_VERSION: &str = "1.0";

/// Report configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Indicator bar size in pixels
    pub bar: BarDimensions,
    /// Identifier of the clinic/system printed in report metadata
    pub system_id: Option<String>,
}

impl ReportConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One printed value with its reference text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportLine {
    /// Value as typed plus unit; empty when nothing was entered
    pub value: String,
    /// Reference text, or "N/A" when no range applies
    pub reference: String,
}

impl ReportLine {
    pub(crate) fn new(raw: Option<&str>, unit: &str, reference: Option<String>) -> Self {
        let value = match raw {
            Some(raw) if !is_blank(Some(raw)) => format!("{} {}", raw.trim(), unit),
            _ => String::new(),
        };

        Self {
            value,
            reference: reference.unwrap_or_else(|| NO_REFERENCE.to_string()),
        }
    }
}

/// One parameter in the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    pub key: ParameterKey,
    /// Printed label
    pub label: String,
    /// Parsed driving value (absolute count for dual parameters)
    pub value: Option<f64>,
    /// Status of the driving value
    pub status: Status,
    /// One line for single parameters; relative then absolute for dual ones
    pub lines: Vec<ReportLine>,
    /// Indicator bar, when the driving value could be placed
    pub geometry: Option<IndicatorGeometry>,
}

/// A clinical section and its rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSection {
    pub section: Section,
    pub title: String,
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Unique report identifier
    pub report_id: String,
    /// Report format version
    pub format_version: String,
    /// Generation timestamp
    pub generated_at: String,
    pub species: Species,
    /// Digest of the reference table used
    pub reference_digest: String,
    /// Generating system identifier
    pub system_id: Option<String>,
}

impl ReportMetadata {
    pub(crate) fn new(
        species: Species,
        reference_digest: String,
        system_id: Option<String>,
    ) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            format_version: REPORT_FORMAT_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            species,
            reference_digest,
            system_id,
        }
    }
}

/// Assembled lab report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabReport {
    pub metadata: ReportMetadata,
    pub sections: Vec<ReportSection>,
}

impl LabReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// All rows in report order.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    /// Rows whose value is above or below its range.
    pub fn flagged_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows().filter(|row| row.status.is_flagged())
    }

    pub fn section(&self, section: Section) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.section == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LabResults;
    use crate::reference::ReferenceTable;

    fn sample_report() -> LabReport {
        let table = ReferenceTable::builtin();
        let results = LabResults::new()
            .with_single(ParameterKey::Eritrocitos, "6.2")
            .with_single(ParameterKey::LeucocitosTotais, "20.0")
            .with_dual(ParameterKey::Segmentados, Some("70"), Some("2.500,0"))
            .with_single(ParameterKey::Plaquetas, "");
        ReportAssembler::new(&table).assemble(&results, Species::Dog)
    }

    #[test]
    fn test_metadata() {
        let table = ReferenceTable::builtin();
        let report = sample_report();

        assert_eq!(report.metadata.format_version, REPORT_FORMAT_VERSION);
        assert_eq!(report.metadata.species, Species::Dog);
        assert_eq!(report.metadata.reference_digest, table.digest());
        assert_eq!(report.metadata.report_id.len(), 36); // UUID format
        assert!(report.metadata.system_id.is_none());
    }

    #[test]
    fn test_flagged_rows() {
        let report = sample_report();

        let flagged: Vec<_> = report.flagged_rows().map(|r| (r.key, r.status)).collect();
        assert_eq!(
            flagged,
            vec![
                (ParameterKey::LeucocitosTotais, Status::High),
                (ParameterKey::Segmentados, Status::Low),
            ]
        );
        assert_eq!(report.rows().count(), 3);
        assert!(report.section(Section::Platelets).unwrap().is_empty());
    }

    #[test]
    fn test_to_json() {
        let report = sample_report();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"Leucograma\""));
        assert!(json.contains("\"white_cell_series\""));
        let parsed: LabReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_config_defaults() {
        let config = ReportConfig::from_json("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.bar.width, 120.0);
        assert_eq!(config.bar.height, 8.0);

        let config = ReportConfig::from_json(r#"{"bar":{"width":200},"system_id":"clinic-01"}"#)
            .unwrap();
        assert_eq!(config.bar.width, 200.0);
        assert_eq!(config.bar.height, 8.0);
        assert_eq!(config.system_id.as_deref(), Some("clinic-01"));
    }

    #[test]
    fn test_report_line_formatting() {
        let line = ReportLine::new(Some(" 14,2 "), "g/dL", Some("12 - 18".into()));
        assert_eq!(line.value, "14,2 g/dL");
        assert_eq!(line.reference, "12 - 18");

        let line = ReportLine::new(None, "%", None);
        assert_eq!(line.value, "");
        assert_eq!(line.reference, NO_REFERENCE);
    }
}
