//! Vet-Labs Core Library
//!
//! Clinical lab-result evaluation for veterinary exam reports.
//!
//! # Architecture
//!
//! ```text
//! Exam form (raw strings) + Species
//!                 │
//!                 ▼
//!         Normalization ("1.234,56" → 1234.56)
//!                 │
//!                 ▼
//!      Reference range lookup (parameter × species)
//!                 │
//!                 ▼
//!     Classification (normal / high / low / invalid)
//!                 │
//!                 ▼
//!     Indicator geometry (band + marker, clamped)
//!                 │
//!                 ▼
//!   ┌─────────────────────────────────────────────┐
//!   │ Report rows: Eritrograma │ Leucograma │ ... │
//!   └─────────────────────────────────────────────┘
//!                 │
//!                 ▼
//!        Renderer (outside this crate)
//! ```
//!
//! # Core Principle
//!
//! **Evaluation never fails.** Unusable data degrades to an `Invalid` status
//! and plain text; it never blocks the rest of the report.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Species, ParameterKey, ReferenceRange, Status, etc.)
//! - [`evaluate`]: Normalizer, classifier and indicator geometry
//! - [`reference`]: Species-specific reference table
//! - [`report`]: Report assembly and export

pub mod evaluate;
pub mod models;
pub mod reference;
pub mod report;

// Re-export commonly used types
pub use evaluate::{classify, compute_geometry, parse_lab_value, BarDimensions, Evaluator};
pub use models::{
    ClassifiedResult, IndicatorGeometry, LabResults, LabValue, ParameterKey, ReferenceRange,
    Section, Species, Status,
};
pub use reference::{ReferenceTable, ReferenceTableError};
pub use report::{LabReport, ReportAssembler, ReportConfig};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VetLabsError {
    #[error("Reference table error: {0}")]
    InvalidReferenceTable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ReferenceTableError> for VetLabsError {
    fn from(e: ReferenceTableError) -> Self {
        VetLabsError::InvalidReferenceTable(e.to_string())
    }
}

impl From<serde_json::Error> for VetLabsError {
    fn from(e: serde_json::Error) -> Self {
        VetLabsError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an engine with the built-in reference table.
#[uniffi::export]
pub fn create_engine() -> Arc<VetLabsEngine> {
    Arc::new(VetLabsEngine {
        table: Arc::new(ReferenceTable::builtin()),
        config: ReportConfig::default(),
    })
}

/// Create an engine from a JSON reference table and optional JSON config.
#[uniffi::export]
pub fn create_engine_from_json(
    table_json: String,
    config_json: Option<String>,
) -> Result<Arc<VetLabsEngine>, VetLabsError> {
    let table = ReferenceTable::from_json(&table_json)?;
    let config = match config_json {
        Some(json) => ReportConfig::from_json(&json)?,
        None => ReportConfig::default(),
    };
    Ok(Arc::new(VetLabsEngine {
        table: Arc::new(table),
        config,
    }))
}

/// Map an animal record's species field ("Canino", "Felino", ...) to a species key.
#[uniffi::export]
pub fn species_key(animal_species: String) -> String {
    Species::from_animal_species(&animal_species).to_string()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Shareable evaluation engine. The table is immutable, so no locking.
#[derive(uniffi::Object)]
pub struct VetLabsEngine {
    table: Arc<ReferenceTable>,
    config: ReportConfig,
}

#[uniffi::export]
impl VetLabsEngine {
    /// Digest of the reference table in use.
    pub fn reference_digest(&self) -> String {
        self.table.digest().to_string()
    }

    /// Evaluate a single raw value.
    ///
    /// Unknown parameters evaluate as invalid without a range.
    pub fn evaluate_value(
        &self,
        parameter: String,
        raw: Option<String>,
        animal_species: String,
    ) -> FfiEvaluation {
        let species = Species::from_animal_species(&animal_species);
        match parameter.parse::<ParameterKey>() {
            Ok(key) => {
                let evaluation = Evaluator::new(&self.table)
                    .with_bar(self.config.bar)
                    .evaluate(key, raw.as_deref(), species);
                FfiEvaluation {
                    value: evaluation.result.value,
                    status: evaluation.result.status.as_str().to_string(),
                    geometry: evaluation.geometry.map(Into::into),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Evaluating unknown lab parameter");
                let result = evaluate::classify_result(raw.as_deref(), None);
                FfiEvaluation {
                    value: result.value,
                    status: result.status.as_str().to_string(),
                    geometry: None,
                }
            }
        }
    }

    /// Assemble a report for the given form entries.
    pub fn assemble_report(
        &self,
        animal_species: String,
        entries: Vec<FfiLabEntry>,
    ) -> FfiLabReport {
        self.build_report(&animal_species, entries).into()
    }

    /// Assemble a report and export it as JSON.
    pub fn assemble_report_json(
        &self,
        animal_species: String,
        entries: Vec<FfiLabEntry>,
    ) -> Result<String, VetLabsError> {
        Ok(self.build_report(&animal_species, entries).to_json()?)
    }
}

impl VetLabsEngine {
    fn build_report(&self, animal_species: &str, entries: Vec<FfiLabEntry>) -> LabReport {
        let species = Species::from_animal_species(animal_species);
        let results = lab_results_from_entries(entries);
        ReportAssembler::with_config(&self.table, &self.config).assemble(&results, species)
    }
}

/// Convert FFI entries, skipping parameters the catalog does not know.
fn lab_results_from_entries(entries: Vec<FfiLabEntry>) -> LabResults {
    entries
        .into_iter()
        .filter_map(|entry| match entry.key.parse::<ParameterKey>() {
            Ok(key) => Some((key, entry.into_lab_value(key))),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping lab entry");
                None
            }
        })
        .collect()
}

// =========================================================================
// FFI-Safe Types
// =========================================================================

/// FFI-safe lab form entry.
///
/// Single parameters use `value`; dual parameters use `relative`/`absolute`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabEntry {
    pub key: String,
    pub value: Option<String>,
    pub relative: Option<String>,
    pub absolute: Option<String>,
}

impl FfiLabEntry {
    fn into_lab_value(self, key: ParameterKey) -> LabValue {
        if key.is_dual() {
            LabValue::Dual {
                relative: self.relative,
                absolute: self.absolute,
            }
        } else {
            LabValue::Single(self.value)
        }
    }
}

/// FFI-safe evaluation of one value.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEvaluation {
    pub value: Option<f64>,
    pub status: String,
    pub geometry: Option<FfiGeometry>,
}

/// FFI-safe indicator geometry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGeometry {
    pub bar_width: f64,
    pub bar_height: f64,
    pub band_left: f64,
    pub band_width: f64,
    pub marker_left: Option<f64>,
    pub marker_color: Option<String>,
}

impl From<IndicatorGeometry> for FfiGeometry {
    fn from(geometry: IndicatorGeometry) -> Self {
        Self {
            bar_width: geometry.bar_width,
            bar_height: geometry.bar_height,
            band_left: geometry.band_left,
            band_width: geometry.band_width,
            marker_left: geometry.marker.map(|m| m.left),
            marker_color: geometry.marker.map(|m| m.color.as_str().to_string()),
        }
    }
}

/// FFI-safe report line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportLine {
    pub value: String,
    pub reference: String,
}

/// FFI-safe report row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportRow {
    pub key: String,
    pub label: String,
    pub status: String,
    pub value: Option<f64>,
    pub lines: Vec<FfiReportLine>,
    pub geometry: Option<FfiGeometry>,
}

impl From<report::ReportRow> for FfiReportRow {
    fn from(row: report::ReportRow) -> Self {
        Self {
            key: row.key.as_str().to_string(),
            label: row.label,
            status: row.status.as_str().to_string(),
            value: row.value,
            lines: row
                .lines
                .into_iter()
                .map(|line| FfiReportLine {
                    value: line.value,
                    reference: line.reference,
                })
                .collect(),
            geometry: row.geometry.map(Into::into),
        }
    }
}

/// FFI-safe report section.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportSection {
    pub title: String,
    pub rows: Vec<FfiReportRow>,
}

/// FFI-safe lab report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabReport {
    pub report_id: String,
    pub generated_at: String,
    pub species: String,
    pub reference_digest: String,
    pub system_id: Option<String>,
    pub sections: Vec<FfiReportSection>,
}

impl From<LabReport> for FfiLabReport {
    fn from(report: LabReport) -> Self {
        Self {
            report_id: report.metadata.report_id,
            generated_at: report.metadata.generated_at,
            species: report.metadata.species.to_string(),
            reference_digest: report.metadata.reference_digest,
            system_id: report.metadata.system_id,
            sections: report
                .sections
                .into_iter()
                .map(|section| FfiReportSection {
                    title: section.title,
                    rows: section.rows.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }
}
