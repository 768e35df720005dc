//! Assembles evaluated lab values into report sections.

use crate::evaluate::Evaluator;
use crate::models::{
    LabResults, LabValue, ParameterKind, ParameterSpec, ReferenceRange, Section, Species,
};
use crate::reference::ReferenceTable;

use super::{LabReport, ReportConfig, ReportLine, ReportMetadata, ReportRow, ReportSection};

/// Reference text shown when no range applies.
pub const NO_REFERENCE: &str = "N/A";

/// Report assembler.
pub struct ReportAssembler<'a> {
    evaluator: Evaluator<'a>,
    system_id: Option<String>,
}

impl<'a> ReportAssembler<'a> {
    /// Create an assembler with default configuration.
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self::with_config(table, &ReportConfig::default())
    }

    /// Create an assembler from a report configuration.
    pub fn with_config(table: &'a ReferenceTable, config: &ReportConfig) -> Self {
        Self {
            evaluator: Evaluator::new(table).with_bar(config.bar),
            system_id: config.system_id.clone(),
        }
    }

    /// Assemble a full report with metadata.
    pub fn assemble(&self, results: &LabResults, species: Species) -> LabReport {
        let sections = self.assemble_sections(results, species);
        let report = LabReport {
            metadata: ReportMetadata::new(
                species,
                self.evaluator.table().digest().to_string(),
                self.system_id.clone(),
            ),
            sections,
        };

        tracing::debug!(
            report_id = %report.metadata.report_id,
            species = %species,
            rows = report.rows().count(),
            flagged = report.flagged_rows().count(),
            "Assembled lab report"
        );

        report
    }

    /// Assemble the three sections in report order.
    ///
    /// Deterministic: identical inputs give identical sections.
    pub fn assemble_sections(&self, results: &LabResults, species: Species) -> Vec<ReportSection> {
        Section::ALL
            .into_iter()
            .map(|section| ReportSection {
                section,
                title: section.title().to_string(),
                rows: section
                    .parameters()
                    .filter_map(|spec| {
                        let value = results.get(spec.key)?;
                        self.assemble_row(&spec, value, species)
                    })
                    .collect(),
            })
            .collect()
    }

    /// Assemble one row; `None` when the parameter should not be printed.
    pub fn assemble_row(
        &self,
        spec: &ParameterSpec,
        value: &LabValue,
        species: Species,
    ) -> Option<ReportRow> {
        if value.is_absent() {
            return None;
        }

        let range = self.evaluator.table().resolve(spec.key, species);

        match (spec.kind, value) {
            (ParameterKind::Single { unit }, LabValue::Single(raw)) => {
                let evaluation = self.evaluator.evaluate(spec.key, raw.as_deref(), species);
                let reference = match range {
                    Some(ReferenceRange::Single(single)) => single.full.clone(),
                    _ => None,
                };

                Some(ReportRow {
                    key: spec.key,
                    label: spec.label.to_string(),
                    value: evaluation.result.value,
                    status: evaluation.result.status,
                    lines: vec![ReportLine::new(raw.as_deref(), unit, reference)],
                    geometry: evaluation.geometry,
                })
            }
            (
                ParameterKind::Dual {
                    relative_unit,
                    absolute_unit,
                },
                LabValue::Dual { relative, absolute },
            ) => {
                // Status and bar follow the absolute count only.
                let evaluation = self.evaluator.evaluate(spec.key, absolute.as_deref(), species);
                let (relative_ref, absolute_ref) = match range {
                    Some(ReferenceRange::Dual(dual)) => (
                        dual.relative.as_ref().map(|band| band.text.clone()),
                        dual.absolute.as_ref().map(|band| band.text.clone()),
                    ),
                    _ => (None, None),
                };

                Some(ReportRow {
                    key: spec.key,
                    label: spec.label.to_string(),
                    value: evaluation.result.value,
                    status: evaluation.result.status,
                    lines: vec![
                        ReportLine::new(relative.as_deref(), relative_unit, relative_ref),
                        ReportLine::new(absolute.as_deref(), absolute_unit, absolute_ref),
                    ],
                    geometry: evaluation.geometry,
                })
            }
            (ParameterKind::Single { .. }, LabValue::Dual { .. })
            | (ParameterKind::Dual { .. }, LabValue::Single(_)) => {
                tracing::warn!(
                    parameter = %spec.key,
                    "Lab value shape does not match parameter kind, row skipped"
                );
                None
            }
        }
    }
}
