//! Lab value evaluation.
//!
//! Pipeline: Normalization → Range Resolution → Classification → Geometry

mod classifier;
mod geometry;
mod normalizer;

pub use classifier::*;
pub use geometry::*;
pub use normalizer::*;

use crate::models::{is_blank, ClassifiedResult, IndicatorGeometry, ParameterKey, Species};
use crate::reference::ReferenceTable;

/// Outcome of evaluating one driving value.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: ClassifiedResult,
    /// Present only when the value parses and the range has both bounds
    pub geometry: Option<IndicatorGeometry>,
}

/// Evaluator that runs the full pipeline against one reference table.
pub struct Evaluator<'a> {
    table: &'a ReferenceTable,
    bar: BarDimensions,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with the default bar size.
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self {
            table,
            bar: BarDimensions::default(),
        }
    }

    /// Use a custom bar size.
    pub fn with_bar(mut self, bar: BarDimensions) -> Self {
        self.bar = bar;
        self
    }

    /// Evaluate a raw value for a parameter and species.
    ///
    /// For dual parameters `raw` is the absolute count.
    pub fn evaluate(&self, key: ParameterKey, raw: Option<&str>, species: Species) -> Evaluation {
        // Step 1: Resolve the range (None for unknown species)
        let range = self.table.resolve(key, species);

        // Step 2: Parse and classify
        let result = classify_result(raw, range);
        if result.value.is_none() && !is_blank(raw) {
            tracing::warn!(
                parameter = %key,
                raw = raw.unwrap_or_default(),
                "Lab value is not a number"
            );
        }

        // Step 3: Geometry only when there is something to place
        let bounds = range.map(|r| r.driving_bounds()).unwrap_or_default();
        let geometry = match (result.value, bounds.both()) {
            (Some(value), Some((min, max))) => {
                Some(compute_geometry(Some(value), min, max, result.status, self.bar))
            }
            _ => None,
        };

        Evaluation { result, geometry }
    }

    /// Get the reference table for direct access.
    pub fn table(&self) -> &'a ReferenceTable {
        self.table
    }
}
