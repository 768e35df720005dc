//! Reference range models.

use serde::{Deserialize, Serialize};

/// Species-specific reference range for one parameter.
///
/// Serialized with an explicit `shape` tag so a table file cannot silently
/// mix up single and dual entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ReferenceRange {
    Single(SingleRange),
    Dual(DualRange),
}

/// Range for a parameter reported as one value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SingleRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Printed reference text (e.g. "5,5 - 8,5")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

/// Range for a leukocyte-family parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DualRange {
    /// Percentage of total leukocytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative: Option<RangeBand>,
    /// Count per µL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute: Option<RangeBand>,
}

/// One half of a dual range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeBand {
    pub min: f64,
    pub max: f64,
    pub text: String,
}

/// Numeric bounds used for classification and the indicator bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    /// Both bounds, if present.
    pub fn both(&self) -> Option<(f64, f64)> {
        Some((self.min?, self.max?))
    }
}

impl ReferenceRange {
    pub fn single(min: f64, max: f64, full: impl Into<String>) -> Self {
        ReferenceRange::Single(SingleRange {
            min: Some(min),
            max: Some(max),
            full: Some(full.into()),
        })
    }

    pub fn dual(relative: RangeBand, absolute: RangeBand) -> Self {
        ReferenceRange::Dual(DualRange {
            relative: Some(relative),
            absolute: Some(absolute),
        })
    }

    /// Bounds that drive status and geometry.
    ///
    /// Dual ranges are driven by the absolute count only.
    pub fn driving_bounds(&self) -> Bounds {
        match self {
            ReferenceRange::Single(single) => Bounds {
                min: single.min,
                max: single.max,
            },
            ReferenceRange::Dual(dual) => dual
                .absolute
                .as_ref()
                .map(|band| Bounds {
                    min: Some(band.min),
                    max: Some(band.max),
                })
                .unwrap_or_default(),
        }
    }

    pub fn is_dual(&self) -> bool {
        matches!(self, ReferenceRange::Dual(_))
    }

    /// Every set of bounds carried by this range, named by field.
    pub(crate) fn named_bounds(&self) -> Vec<(&'static str, Bounds)> {
        let band_bounds = |band: &RangeBand| Bounds {
            min: Some(band.min),
            max: Some(band.max),
        };

        match self {
            ReferenceRange::Single(single) => vec![(
                "full",
                Bounds {
                    min: single.min,
                    max: single.max,
                },
            )],
            ReferenceRange::Dual(dual) => {
                let mut bounds = Vec::new();
                if let Some(band) = &dual.relative {
                    bounds.push(("relative", band_bounds(band)));
                }
                if let Some(band) = &dual.absolute {
                    bounds.push(("absolute", band_bounds(band)));
                }
                bounds
            }
        }
    }
}

impl RangeBand {
    pub fn new(min: f64, max: f64, text: impl Into<String>) -> Self {
        Self {
            min,
            max,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_driving_bounds() {
        let range = ReferenceRange::single(5.5, 8.5, "5,5 - 8,5");
        assert_eq!(range.driving_bounds().both(), Some((5.5, 8.5)));
    }

    #[test]
    fn test_dual_driven_by_absolute() {
        let range = ReferenceRange::dual(
            RangeBand::new(0.0, 3.0, "0 - 3"),
            RangeBand::new(0.0, 300.0, "0 - 300"),
        );
        assert_eq!(range.driving_bounds().both(), Some((0.0, 300.0)));

        let relative_only = ReferenceRange::Dual(DualRange {
            relative: Some(RangeBand::new(0.0, 3.0, "0 - 3")),
            absolute: None,
        });
        assert_eq!(relative_only.driving_bounds().both(), None);
    }

    #[test]
    fn test_text_only_single_has_no_bounds() {
        let range = ReferenceRange::Single(SingleRange {
            min: None,
            max: Some(10.0),
            full: Some("até 10".into()),
        });
        assert_eq!(range.driving_bounds().both(), None);
    }

    #[test]
    fn test_shape_tag_in_json() {
        let json = r#"{"shape":"single","min":12.0,"max":18.0,"full":"12 - 18"}"#;
        let range: ReferenceRange = serde_json::from_str(json).unwrap();
        assert_eq!(range, ReferenceRange::single(12.0, 18.0, "12 - 18"));

        let json = r#"{"shape":"dual","absolute":{"min":0,"max":300,"text":"0 - 300"}}"#;
        let range: ReferenceRange = serde_json::from_str(json).unwrap();
        assert!(range.is_dual());
        assert_eq!(range.driving_bounds().both(), Some((0.0, 300.0)));
    }
}
