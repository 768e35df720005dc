//! Evaluation outputs: status, classified results and indicator geometry.

use serde::{Deserialize, Serialize};

use super::ReferenceRange;

/// Classification of a lab value against its reference range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Normal,
    High,
    Low,
    /// Missing or unparseable value, or no usable range
    Invalid,
}

impl Status {
    /// Whether the value is outside its range and should be emphasized.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Status::High | Status::Low)
    }

    /// Marker colour for this status; invalid values get no marker.
    pub fn marker_color(&self) -> Option<MarkerColor> {
        match self {
            Status::Normal => Some(MarkerColor::Neutral),
            Status::High => Some(MarkerColor::Warm),
            Status::Low => Some(MarkerColor::Cool),
            Status::Invalid => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::High => "high",
            Status::Low => "low",
            Status::Invalid => "invalid",
        }
    }
}

/// Colour family of the value marker. The renderer picks the actual colours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    Neutral,
    Warm,
    Cool,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Neutral => "neutral",
            MarkerColor::Warm => "warm",
            MarkerColor::Cool => "cool",
        }
    }
}

/// A lab value after normalization and classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedResult {
    /// Parsed value; `None` when the raw input was missing or not a number
    pub value: Option<f64>,
    pub status: Status,
    /// Range the value was checked against
    pub range: Option<ReferenceRange>,
}

/// Pixel geometry of the indicator bar beside a lab value.
///
/// All horizontal coordinates are within `[0, bar_width]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IndicatorGeometry {
    pub bar_width: f64,
    pub bar_height: f64,
    /// Left edge of the "normal" band
    pub band_left: f64,
    pub band_width: f64,
    /// Value marker; omitted when there is no value to place
    pub marker: Option<Marker>,
}

/// Point marker at the patient's value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub left: f64,
    pub color: MarkerColor,
}

impl IndicatorGeometry {
    /// Right edge of the normal band.
    pub fn band_right(&self) -> f64 {
        self.band_left + self.band_width
    }

    pub fn marker_left(&self) -> Option<f64> {
        self.marker.map(|m| m.left)
    }
}
