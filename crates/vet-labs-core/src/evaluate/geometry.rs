//! Indicator bar geometry.
//!
//! The bar spans the reference range plus a 20% buffer on each side, so an
//! out-of-range value still lands inside the bar and its distance from the
//! normal band stays visible. Values beyond the buffer are clamped to the
//! bar edges.

use serde::{Deserialize, Serialize};

use crate::models::{IndicatorGeometry, Marker, Status};

/// Relative spread synthesized around a zero-width range.
const DEGENERATE_SPREAD: f64 = 0.1;

/// Minimum half-width synthesized around a zero-width range.
const MIN_DEGENERATE_DELTA: f64 = 1.0;

/// Share of the visual range added on each side of the bar.
const RANGE_BUFFER_RATIO: f64 = 0.2;

/// Band width used when no linear mapping is possible.
const FALLBACK_BAND_WIDTH: f64 = 10.0;

/// Size of the indicator bar in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for BarDimensions {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 8.0,
        }
    }
}

/// Compute band and marker positions for a value against `[min, max]`.
///
/// Never divides by zero: a zero-width range is widened first, and any
/// remaining non-positive span falls back to a centred band.
pub fn compute_geometry(
    value: Option<f64>,
    min: f64,
    max: f64,
    status: Status,
    bar: BarDimensions,
) -> IndicatorGeometry {
    let width = bar.width.max(0.0);

    let (visual_min, visual_max) = if min == max {
        let delta = (min.abs() * DEGENERATE_SPREAD).max(MIN_DEGENERATE_DELTA);
        (min - delta, max + delta)
    } else {
        (min, max)
    };

    let range_buffer = (visual_max - visual_min) * RANGE_BUFFER_RATIO;
    let effective_min = visual_min - range_buffer;
    let effective_max = visual_max + range_buffer;
    let total_range = effective_max - effective_min;

    let (band_left, band_width, marker_left) = if total_range.is_finite() && total_range > 0.0 {
        let scale = |x: f64| (x / total_range) * width;
        (
            scale(visual_min - effective_min),
            scale(visual_max - visual_min),
            value.map(|v| scale(v - effective_min)),
        )
    } else {
        (
            (width - FALLBACK_BAND_WIDTH) / 2.0,
            FALLBACK_BAND_WIDTH,
            value.map(|_| width / 2.0),
        )
    };

    let band_width = clamp(band_width, 0.0, width);
    let band_left = clamp(band_left, 0.0, (width - band_width).max(0.0));

    let marker = match (marker_left, status.marker_color()) {
        (Some(left), Some(color)) => Some(Marker {
            left: clamp(left, 0.0, width),
            color,
        }),
        _ => None,
    };

    IndicatorGeometry {
        bar_width: width,
        bar_height: bar.height,
        band_left,
        band_width,
        marker,
    }
}

/// Clamp that tolerates NaN (mapped to `lo`) and never panics on bounds.
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
