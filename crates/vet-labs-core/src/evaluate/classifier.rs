//! Status classification against reference bounds.
//!
//! Bounds are inclusive: a value equal to `min` or `max` is normal.

use crate::models::{ClassifiedResult, ReferenceRange, Status};

use super::parse_lab_value;

/// Classify a raw form value against a reference range.
pub fn classify(raw: Option<&str>, range: Option<&ReferenceRange>) -> Status {
    classify_result(raw, range).status
}

/// Classify a parsed value against optional bounds.
pub fn classify_value(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> Status {
    let (Some(value), Some(min), Some(max)) = (value, min, max) else {
        return Status::Invalid;
    };

    if value < min {
        Status::Low
    } else if value > max {
        Status::High
    } else {
        Status::Normal
    }
}

/// Parse and classify, keeping the parsed value and the range used.
pub fn classify_result(raw: Option<&str>, range: Option<&ReferenceRange>) -> ClassifiedResult {
    let value = parse_lab_value(raw);
    let bounds = range.map(ReferenceRange::driving_bounds).unwrap_or_default();

    ClassifiedResult {
        value,
        status: classify_value(value, bounds.min, bounds.max),
        range: range.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RangeBand, SingleRange};

    fn erythrocytes() -> ReferenceRange {
        ReferenceRange::single(5.5, 8.5, "5,5 - 8,5")
    }

    #[test]
    fn test_normal_high_low() {
        let range = erythrocytes();
        assert_eq!(classify(Some("6.2"), Some(&range)), Status::Normal);
        assert_eq!(classify(Some("9,1"), Some(&range)), Status::High);
        assert_eq!(classify(Some("4.0"), Some(&range)), Status::Low);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = erythrocytes();
        assert_eq!(classify(Some("5.5"), Some(&range)), Status::Normal);
        assert_eq!(classify(Some("8,5"), Some(&range)), Status::Normal);
    }

    #[test]
    fn test_invalid_inputs() {
        let range = erythrocytes();
        assert_eq!(classify(None, Some(&range)), Status::Invalid);
        assert_eq!(classify(Some(""), Some(&range)), Status::Invalid);
        assert_eq!(classify(Some("n/d"), Some(&range)), Status::Invalid);
        assert_eq!(classify(Some("6.2"), None), Status::Invalid);
    }

    #[test]
    fn test_missing_bound_is_invalid() {
        let range = ReferenceRange::Single(SingleRange {
            min: Some(1.0),
            max: None,
            full: Some("> 1".into()),
        });
        assert_eq!(classify(Some("5"), Some(&range)), Status::Invalid);
    }

    #[test]
    fn test_dual_uses_absolute_band() {
        let range = ReferenceRange::dual(
            RangeBand::new(0.0, 3.0, "0 - 3"),
            RangeBand::new(0.0, 300.0, "0 - 300"),
        );
        // 5 would be high as a percentage but is normal as a count.
        assert_eq!(classify(Some("5"), Some(&range)), Status::Normal);
        assert_eq!(classify(Some("1000"), Some(&range)), Status::High);
    }

    #[test]
    fn test_classify_result_keeps_value_and_range() {
        let range = erythrocytes();
        let result = classify_result(Some("6,2"), Some(&range));
        assert_eq!(result.value, Some(6.2));
        assert_eq!(result.status, Status::Normal);
        assert_eq!(result.range, Some(range));

        let result = classify_result(Some("x"), None);
        assert_eq!(result.value, None);
        assert_eq!(result.status, Status::Invalid);
        assert!(result.range.is_none());
    }
}
