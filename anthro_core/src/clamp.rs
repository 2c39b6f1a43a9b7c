//! Physiological range clamping for protocol results.

use serde::{Deserialize, Serialize};

/// Inclusive bounds a protocol result is forced into
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClampRange {
    pub min: f64,
    pub max: f64,
}

impl ClampRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bound a raw result into `range`.
///
/// Non-finite values and an exact 0 mean "no result" and come back as 0.
pub fn sanity_clamp(value: f64, range: ClampRange) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return 0.0;
    }
    value.clamp(range.min, range.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: ClampRange = ClampRange::new(2.0, 60.0);

    #[test]
    fn test_in_range_value_unchanged() {
        assert_eq!(sanity_clamp(21.5, RANGE), 21.5);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        assert_eq!(sanity_clamp(75.0, RANGE), 60.0);
        assert_eq!(sanity_clamp(0.4, RANGE), 2.0);
        assert_eq!(sanity_clamp(-3.0, RANGE), 2.0);
    }

    #[test]
    fn test_no_result_values_become_zero() {
        assert_eq!(sanity_clamp(0.0, RANGE), 0.0);
        assert_eq!(sanity_clamp(f64::NAN, RANGE), 0.0);
        assert_eq!(sanity_clamp(f64::INFINITY, RANGE), 0.0);
        assert_eq!(sanity_clamp(f64::NEG_INFINITY, RANGE), 0.0);
    }
}
