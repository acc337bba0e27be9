// File: crates/trend-core/src/types.rs
// Summary: Shared value types: native points, x-limits, the reference triple and semantic trend points.

use crate::error::{Result, TrendError};

/// Point in native drawing coordinates (y grows downward).
pub type NativePoint = kurbo::Point;

/// Horizontal extent of the x-axis reference line, in native coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XLimits {
    pub xmin: f64,
    pub xmax: f64,
}

impl XLimits {
    pub const fn new(xmin: f64, xmax: f64) -> Self {
        Self { xmin, xmax }
    }
    /// Signed width `xmax - xmin`.
    pub fn span(&self) -> f64 {
        self.xmax - self.xmin
    }
}

/// Native y of the three horizontal reference lines.
///
/// Ordered by native value: `upper >= baseline >= lower`. Native y grows
/// downward, so `upper` is the line drawn lowest on the page; the mapper only
/// relies on the baseline and the two distances to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceTriple {
    upper: f64,
    baseline: f64,
    lower: f64,
}

impl ReferenceTriple {
    /// Construct enforcing `upper >= baseline >= lower` (NaN is rejected).
    pub fn try_new(upper: f64, baseline: f64, lower: f64) -> Result<Self> {
        if upper >= baseline && baseline >= lower {
            Ok(Self { upper, baseline, lower })
        } else {
            Err(TrendError::MalformedReferences { upper, baseline, lower })
        }
    }

    /// Build from three line positions in any order; sorted descending.
    pub fn from_lines(mut lines: [f64; 3]) -> Self {
        lines.sort_by(|a, b| b.total_cmp(a));
        let [upper, baseline, lower] = lines;
        Self { upper, baseline, lower }
    }

    pub fn upper(&self) -> f64 { self.upper }
    pub fn baseline(&self) -> f64 { self.baseline }
    pub fn lower(&self) -> f64 { self.lower }

    /// `[upper, baseline, lower]`.
    pub fn to_array(&self) -> [f64; 3] {
        [self.upper, self.baseline, self.lower]
    }

    /// Mean of the two baseline distances; tolerates slight asymmetry.
    pub fn half_span(&self) -> f64 {
        ((self.upper - self.baseline).abs() + (self.baseline - self.lower).abs()) / 2.0
    }
}

/// One extracted sample in chart units: 1-based day offset and signed percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendPoint {
    pub day_offset: i64,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_sorts_descending() {
        let r = ReferenceTriple::from_lines([10.0, 90.0, 50.0]);
        assert_eq!(r.to_array(), [90.0, 50.0, 10.0]);
    }

    #[test]
    fn try_new_rejects_out_of_order() {
        assert!(ReferenceTriple::try_new(10.0, 50.0, 90.0).is_err());
        assert!(ReferenceTriple::try_new(f64::NAN, 50.0, 10.0).is_err());
        assert!(ReferenceTriple::try_new(90.0, 50.0, 10.0).is_ok());
    }

    #[test]
    fn half_span_averages_asymmetric_distances() {
        let r = ReferenceTriple::from_lines([8.0, 50.0, 90.0]);
        assert!((r.half_span() - 41.0).abs() < 1e-12);
    }
}
