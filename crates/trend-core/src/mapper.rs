// File: crates/trend-core/src/mapper.rs
// Summary: Native drawing coordinates -> (day offset, percentage) transform.

use crate::config::ScaleConfig;
use crate::error::{Axis, Result, TrendError};
use crate::types::{NativePoint, ReferenceTriple, TrendPoint, XLimits};

/// Validated affine frame from native coordinates to chart units.
///
/// `day = 1 + round(xspan * (x - xmin) / (xmax - xmin))` (ties to even) and
/// `value = yspan * (baseline - y) / half_span`, which flips native y so that
/// values grow upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    xmin: f64,
    x_scale: f64,
    baseline: f64,
    y_scale: f64,
    xspan: f64,
    yspan: f64,
}

impl CoordinateMapper {
    pub fn new(references: &ReferenceTriple, xlimits: XLimits, scale: &ScaleConfig) -> Result<Self> {
        let x_scale = xlimits.span();
        if x_scale == 0.0 || !x_scale.is_finite() {
            return Err(TrendError::DegenerateGeometry { axis: Axis::X, extent: x_scale });
        }
        let y_scale = references.half_span();
        if y_scale == 0.0 || !y_scale.is_finite() {
            return Err(TrendError::DegenerateGeometry { axis: Axis::Y, extent: y_scale });
        }
        Ok(Self {
            xmin: xlimits.xmin,
            x_scale,
            baseline: references.baseline(),
            y_scale,
            xspan: f64::from(scale.xspan),
            yspan: scale.yspan,
        })
    }

    #[inline]
    pub fn day_offset(&self, x: f64) -> i64 {
        1 + (self.xspan * ((x - self.xmin) / self.x_scale)).round_ties_even() as i64
    }

    #[inline]
    pub fn value(&self, y: f64) -> f64 {
        self.yspan * ((self.baseline - y) / self.y_scale)
    }

    pub fn map_point(&self, p: NativePoint) -> TrendPoint {
        TrendPoint { day_offset: self.day_offset(p.x), value: self.value(p.y) }
    }
}

/// Map every sample, keeping length and order. Empty input maps to empty output.
pub fn map_samples(
    samples: &[NativePoint],
    references: &ReferenceTriple,
    xlimits: XLimits,
    scale: &ScaleConfig,
) -> Result<Vec<TrendPoint>> {
    let mapper = CoordinateMapper::new(references, xlimits, scale)?;
    Ok(samples.iter().map(|&p| mapper.map_point(p)).collect())
}
