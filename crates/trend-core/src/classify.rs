// File: crates/trend-core/src/classify.rs
// Summary: Path classifier: splits gridlines from the trend, derives the chart frame and trend samples.

use kurbo::ParamCurve;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrendError};
use crate::geometry::{PathPrimitive, SegmentKind};
use crate::types::{NativePoint, ReferenceTriple, XLimits};

/// Upper bound on single-segment reference candidates (two outer pairs plus baseline).
pub const MAX_REFERENCE_LINES: usize = 5;

/// Which single-segment path supplies the x-axis extent.
///
/// Counted among single-segment paths in document order, before any length
/// sort. The default (index 1) matches the exporter these charts come from,
/// which emits the x-axis reference as the second straight line. Nothing in
/// the geometry confirms the choice; a different exporter needs a different
/// index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XLimitRule {
    pub line_index: usize,
}

impl Default for XLimitRule {
    fn default() -> Self {
        Self { line_index: 1 }
    }
}

impl XLimitRule {
    pub const fn nth_single_segment(line_index: usize) -> Self {
        Self { line_index }
    }

    fn select(&self, singles: &[&PathPrimitive]) -> Result<XLimits> {
        let line = singles.get(self.line_index).ok_or(TrendError::MissingXLimitLine {
            index: self.line_index,
            available: singles.len(),
        })?;
        // single-segment paths always have both endpoints
        let (start, end) = (line.start().unwrap_or_default(), line.end().unwrap_or_default());
        debug!(
            line = self.line_index,
            id = line.id().unwrap_or("-"),
            xmin = start.x,
            xmax = end.x,
            "x limits from reference line"
        );
        Ok(XLimits::new(start.x, end.x))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    #[serde(rename = "xlimit_line")]
    pub xlimit: XLimitRule,
    /// Append the two lines dropped by the 5 -> 3 collapse to the trend paths.
    pub fold_collapsed_lines: bool,
}

/// Sampling strategy for one trend path, chosen by its first segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendShape {
    /// Straight (or quadratic) segments: every vertex of every continuous run.
    Polyline,
    /// Starts with a cubic: a single marker-like sample at the bbox centre.
    Smooth,
}

impl TrendShape {
    pub fn of(path: &PathPrimitive) -> Self {
        match path.first_segment_kind() {
            Some(SegmentKind::Cubic) => TrendShape::Smooth,
            _ => TrendShape::Polyline,
        }
    }

    /// Append this path's samples to `out`, in traversal order.
    pub fn sample_into(self, path: &PathPrimitive, out: &mut Vec<NativePoint>) {
        match self {
            TrendShape::Smooth => {
                if let Some(bb) = path.bbox() {
                    out.push(bb.center());
                }
            }
            TrendShape::Polyline => {
                for run in path.continuous_subpaths() {
                    out.extend(run.iter().map(|s| s.start()));
                    if let Some(last) = run.last() {
                        out.push(last.end());
                    }
                }
            }
        }
    }
}

/// Chart frame and trend samples recovered from one drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub xlimits: XLimits,
    pub references: ReferenceTriple,
    /// Traversal order, not sorted by x.
    pub samples: Vec<NativePoint>,
}

/// Classify the paths of one drawing, given in document order.
pub fn classify(paths: &[PathPrimitive], opts: &ClassifyOptions) -> Result<Classification> {
    let singles: Vec<&PathPrimitive> = paths.iter().filter(|p| p.segment_count() == 1).collect();
    let mut trends: Vec<&PathPrimitive> = paths.iter().filter(|p| p.segment_count() > 1).collect();

    let mut candidates = singles.clone();
    if candidates.len() > MAX_REFERENCE_LINES {
        let mut by_length: Vec<(f64, &PathPrimitive)> =
            candidates.iter().map(|p| (p.arc_length(), *p)).collect();
        by_length.sort_by(|a, b| a.0.total_cmp(&b.0));
        let split = by_length.len() - MAX_REFERENCE_LINES;
        // shorter fragments join the trend in ascending length order
        trends.extend(by_length[..split].iter().map(|(_, p)| *p));
        candidates = by_length[split..].iter().map(|(_, p)| *p).collect();
        debug!(fragments = split, "reclassified short single-segment paths as trend");
    }

    candidates.sort_by(|a, b| start_y(a).total_cmp(&start_y(b)));
    let lines = match candidates.len() {
        3 => [candidates[0], candidates[1], candidates[2]],
        5 => {
            if opts.fold_collapsed_lines {
                trends.push(candidates[1]);
                trends.push(candidates[3]);
            }
            [candidates[0], candidates[2], candidates[4]]
        }
        count => return Err(TrendError::Classification { count }),
    };

    let xlimits = opts.xlimit.select(&singles)?;
    let references = ReferenceTriple::from_lines(lines.map(start_y));

    let mut samples = Vec::new();
    for path in &trends {
        TrendShape::of(path).sample_into(path, &mut samples);
    }
    debug!(
        singles = singles.len(),
        trends = trends.len(),
        samples = samples.len(),
        "classified drawing paths"
    );

    Ok(Classification { xlimits, references, samples })
}

fn start_y(path: &PathPrimitive) -> f64 {
    path.start().map(|p| p.y).unwrap_or(f64::NAN)
}
