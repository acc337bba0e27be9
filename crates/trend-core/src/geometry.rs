// File: crates/trend-core/src/geometry.rs
// Summary: Path primitive model over kurbo segments (count, arc length, endpoints, bbox, sub-paths).

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, ParamCurveExtrema, PathSeg, Point, Rect};

/// Accuracy passed to kurbo when measuring curved segments.
pub const ARCLEN_ACCURACY: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Line,
    Quad,
    Cubic,
}

impl From<&PathSeg> for SegmentKind {
    fn from(seg: &PathSeg) -> Self {
        match seg {
            PathSeg::Line(_) => SegmentKind::Line,
            PathSeg::Quad(_) => SegmentKind::Quad,
            PathSeg::Cubic(_) => SegmentKind::Cubic,
        }
    }
}

/// One drawing path: its drawable segments in traversal order.
///
/// Move-to commands are not segments; a path may still be discontinuous,
/// which [`PathPrimitive::continuous_subpaths`] recovers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathPrimitive {
    id: Option<String>,
    segments: Vec<PathSeg>,
}

impl PathPrimitive {
    pub fn from_segments(segments: Vec<PathSeg>) -> Self {
        Self { id: None, segments }
    }

    pub fn from_bez_path(path: &BezPath) -> Self {
        Self::from_segments(path.segments().collect())
    }

    /// Parse an SVG path `d` string.
    pub fn from_svg_d(d: &str) -> Option<Self> {
        BezPath::from_svg(d).ok().map(|p| Self::from_bez_path(&p))
    }

    /// Attach the source element id (empty ids are dropped).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
        self
    }

    pub fn id(&self) -> Option<&str> { self.id.as_deref() }
    pub fn segments(&self) -> &[PathSeg] { &self.segments }
    pub fn segment_count(&self) -> usize { self.segments.len() }

    pub fn arc_length(&self) -> f64 {
        self.segments.iter().map(|s| s.arclen(ARCLEN_ACCURACY)).sum()
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(|s| s.start())
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(|s| s.end())
    }

    /// Tight axis-aligned bounds (curve extrema included).
    pub fn bbox(&self) -> Option<Rect> {
        self.segments
            .iter()
            .map(|s| s.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    pub fn first_segment_kind(&self) -> Option<SegmentKind> {
        self.segments.first().map(SegmentKind::from)
    }

    /// Split into maximal runs where each segment starts exactly where the
    /// previous one ended.
    pub fn continuous_subpaths(&self) -> Vec<&[PathSeg]> {
        let mut runs = Vec::new();
        let mut begin = 0usize;
        for i in 1..self.segments.len() {
            if self.segments[i - 1].end() != self.segments[i].start() {
                runs.push(&self.segments[begin..i]);
                begin = i;
            }
        }
        if begin < self.segments.len() {
            runs.push(&self.segments[begin..]);
        }
        runs
    }
}

impl From<BezPath> for PathPrimitive {
    fn from(path: BezPath) -> Self {
        Self::from_bez_path(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_segments_and_measures_lines() {
        let p = PathPrimitive::from_svg_d("M0 0 L3 4 L3 10").unwrap();
        assert_eq!(p.segment_count(), 2);
        assert!((p.arc_length() - 11.0).abs() < 1e-9);
        assert_eq!(p.start(), Some(Point::new(0.0, 0.0)));
        assert_eq!(p.end(), Some(Point::new(3.0, 10.0)));
    }

    #[test]
    fn move_to_same_point_stays_continuous() {
        let p = PathPrimitive::from_svg_d("M0 0 L1 1 M1 1 L2 0").unwrap();
        assert_eq!(p.continuous_subpaths().len(), 1);
    }

    #[test]
    fn gap_splits_subpaths() {
        let p = PathPrimitive::from_svg_d("M0 0 L1 1 L2 0 M5 5 L6 6").unwrap();
        let runs = p.continuous_subpaths();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 1);
    }

    #[test]
    fn cubic_bbox_includes_extrema() {
        let p = PathPrimitive::from_svg_d("M0 0 C0 10 10 10 10 0").unwrap();
        let bb = p.bbox().unwrap();
        assert!((bb.y1 - 7.5).abs() < 1e-9);
        assert_eq!(p.first_segment_kind(), Some(SegmentKind::Cubic));
    }

    #[test]
    fn empty_path_has_no_endpoints() {
        let p = PathPrimitive::default();
        assert_eq!(p.segment_count(), 0);
        assert!(p.start().is_none());
        assert!(p.bbox().is_none());
        assert!(p.continuous_subpaths().is_empty());
    }
}
