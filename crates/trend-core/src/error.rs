// File: crates/trend-core/src/error.rs
// Summary: Error taxonomy for a single drawing (classification, geometry) and its I/O collaborators.

/// Which native axis turned out to have no extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    /// Reference-line count is neither 3 nor 5 (collapsing to 3).
    #[error("wrong number of reference lines: {count} (expected 3, or 5 collapsing to 3)")]
    Classification { count: usize },

    #[error("x-limit rule selects single-segment line #{index}, but the drawing has only {available}")]
    MissingXLimitLine { index: usize, available: usize },

    #[error("reference lines out of order: upper {upper}, baseline {baseline}, lower {lower}")]
    MalformedReferences { upper: f64, baseline: f64, lower: f64 },

    /// Zero or non-finite extent on one axis; mapping would divide by it.
    #[error("degenerate {axis} extent ({extent}) in reference geometry")]
    DegenerateGeometry { axis: Axis, extent: f64 },

    #[error("failed to parse SVG: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Well-formed XML that is not a usable SVG drawing.
    #[error("invalid SVG: {0}")]
    Svg(String),

    #[error("date lookup: {0}")]
    DateLookup(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrendError>;
