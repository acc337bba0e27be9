// File: crates/trend-core/src/lib.rs
// Summary: Core library entry point; exports path classification, coordinate mapping and table output.

pub mod error;
pub mod types;
pub mod geometry;
pub mod classify;
pub mod mapper;
pub mod config;
pub mod svg;
pub mod pipeline;
pub mod dates;
pub mod table;

pub use error::{Result, TrendError};
pub use types::{NativePoint, ReferenceTriple, TrendPoint, XLimits};
pub use geometry::{PathPrimitive, SegmentKind};
pub use classify::{classify, Classification, ClassifyOptions, TrendShape, XLimitRule};
pub use mapper::{map_samples, CoordinateMapper};
pub use config::{ExtractConfig, OutputConfig, ScaleConfig};
pub use pipeline::{extract, extract_svg_file, Extraction};
pub use dates::{DateLabel, DateLookup};
pub use table::{join_rows, write_csv, write_csv_file, DrawingLabel, JoinMode, TrendRow};
