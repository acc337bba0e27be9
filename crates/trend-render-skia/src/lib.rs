// File: crates/trend-render-skia/src/lib.rs
// Summary: Diagnostic plot renderer for extracted trends (Skia CPU raster -> PNG).

pub mod grid;
pub mod plot;
pub mod theme;
pub mod types;

pub use plot::{RenderOptions, TrendPlot};
pub use theme::Theme;
pub use types::Insets;
