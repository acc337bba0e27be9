// File: crates/trend-core/src/pipeline.rs
// Summary: Per-drawing extraction: classify the paths, then map the samples into chart units.

use std::path::Path;

use crate::classify::{classify, Classification};
use crate::config::ExtractConfig;
use crate::error::Result;
use crate::geometry::PathPrimitive;
use crate::mapper::map_samples;
use crate::svg::load_svg_file;
use crate::types::TrendPoint;

#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    pub classification: Classification,
    /// Same length and order as `classification.samples`.
    pub points: Vec<TrendPoint>,
}

pub fn extract(paths: &[PathPrimitive], config: &ExtractConfig) -> Result<Extraction> {
    let classification = classify(paths, &config.classify)?;
    let points = map_samples(
        &classification.samples,
        &classification.references,
        classification.xlimits,
        &config.scale,
    )?;
    Ok(Extraction { classification, points })
}

pub fn extract_svg_file(path: impl AsRef<Path>, config: &ExtractConfig) -> Result<Extraction> {
    let paths = load_svg_file(path)?;
    extract(&paths, config)
}
