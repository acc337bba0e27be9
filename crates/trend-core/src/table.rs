// File: crates/trend-core/src/table.rs
// Summary: Joins extracted points with the date lookup and writes the per-drawing CSV table.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dates::DateLookup;
use crate::error::Result;
use crate::types::TrendPoint;

/// Shape of the output table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// One row per sample; the date is empty when the day is not in the lookup.
    #[default]
    Samples,
    /// One row per lookup date (file order), repeated for each sample on that
    /// day; dates without a sample get an empty value.
    Calendar,
}

/// Identifies a drawing in every output row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawingLabel {
    pub origin: String,
    /// `"{origin}-{stem}"`, also the output file stem.
    pub file_label: String,
    pub graph_num: String,
}

impl DrawingLabel {
    /// The graph number is the second `-` field of the file label, so a dash
    /// inside `origin` shifts it (kept for compatibility with existing tables).
    pub fn new(origin: &str, file_stem: &str) -> Self {
        let file_label = format!("{origin}-{file_stem}");
        let graph_num = file_label.split('-').nth(1).unwrap_or(file_stem).to_string();
        Self { origin: origin.to_string(), file_label, graph_num }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendRow {
    pub day_offset: i64,
    pub value: Option<f64>,
    pub date: Option<String>,
}

pub fn join_rows(points: &[TrendPoint], lookup: &DateLookup, mode: JoinMode) -> Vec<TrendRow> {
    match mode {
        JoinMode::Samples => points
            .iter()
            .map(|p| TrendRow {
                day_offset: p.day_offset,
                value: Some(p.value),
                date: lookup.get(p.day_offset).map(|d| d.raw.clone()),
            })
            .collect(),
        JoinMode::Calendar => {
            let mut by_day: HashMap<i64, Vec<f64>> = HashMap::new();
            for p in points {
                by_day.entry(p.day_offset).or_default().push(p.value);
            }
            let mut rows = Vec::with_capacity(lookup.len().max(points.len()));
            for (day, label) in lookup.iter() {
                match by_day.get(&day) {
                    Some(values) => rows.extend(values.iter().map(|&v| TrendRow {
                        day_offset: day,
                        value: Some(v),
                        date: Some(label.raw.clone()),
                    })),
                    None => rows.push(TrendRow { day_offset: day, value: None, date: Some(label.raw.clone()) }),
                }
            }
            rows
        }
    }
}

#[derive(Serialize)]
struct OutputRecord<'a> {
    value: String,
    date: &'a str,
    origin: &'a str,
    graph_num: &'a str,
}

/// Write `value,date,origin,graph_num` rows; values with 3 decimals, gaps empty.
pub fn write_csv<W: Write>(writer: W, rows: &[TrendRow], label: &DrawingLabel) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(["value", "date", "origin", "graph_num"])?;
    }
    for row in rows {
        wtr.serialize(OutputRecord {
            value: row.value.map(|v| format!("{v:.3}")).unwrap_or_default(),
            date: row.date.as_deref().unwrap_or(""),
            origin: &label.origin,
            graph_num: &label.graph_num,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(path: impl AsRef<Path>, rows: &[TrendRow], label: &DrawingLabel) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), rows, label)
}
