// File: crates/trend-core/src/dates.rs
// Summary: Day-offset -> calendar date lookup loaded from CSV (`index`, `date` columns).

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Result, TrendError};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Deserialize)]
struct LookupRecord {
    index: i64,
    date: String,
}

/// Date text as written in the lookup, plus its parsed form when recognisable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateLabel {
    pub raw: String,
    pub parsed: Option<NaiveDate>,
}

impl DateLabel {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let parsed = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok());
        Self { raw, parsed }
    }
}

/// Lookup entries in file order, indexed by day offset.
#[derive(Clone, Debug, Default)]
pub struct DateLookup {
    entries: Vec<(i64, DateLabel)>,
    by_day: HashMap<i64, usize>,
}

impl DateLookup {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut lookup = Self::default();
        for rec in rdr.deserialize::<LookupRecord>() {
            let rec = rec?;
            lookup.insert(rec.index, DateLabel::new(rec.date))?;
        }
        Ok(lookup)
    }

    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let mut lookup = Self::default();
        for (day, raw) in entries {
            lookup.insert(day, DateLabel::new(raw))?;
        }
        Ok(lookup)
    }

    fn insert(&mut self, day: i64, label: DateLabel) -> Result<()> {
        if self.by_day.contains_key(&day) {
            return Err(TrendError::DateLookup(format!("duplicate index {day}")));
        }
        self.by_day.insert(day, self.entries.len());
        self.entries.push((day, label));
        Ok(())
    }

    pub fn get(&self, day: i64) -> Option<&DateLabel> {
        self.by_day.get(&day).map(|&i| &self.entries[i].1)
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &DateLabel)> {
        self.entries.iter().map(|(d, l)| (*d, l))
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
