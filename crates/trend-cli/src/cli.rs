// File: crates/trend-cli/src/cli.rs
// Summary: Command-line arguments and their overlay onto the extraction config.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use trend_core::{ExtractConfig, JoinMode, XLimitRule};

/// Turn a folder of single-chart SVGs into CSV tables of (value, date).
#[derive(Parser, Debug)]
#[command(name = "trend-csv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder of single-plot SVG files; its name becomes the `origin` column
    pub input_folder: PathBuf,

    /// Folder for the CSV (and PNG) outputs; created if missing
    pub output_folder: PathBuf,

    /// CSV lookup from x-axis day offset (`index`) to `date`
    pub dates_file: PathBuf,

    /// Also write a PNG plot per drawing for manual checks
    #[arg(short, long)]
    pub plots: bool,

    /// TOML config file ([scale], [classify], [output])
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Percentage points from the baseline to each outer reference line
    #[arg(long)]
    pub yspan: Option<f64>,

    /// Days covered by the x-axis
    #[arg(long)]
    pub xspan: Option<u32>,

    /// Which straight line (0-based, document order) gives the x-axis extent
    #[arg(long)]
    pub xlimit_line: Option<usize>,

    /// Treat the two gridlines dropped from a five-line frame as trend data
    #[arg(long)]
    pub fold_collapsed_lines: bool,

    /// Table shape: one row per sample, or one row per lookup date
    #[arg(long, value_enum)]
    pub join: Option<JoinArg>,

    /// Plot color theme
    #[arg(long, default_value = "light")]
    pub theme: String,

    /// Stop at the first drawing that fails instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum JoinArg {
    Samples,
    Calendar,
}

impl From<JoinArg> for JoinMode {
    fn from(arg: JoinArg) -> Self {
        match arg {
            JoinArg::Samples => JoinMode::Samples,
            JoinArg::Calendar => JoinMode::Calendar,
        }
    }
}

impl Cli {
    /// Flags win over the config file; unset flags keep its values.
    pub fn apply_overrides(&self, config: &mut ExtractConfig) {
        if let Some(yspan) = self.yspan {
            config.scale.yspan = yspan;
        }
        if let Some(xspan) = self.xspan {
            config.scale.xspan = xspan;
        }
        if let Some(line) = self.xlimit_line {
            config.classify.xlimit = XLimitRule::nth_single_segment(line);
        }
        if self.fold_collapsed_lines {
            config.classify.fold_collapsed_lines = true;
        }
        if let Some(join) = self.join {
            config.output.join = join.into();
        }
        if self.plots {
            config.output.plots = true;
        }
    }
}
