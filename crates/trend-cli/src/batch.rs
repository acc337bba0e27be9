// File: crates/trend-cli/src/batch.rs
// Summary: Folder driver: one drawing at a time -> CSV (+ optional PNG); failing drawings are skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use trend_core::{extract_svg_file, join_rows, write_csv_file, DateLookup, DrawingLabel, ExtractConfig};
use trend_render_skia::{RenderOptions, TrendPlot};

pub struct BatchJob {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub lookup: DateLookup,
    pub config: ExtractConfig,
    pub render: RenderOptions,
    pub fail_fast: bool,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    /// CSV files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Drawings skipped after an error, with the rendered error chain.
    pub failed: Vec<(PathBuf, String)>,
}

pub fn run_batch(job: &BatchJob) -> Result<BatchSummary> {
    std::fs::create_dir_all(&job.output_folder)
        .with_context(|| format!("creating output folder {}", job.output_folder.display()))?;

    let origin = origin_of(&job.input_folder);
    info!(%origin, "loading drawings from location");

    let mut summary = BatchSummary::default();
    for path in list_drawings(&job.input_folder)? {
        info!(file = %path.display(), "getting paths");
        match process_drawing(&path, &origin, job) {
            Ok(out) => {
                debug!(csv = %out.display(), "wrote table");
                summary.written.push(out);
            }
            Err(err) if !job.fail_fast => {
                warn!(file = %path.display(), error = %format!("{err:#}"), "skipping drawing");
                summary.failed.push((path, format!("{err:#}")));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(summary)
}

/// Files directly inside `folder`, by name, skipping dot-files.
pub fn list_drawings(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).with_context(|| format!("reading {}", folder.display()))? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Last component of the input folder, used as the `origin` label.
pub fn origin_of(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            folder
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}

fn process_drawing(path: &Path, origin: &str, job: &BatchJob) -> Result<PathBuf> {
    let extraction = extract_svg_file(path, &job.config)
        .with_context(|| format!("extracting trend from {}", path.display()))?;

    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let label = DrawingLabel::new(origin, &stem);
    let rows = join_rows(&extraction.points, &job.lookup, job.config.output.join);
    debug!(samples = extraction.points.len(), rows = rows.len(), "joined dates");

    let csv_path = job.output_folder.join(format!("{}.csv", label.file_label));
    write_csv_file(&csv_path, &rows, &label)
        .with_context(|| format!("writing {}", csv_path.display()))?;

    if job.config.output.plots {
        let mut plot = TrendPlot::from_rows(&label.file_label, &rows, &job.config.scale);
        if let Some(caption) = date_caption(&job.lookup) {
            plot = plot.with_caption(caption);
        }
        plot.render_to_png(&job.render, csv_path.with_extension("png"))?;
    }
    Ok(csv_path)
}

fn date_caption(lookup: &DateLookup) -> Option<String> {
    let dates = lookup.iter().filter_map(|(_, label)| label.parsed);
    let (first, last) = dates.fold(None, |acc, d| match acc {
        None => Some((d, d)),
        Some((lo, hi)) => Some((d.min(lo), d.max(hi))),
    })?;
    Some(format!("{first} .. {last}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="440" height="100" viewBox="0 0 440 100">
  <line x1="0" y1="10" x2="420" y2="10" stroke="#cccccc"/>
  <line x1="0" y1="50" x2="420" y2="50" stroke="#000000"/>
  <line x1="0" y1="90" x2="420" y2="90" stroke="#cccccc"/>
  <polyline points="0,50 210,10 420,90" fill="none" stroke="red"/>
</svg>"##;

    const FOUR_LINES: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="440" height="100" viewBox="0 0 440 100">
  <line x1="0" y1="10" x2="420" y2="10" stroke="#cccccc"/>
  <line x1="0" y1="30" x2="420" y2="30" stroke="#cccccc"/>
  <line x1="0" y1="50" x2="420" y2="50" stroke="#000000"/>
  <line x1="0" y1="90" x2="420" y2="90" stroke="#cccccc"/>
</svg>"##;

    fn setup(plots: bool, fail_fast: bool) -> (tempfile::TempDir, BatchJob) {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("regionA");
        std::fs::create_dir_all(&input).expect("mkdir");
        std::fs::write(input.join("1.svg"), CHART).expect("write");
        std::fs::write(input.join("2.svg"), FOUR_LINES).expect("write");
        std::fs::write(input.join(".hidden.svg"), "not svg").expect("write");

        let lookup = DateLookup::from_entries((1..=43).map(|i| (i, format!("2020-03-{:02}", (i - 1) % 28 + 1))))
            .expect("lookup");
        let mut config = ExtractConfig::default();
        config.output.plots = plots;
        let job = BatchJob {
            input_folder: input,
            output_folder: dir.path().join("out"),
            lookup,
            config,
            render: RenderOptions { draw_labels: false, ..RenderOptions::default() },
            fail_fast,
        };
        (dir, job)
    }

    #[test]
    fn skips_failing_drawings_and_dot_files() {
        let (_dir, job) = setup(false, false);
        let summary = run_batch(&job).expect("batch");
        assert_eq!(summary.written, vec![job.output_folder.join("regionA-1.csv")]);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].1.contains("wrong number of reference lines: 4"));

        let text = std::fs::read_to_string(&summary.written[0]).expect("read csv");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "value,date,origin,graph_num");
        assert_eq!(lines[1], "0.000,2020-03-01,regionA,1");
        assert_eq!(lines[2], "80.000,2020-03-22,regionA,1");
        assert_eq!(lines[3], "-80.000,2020-03-15,regionA,1");
    }

    #[test]
    fn fail_fast_stops_on_first_error() {
        let (_dir, job) = setup(false, true);
        let err = run_batch(&job).unwrap_err();
        assert!(format!("{err:#}").contains("2.svg"));
    }

    #[test]
    fn plots_are_written_next_to_tables() {
        let (_dir, job) = setup(true, false);
        let summary = run_batch(&job).expect("batch");
        assert!(summary.written[0].with_extension("png").exists());
    }

    #[test]
    fn origin_is_last_folder_component() {
        assert_eq!(origin_of(Path::new("data/svgs/regionA/")), "regionA");
    }
}
