// File: crates/trend-render-skia/src/grid.rs
// Summary: Tick layout helpers for the plot grid.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Day positions of weekly gridlines, starting at `first_day`.
pub fn week_ticks(first_day: f64, last_day: f64) -> Vec<f64> {
    let weeks = ((last_day - first_day) / 7.0).floor().max(0.0) as usize;
    if weeks == 0 { return vec![first_day]; }
    linspace(first_day, first_day + 7.0 * weeks as f64, weeks + 1)
}
