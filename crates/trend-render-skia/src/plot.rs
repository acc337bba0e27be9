// File: crates/trend-render-skia/src/plot.rs
// Summary: TrendPlot and headless PNG rendering pipeline using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;
use tracing::debug;
use trend_core::{ScaleConfig, TrendRow};

use crate::grid::week_ticks;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Title and captions; off gives pixel-stable output across font setups.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

/// One drawing's extracted trend in chart units.
pub struct TrendPlot {
    pub title: String,
    /// Free text under the x-axis (e.g. the date range).
    pub caption: Option<String>,
    /// (day offset, value) in row order.
    pub points: Vec<(f64, f64)>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    yspan: f64,
}

impl TrendPlot {
    /// Empty plot framed by the chart scale: days `1..=1+xspan`, values `±yspan`.
    pub fn new(title: impl Into<String>, scale: &ScaleConfig) -> Self {
        Self {
            title: title.into(),
            caption: None,
            points: Vec::new(),
            x_range: (1.0, 1.0 + f64::from(scale.xspan)),
            y_range: (-scale.yspan, scale.yspan),
            yspan: scale.yspan,
        }
    }

    /// Plot the rows that carry a value, keeping row order.
    pub fn from_rows(title: impl Into<String>, rows: &[TrendRow], scale: &ScaleConfig) -> Self {
        let mut plot = Self::new(title, scale);
        plot.points = rows
            .iter()
            .filter_map(|r| r.value.map(|v| (r.day_offset as f64, v)))
            .collect();
        plot
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Encode the plot as PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);

        let frame = PlotFrame::new(opts, self.x_range, self.y_range);

        draw_grid(canvas, &frame, &opts.theme);
        draw_references(canvas, &frame, &opts.theme, self.yspan);
        draw_axes(canvas, &frame, &opts.theme);
        draw_trend(canvas, &frame, &opts.theme, &self.points);
        if opts.draw_labels {
            draw_labels(canvas, &frame, &opts.theme, &self.title, self.caption.as_deref());
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        debug!(points = self.points.len(), bytes = data.as_bytes().len(), "rendered trend plot");
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file, creating parent directories.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

struct PlotFrame {
    l: f32,
    t: f32,
    r: f32,
    b: f32,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl PlotFrame {
    /// Plot area inside the insets.
    fn new(opts: &RenderOptions, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        let l = opts.insets.left as f32;
        let t = opts.insets.top as f32;
        let inner_w = (opts.width - opts.insets.hsum() as i32).max(1) as f32;
        let inner_h = (opts.height - opts.insets.vsum() as i32).max(1) as f32;
        Self { l, t, r: l + inner_w, b: t + inner_h, x_range, y_range }
    }

    fn sx(&self, x: f64) -> f32 {
        let span = (self.x_range.1 - self.x_range.0).max(1e-9);
        self.l + ((x - self.x_range.0) / span) as f32 * (self.r - self.l)
    }
    fn sy(&self, y: f64) -> f32 {
        let span = (self.y_range.1 - self.y_range.0).max(1e-9);
        self.b - ((y - self.y_range.0) / span) as f32 * (self.b - self.t)
    }
    fn rect(&self) -> skia::Rect {
        skia::Rect::from_ltrb(self.l, self.t, self.r, self.b)
    }
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn draw_grid(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme) {
    let paint = stroke_paint(theme.grid, 1.0);
    // one vertical per week
    for day in week_ticks(f.x_range.0, f.x_range.1) {
        let x = f.sx(day);
        canvas.draw_line((x, f.t), (x, f.b), &paint);
    }
}

fn draw_references(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme, yspan: f64) {
    let outer = stroke_paint(theme.reference, 1.0);
    for v in [yspan, -yspan] {
        let y = f.sy(v);
        canvas.draw_line((f.l, y), (f.r, y), &outer);
    }
    let base = stroke_paint(theme.baseline, 1.5);
    let y0 = f.sy(0.0);
    canvas.draw_line((f.l, y0), (f.r, y0), &base);
}

fn draw_axes(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme) {
    let paint = stroke_paint(theme.axis_line, 1.5);
    canvas.draw_line((f.l, f.b), (f.r, f.b), &paint);
    canvas.draw_line((f.l, f.t), (f.l, f.b), &paint);
}

fn draw_trend(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme, points: &[(f64, f64)]) {
    if points.len() < 2 {
        return;
    }
    let mut path = skia::Path::new();
    let (x0, y0) = points[0];
    path.move_to((f.sx(x0), f.sy(y0)));
    for &(x, y) in points.iter().skip(1) {
        path.line_to((f.sx(x), f.sy(y)));
    }

    canvas.save();
    canvas.clip_rect(f.rect(), skia::ClipOp::Intersect, true);
    canvas.draw_path(&path, &stroke_paint(theme.line_stroke, 2.0));
    canvas.restore();
}

fn draw_labels(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme, title: &str, caption: Option<&str>) {
    let mut paint_text = skia::Paint::default();
    paint_text.set_anti_alias(true);
    paint_text.set_color(theme.axis_label);
    let mut font = skia::Font::default();
    font.set_size(14.0);

    canvas.draw_str(title, (f.l, f.t - 10.0), &font, &paint_text);
    if let Some(caption) = caption {
        canvas.draw_str(caption, (f.l, f.b + 28.0), &font, &paint_text);
    }

    font.set_size(11.0);
    for v in [f.y_range.1, 0.0, f.y_range.0] {
        let label = format!("{v:.0}");
        canvas.draw_str(&label, (f.l - 40.0, f.sy(v) + 4.0), &font, &paint_text);
    }
}
