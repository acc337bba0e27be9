// File: crates/trend-core/src/svg.rs
// Summary: SVG ingestion; flattens shape elements into f64 path primitives, grouped by element kind.

use std::path::Path;
use std::str::FromStr;

use kurbo::{Affine, BezPath, Circle, Ellipse, Point, Rect, Shape};
use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::{Result, TrendError};
use crate::geometry::PathPrimitive;

/// Flattening tolerance for circles and ellipses.
const SHAPE_TOLERANCE: f64 = 1e-3;

/// Subtrees that define resources rather than drawn geometry.
const NON_RENDERED: [&str; 6] = ["defs", "clipPath", "mask", "marker", "pattern", "symbol"];

/// Shape element kinds, in the order their paths are listed.
///
/// Drawings are listed kind by kind (every `path`, then every `polyline`,
/// ...), document order within a kind. The x-limit rule counts lines in this
/// order, so it matters when `<line>` and `<path>` gridlines are mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ElementKind {
    Path,
    Polyline,
    Polygon,
    Line,
    Ellipse,
    Circle,
    Rect,
}

impl ElementKind {
    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "path" => ElementKind::Path,
            "polyline" => ElementKind::Polyline,
            "polygon" => ElementKind::Polygon,
            "line" => ElementKind::Line,
            "ellipse" => ElementKind::Ellipse,
            "circle" => ElementKind::Circle,
            "rect" => ElementKind::Rect,
            _ => return None,
        })
    }
}

/// Read and flatten an SVG file.
pub fn load_svg_file(path: impl AsRef<Path>) -> Result<Vec<PathPrimitive>> {
    let data = std::fs::read(path.as_ref())?;
    parse_svg(&data)
}

/// Parse SVG bytes into path primitives.
///
/// Coordinates stay in `f64` as written. Transforms on the element and its
/// ancestor groups are applied, so every primitive shares one native
/// coordinate space. Text, images and `<use>` references are ignored.
pub fn parse_svg(data: &[u8]) -> Result<Vec<PathPrimitive>> {
    let text = std::str::from_utf8(data).map_err(|e| TrendError::Svg(format!("not UTF-8: {e}")))?;
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(TrendError::Svg(format!("root element is <{}>, not <svg>", root.tag_name().name())));
    }

    let mut shapes = Vec::new();
    collect(root, Affine::IDENTITY, &mut shapes)?;
    // stable: document order survives within each kind
    shapes.sort_by_key(|(kind, _)| *kind);
    debug!(paths = shapes.len(), "parsed SVG document");
    Ok(shapes.into_iter().map(|(_, p)| p).collect())
}

fn collect(node: Node, parent: Affine, out: &mut Vec<(ElementKind, PathPrimitive)>) -> Result<()> {
    for child in node.children().filter(|n| n.is_element()) {
        let tag = child.tag_name().name();
        if NON_RENDERED.contains(&tag) {
            continue;
        }
        let ts = parent * own_transform(child)?;
        match ElementKind::from_tag(tag) {
            Some(kind) => {
                if let Some(mut bez) = shape_path(kind, child)? {
                    if ts != Affine::IDENTITY {
                        bez.apply_affine(ts);
                    }
                    let id = child.attribute("id").unwrap_or_default();
                    out.push((kind, PathPrimitive::from_bez_path(&bez).with_id(id)));
                }
            }
            None => collect(child, ts, out)?,
        }
    }
    Ok(())
}

fn own_transform(node: Node) -> Result<Affine> {
    let Some(raw) = node.attribute("transform") else {
        return Ok(Affine::IDENTITY);
    };
    let t = svgtypes::Transform::from_str(raw)
        .map_err(|e| TrendError::Svg(format!("bad transform {raw:?}: {e}")))?;
    Ok(Affine::new([t.a, t.b, t.c, t.d, t.e, t.f]))
}

fn shape_path(kind: ElementKind, node: Node) -> Result<Option<BezPath>> {
    let bez = match kind {
        ElementKind::Path => match node.attribute("d") {
            Some(d) => BezPath::from_svg(d).map_err(|e| TrendError::Svg(format!("bad path data: {e}")))?,
            None => return Ok(None),
        },
        ElementKind::Polyline | ElementKind::Polygon => {
            let mut bez = BezPath::new();
            let points = svgtypes::PointsParser::from(node.attribute("points").unwrap_or_default());
            for (i, (x, y)) in points.enumerate() {
                if i == 0 {
                    bez.move_to((x, y));
                } else {
                    bez.line_to((x, y));
                }
            }
            if kind == ElementKind::Polygon && !bez.elements().is_empty() {
                bez.close_path();
            }
            bez
        }
        ElementKind::Line => {
            let mut bez = BezPath::new();
            bez.move_to((length(node, "x1")?, length(node, "y1")?));
            bez.line_to((length(node, "x2")?, length(node, "y2")?));
            bez
        }
        ElementKind::Ellipse => {
            let center = Point::new(length(node, "cx")?, length(node, "cy")?);
            Ellipse::new(center, (length(node, "rx")?, length(node, "ry")?), 0.0).to_path(SHAPE_TOLERANCE)
        }
        ElementKind::Circle => {
            let center = Point::new(length(node, "cx")?, length(node, "cy")?);
            Circle::new(center, length(node, "r")?).to_path(SHAPE_TOLERANCE)
        }
        ElementKind::Rect => {
            let (x, y) = (length(node, "x")?, length(node, "y")?);
            let (w, h) = (length(node, "width")?, length(node, "height")?);
            Rect::new(x, y, x + w, y + h).to_path(SHAPE_TOLERANCE)
        }
    };
    Ok(Some(bez))
}

/// Numeric attribute in user units; absent means 0.
fn length(node: Node, name: &str) -> Result<f64> {
    match node.attribute(name) {
        None => Ok(0.0),
        Some(raw) => svgtypes::Length::from_str(raw)
            .map(|l| l.number)
            .map_err(|e| TrendError::Svg(format!("bad {name} {raw:?}: {e}"))),
    }
}
