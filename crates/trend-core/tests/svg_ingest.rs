// File: crates/trend-core/tests/svg_ingest.rs
// Purpose: End-to-end extraction from SVG documents (basic shapes, transforms, smooth markers).

use trend_core::svg::{load_svg_file, parse_svg};
use trend_core::{extract, extract_svg_file, ExtractConfig, TrendError, XLimits};

const POLYLINE_CHART: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="440" height="100" viewBox="0 0 440 100">
  <line x1="0" y1="10" x2="420" y2="10" stroke="#cccccc"/>
  <line x1="0" y1="50" x2="420" y2="50" stroke="#000000"/>
  <line x1="0" y1="90" x2="420" y2="90" stroke="#cccccc"/>
  <polyline points="0,50 210,10 420,90" fill="none" stroke="red"/>
</svg>"##;

#[test]
fn polyline_chart_extracts_expected_points() {
    let paths = parse_svg(POLYLINE_CHART.as_bytes()).expect("parse");
    assert_eq!(paths.len(), 4);
    assert_eq!(paths.iter().filter(|p| p.segment_count() == 1).count(), 3);

    let ex = extract(&paths, &ExtractConfig::default()).expect("extract");
    assert_eq!(ex.classification.references.to_array(), [90.0, 50.0, 10.0]);
    let days: Vec<i64> = ex.points.iter().map(|p| p.day_offset).collect();
    assert_eq!(days, vec![1, 22, 43]);
    let values: Vec<f64> = ex.points.iter().map(|p| p.value).collect();
    assert!((values[0]).abs() < 1e-6);
    assert!((values[1] - 80.0).abs() < 1e-6);
    assert!((values[2] + 80.0).abs() < 1e-6);
}

#[test]
fn group_transforms_are_applied() {
    let svg = POLYLINE_CHART
        .replace("viewBox=\"0 0 440 100\">", "viewBox=\"0 0 440 100\"><g transform=\"translate(10 5)\">")
        .replace("</svg>", "</g></svg>");
    let paths = parse_svg(svg.as_bytes()).expect("parse");
    // the polyline is listed first, ahead of the three lines
    let start = paths[0].start().expect("start");
    assert!((start.x - 10.0).abs() < 1e-6);
    assert!((start.y - 55.0).abs() < 1e-6);
    let first_line = paths[1].start().expect("start");
    assert!((first_line.y - 15.0).abs() < 1e-6);

    // a shared translation leaves chart units unchanged
    let ex = extract(&paths, &ExtractConfig::default()).expect("extract");
    assert_eq!(ex.points.iter().map(|p| p.day_offset).collect::<Vec<_>>(), vec![1, 22, 43]);
}

#[test]
fn cubic_marker_yields_one_sample() {
    let svg = POLYLINE_CHART.replace(
        r#"<polyline points="0,50 210,10 420,90" fill="none" stroke="red"/>"#,
        r#"<path d="M208 30 C208 28 212 28 212 30 C212 32 208 32 208 30 Z" fill="blue"/>"#,
    );
    let paths = parse_svg(svg.as_bytes()).expect("parse");
    let ex = extract(&paths, &ExtractConfig::default()).expect("extract");
    assert_eq!(ex.points.len(), 1);
    assert_eq!(ex.points[0].day_offset, 22);
    assert!((ex.points[0].value - 40.0).abs() < 1e-3);
}

#[test]
fn missing_reference_line_fails_classification() {
    let svg = POLYLINE_CHART.replace(r##"<line x1="0" y1="90" x2="420" y2="90" stroke="#cccccc"/>"##, "");
    let paths = parse_svg(svg.as_bytes()).expect("parse");
    let err = extract(&paths, &ExtractConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::Classification { count: 2 }));
}

#[test]
fn malformed_document_is_an_xml_error() {
    let err = parse_svg(b"<svg><line").unwrap_err();
    assert!(matches!(err, TrendError::Xml(_)));
}

#[test]
fn non_svg_root_is_rejected() {
    let err = parse_svg(b"<html><body/></html>").unwrap_err();
    assert!(matches!(err, TrendError::Svg(_)));
}

#[test]
fn paths_are_listed_before_lines() {
    // gridline at y=10 is a <line>, the other two are <path>s; the x-limit
    // rule counts <path> elements first
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="440" height="100">
  <line x1="0" y1="10" x2="420" y2="10" stroke="#cccccc"/>
  <path d="M5 50 L425 50" stroke="#000000"/>
  <path d="M0 90 L420 90" stroke="#cccccc"/>
  <path d="M0 50 L210 10 L420 90" fill="none" stroke="red"/>
</svg>"##;
    let paths = parse_svg(svg.as_bytes()).expect("parse");
    let starts: Vec<(f64, f64)> = paths
        .iter()
        .map(|p| p.start().expect("start"))
        .map(|p| (p.x, p.y))
        .collect();
    assert_eq!(starts, vec![(5.0, 50.0), (0.0, 90.0), (0.0, 50.0), (0.0, 10.0)]);

    let ex = extract(&paths, &ExtractConfig::default()).expect("extract");
    assert_eq!(ex.classification.xlimits, XLimits::new(0.0, 420.0));
}

#[test]
fn element_ids_are_kept() {
    let svg = POLYLINE_CHART.replace(r#"<polyline "#, r#"<polyline id="trend" "#);
    let paths = parse_svg(svg.as_bytes()).expect("parse");
    assert_eq!(paths[0].id(), Some("trend"));
    assert_eq!(paths[1].id(), None);
}

#[test]
fn coordinates_keep_full_precision() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M4200.123456789 7.5 L4300.25 7.5"/></svg>"#;
    let paths = parse_svg(svg.as_bytes()).expect("parse");
    assert_eq!(paths[0].start().expect("start").x, 4200.123456789);
}

#[test]
fn resource_subtrees_are_skipped() {
    let svg = POLYLINE_CHART.replace(
        "viewBox=\"0 0 440 100\">",
        "viewBox=\"0 0 440 100\"><defs><clipPath id=\"c\"><rect width=\"440\" height=\"100\"/></clipPath></defs>",
    );
    assert_eq!(parse_svg(svg.as_bytes()).expect("parse").len(), 4);
}

#[test]
fn basic_shapes_become_paths() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <rect x="1" y="2" width="10" height="5"/>
  <polygon points="0,0 4,0 4,4"/>
  <circle cx="5" cy="5" r="2"/>
</svg>"#;
    let paths = parse_svg(svg.as_bytes()).expect("parse");
    // polygon, circle, rect
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0].segment_count(), 3);
    assert_eq!(paths[2].segment_count(), 4);
    let bb = paths[2].bbox().expect("bbox");
    assert_eq!((bb.x0, bb.y0, bb.x1, bb.y1), (1.0, 2.0, 11.0, 7.0));
}

#[test]
fn files_load_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.svg");
    std::fs::write(&path, POLYLINE_CHART).expect("write svg");
    assert_eq!(load_svg_file(&path).expect("load").len(), 4);
    let ex = extract_svg_file(&path, &ExtractConfig::default()).expect("extract");
    assert_eq!(ex.points.len(), 3);

    let err = load_svg_file(dir.path().join("absent.svg")).unwrap_err();
    assert!(matches!(err, TrendError::Io(_)));
}
