//! Integration tests for mapping findings to annotations.

use std::io::Write;

use glyphmark::markup::{to_json, Style, StyleTable};
use glyphmark::{
    build_document, AnnotationMapper, Color, Document, Error, Finding, GlyphEvent, GlyphRun,
    MapperOptions, MarkupKind, Span, TextCategory, TextFinding,
};

fn two_page_document() -> Document {
    let word = |text: &str, x: f32, y: f32| GlyphEvent::Glyph(GlyphRun::new(text, x, y, 30.0, 10.0, 800.0));
    build_document(vec![
        GlyphEvent::PageStart,
        word("Alpha", 50.0, 100.0),
        GlyphEvent::WordSeparator,
        word("beta", 90.0, 100.0),
        GlyphEvent::LineBreak,
        GlyphEvent::PageEnd,
        GlyphEvent::PageStart,
        word("Gamma", 50.0, 300.0),
        GlyphEvent::LineBreak,
        GlyphEvent::PageEnd,
    ])
    .unwrap()
}

fn findings_for(doc: &Document) -> Vec<Finding> {
    doc.words()
        .zip([
            Some(TextCategory::PoorWording),
            Some(TextCategory::TableOfFigures),
            None,
        ])
        .map(|(word, category)| TextFinding::new(category, word.clone()).into())
        .collect()
}

#[test]
fn test_coordinate_flip() {
    let buffer = glyphmark::GlyphBuffer::new(vec![
        GlyphRun::new("x", 10.0, 100.0, 5.0, 10.0, 800.0).on_page(1),
    ]);
    let span = Span::new(buffer, 0, 0).unwrap();
    assert_eq!(span.y(), 700.0);
    assert_eq!(span.bounding_rect().y, 700.0);
}

#[test]
fn test_total_style_mapping() {
    for category in TextCategory::ALL {
        let style = Style::for_category(Some(category));
        if category == TextCategory::Other {
            assert_eq!(style, Style::new(Color::YELLOW, MarkupKind::Highlight));
        } else {
            assert_ne!(style, Style::DEFAULT, "{:?} has no dedicated style", category);
        }
    }
    assert_eq!(
        Style::for_category(None),
        Style::new(Color::YELLOW, MarkupKind::Highlight)
    );
}

#[test]
fn test_annotations_land_on_target_pages() {
    let mut doc = two_page_document();
    let findings = findings_for(&doc);
    let report = AnnotationMapper::default().map_all(&mut doc, &findings);

    assert_eq!(report.applied, 3);
    assert_eq!(doc.get_page(1).unwrap().annotations().len(), 2);
    assert_eq!(doc.get_page(2).unwrap().annotations().len(), 1);

    let strike = &doc.get_page(1).unwrap().annotations()[0];
    assert_eq!(strike.kind, MarkupKind::StrikeOut);
    assert_eq!(strike.color, Color::RED);
    assert_eq!(strike.rect.x, 50.0);
    assert_eq!(strike.rect.y, 700.0);
    assert_eq!(strike.rect.width, 30.0);
    assert!((strike.rect.height - 11.0).abs() < 1e-4);

    let fallback = &doc.get_page(2).unwrap().annotations()[0];
    assert_eq!(fallback.kind, MarkupKind::Highlight);
    assert_eq!(fallback.color, Color::YELLOW);
    assert_eq!(fallback.rect.y, 500.0);
}

#[test]
fn test_idempotent_annotation_cycle() {
    let mut once = two_page_document();
    let findings = findings_for(&once);
    let mapper = AnnotationMapper::default();
    mapper.map_all(&mut once, &findings);

    let mut cycled = two_page_document();
    let findings = findings_for(&cycled);
    AnnotationMapper::clear_all(&mut cycled);
    mapper.map_all(&mut cycled, &findings);
    AnnotationMapper::clear_all(&mut cycled);
    mapper.map_all(&mut cycled, &findings);

    for (a, b) in once.pages().iter().zip(cycled.pages()) {
        assert_eq!(a.annotations(), b.annotations());
    }
    assert_eq!(once.annotation_count(), cycled.annotation_count());
}

#[test]
fn test_invalid_target_does_not_stop_batch() {
    let mut doc = two_page_document();
    let mut findings = findings_for(&doc);
    if let Finding::Text(text) = &mut findings[0] {
        text.page_index = 42;
    }
    findings.push(TextFinding::not_found(TextCategory::Pagination).into());

    let report = AnnotationMapper::default().map_all(&mut doc, &findings);
    assert_eq!(report.applied, 2);
    assert_eq!(report.unlocated, 1);
    assert_eq!(report.rejected.len(), 1);
    assert!(matches!(
        report.rejected[0],
        Error::AnnotationTargetInvalid { page: 42, .. }
    ));
    assert!(!report.is_clean());
}

#[test]
fn test_line_span_annotation() {
    let mut doc = two_page_document();
    let line_span = doc.lines().next().unwrap().span().unwrap();
    assert_eq!(line_span.materialize(), "Alphabeta");

    let findings: Vec<Finding> = vec![TextFinding::new(TextCategory::SentenceComplexity, line_span).into()];
    AnnotationMapper::default().map_all(&mut doc, &findings);

    let annotation = &doc.get_page(1).unwrap().annotations()[0];
    assert_eq!(annotation.rect.width, 70.0);
    assert_eq!(annotation.quad_points[2], 120.0);
}

#[test]
fn test_style_file_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"overrides":{{"POOR_WORDING":{{"color":{{"r":0.0,"g":0.0,"b":1.0}},"kind":"highlight"}}}}}}"#
    )
    .unwrap();

    let table = StyleTable::load_or_default(file.path());
    assert_eq!(table.override_count(), 1);

    let mut doc = two_page_document();
    let findings = findings_for(&doc);
    let mapper = AnnotationMapper::new(MapperOptions::new().with_style_table(table));
    mapper.map_all(&mut doc, &findings);

    let first = &doc.get_page(1).unwrap().annotations()[0];
    assert_eq!(first.color, Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(first.kind, MarkupKind::Highlight);

    let second = &doc.get_page(1).unwrap().annotations()[1];
    assert_eq!(second.color, Color::DEEP_PINK);
}

#[test]
fn test_broken_style_file_degrades() {
    let err = StyleTable::from_json_file("/nonexistent/styles.json").unwrap_err();
    assert!(matches!(err, Error::ConfigurationDegraded(_)));
    assert!(!err.is_fatal_to_build());

    let table = StyleTable::load_or_default("/nonexistent/styles.json");
    assert_eq!(table, StyleTable::default());
}

#[test]
fn test_annotation_json_export() {
    let mut doc = two_page_document();
    let findings = findings_for(&doc);
    AnnotationMapper::default().map_all(&mut doc, &findings);

    let json = to_json(&doc, glyphmark::JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["annotation_count"], 3);
    assert_eq!(value["pages"][0]["annotations"][1]["kind"], "underline");
    assert_eq!(value["pages"][0]["annotations"][1]["category"], "TABLE_OF_FIGURES");
    assert_eq!(value["pages"][1]["annotations"][0]["category"], serde_json::Value::Null);
}
