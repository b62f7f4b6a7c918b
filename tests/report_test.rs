//! Report tests over an in-memory document

use pdf_page_report::geometry::BBox;
use pdf_page_report::{
    DocumentSource, Error, FailurePolicy, ImageRegion, OutputEncoding, Page, PageReporter,
    Result, Section, Table,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::cell::RefCell;

/// Pages held in memory; ordinals listed in `broken` fail to extract
struct MemoryDocument {
    pages: Vec<Page>,
    broken: Vec<u32>,
    requested: RefCell<Vec<u32>>,
}

impl MemoryDocument {
    fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            broken: Vec::new(),
            requested: RefCell::new(Vec::new()),
        }
    }

    fn with_broken(mut self, ordinal: u32) -> Self {
        self.broken.push(ordinal);
        self
    }

    fn blank(count: u32) -> Self {
        Self::new((1..=count).map(Page::new).collect())
    }
}

impl DocumentSource for MemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, ordinal: u32) -> Result<Page> {
        self.requested.borrow_mut().push(ordinal);
        if self.broken.contains(&ordinal) {
            return Err(Error::PageExtraction {
                page: ordinal,
                reason: "unreadable content stream".to_string(),
            });
        }
        self.pages
            .get(ordinal as usize - 1)
            .cloned()
            .ok_or(Error::PageOutOfBounds {
                page: ordinal,
                total: self.page_count(),
            })
    }
}

fn two_page_document() -> MemoryDocument {
    MemoryDocument::new(vec![
        Page::new(1).with_text("Hello"),
        Page::new(2)
            .with_table(Table::from_rows([["a", "b"], ["c", "d"]]))
            .with_image(ImageRegion::placed(BBox::new(10.0, 20.0, 110.0, 220.0)))
            .with_rect_count(3),
    ])
}

fn page_banners(report: &str) -> Vec<String> {
    report
        .lines()
        .filter(|line| line.starts_with("========== PAGE "))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_two_page_report() {
    let report = PageReporter::new(two_page_document()).render().unwrap();

    let expected = "\
TOTAL PAGES: 2

========== PAGE 1 ==========
[TEXT CONTENT]
Hello

========== PAGE 2 ==========
[NO TEXT EXTRACTED ON THIS PAGE]

[TABLES FOUND: 1]
  Table 1: [[\"a\",\"b\"],[\"c\",\"d\"]]

[EMBEDDED IMAGE OBJECTS: 1]
  Image bbox: x0=10.0, y0=20.0, x1=110.0, y1=220.0, width=100.0, height=200.0

[RECT OBJECTS (possible figure borders): 3]
";
    assert_eq!(report, expected);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(12)]
fn test_header_and_sections_match_page_count(#[case] count: u32) {
    let report = PageReporter::new(MemoryDocument::blank(count))
        .render()
        .unwrap();

    assert!(report.starts_with(&format!("TOTAL PAGES: {}\n", count)));
    let expected: Vec<String> = (1..=count)
        .map(|i| format!("========== PAGE {} ==========", i))
        .collect();
    assert_eq!(page_banners(&report), expected);
}

#[test]
fn test_empty_document_has_header_only() {
    let report = PageReporter::new(MemoryDocument::blank(0)).render().unwrap();
    assert_eq!(report, "TOTAL PAGES: 0\n");
}

#[test]
fn test_whitespace_only_text_is_reported_as_text() {
    let document = MemoryDocument::new(vec![Page::new(1).with_text("\n \n")]);
    let report = PageReporter::new(document).render().unwrap();

    assert!(report.contains("[TEXT CONTENT]\n\n \n\n"));
    assert!(!report.contains("[NO TEXT EXTRACTED ON THIS PAGE]"));
}

#[test]
fn test_tables_keep_source_order_and_cells() {
    let first = Table {
        rows: vec![vec![Some("Name".to_string()), Some("Qty \"kg\"".to_string())]],
    };
    let second = Table {
        rows: vec![vec![None, Some("".to_string())]],
    };
    let document = MemoryDocument::new(vec![Page::new(1)
        .with_table(first)
        .with_table(second)]);

    let report = PageReporter::new(document).render().unwrap();
    assert!(report.contains(
        "[TABLES FOUND: 2]\n  Table 1: [[\"Name\",\"Qty \\\"kg\\\"\"]]\n  Table 2: [[null,\"\"]]\n"
    ));
}

#[test]
fn test_sections_are_lazy() {
    let reporter = PageReporter::new(MemoryDocument::blank(5));
    let mut sections = reporter.sections();

    assert!(matches!(
        sections.next(),
        Some(Ok(Section::Header { total_pages: 5 }))
    ));
    assert!(reporter.document().requested.borrow().is_empty());

    assert!(matches!(sections.next(), Some(Ok(Section::Page(_)))));
    assert_eq!(*reporter.document().requested.borrow(), vec![1]);
}

#[test]
fn test_abort_stops_at_failing_page() {
    let reporter = PageReporter::new(MemoryDocument::blank(4).with_broken(2));

    let sections: Vec<_> = reporter.sections().collect();
    assert_eq!(sections.len(), 3);
    match &sections[2] {
        Err(err) => assert_eq!(err.page(), Some(2)),
        Ok(section) => panic!("expected failure, got {:?}", section),
    }
    assert_eq!(*reporter.document().requested.borrow(), vec![1, 2]);

    let err = reporter.render().unwrap_err();
    assert!(matches!(err, Error::PageExtraction { page: 2, .. }));
    assert!(!err.is_document_open());
}

#[test]
fn test_continue_reports_failure_inline() {
    let reporter = PageReporter::new(MemoryDocument::blank(3).with_broken(2))
        .with_failure_policy(FailurePolicy::Continue);

    let mut out = Vec::new();
    let summary = reporter
        .write_report(&mut out, OutputEncoding::Utf8)
        .unwrap();
    let report = String::from_utf8(out).unwrap();

    assert_eq!(summary.pages_total, 3);
    assert_eq!(summary.pages_reported, 2);
    assert_eq!(summary.pages_failed, 1);
    assert!(report.contains(
        "========== PAGE 2 ==========\n[PAGE EXTRACTION FAILED: Failed to extract page 2: unreadable content stream]\n"
    ));
    assert_eq!(page_banners(&report).len(), 3);
}

#[test]
fn test_selected_pages_keep_total_in_header() {
    let reporter = PageReporter::new(MemoryDocument::blank(10))
        .select_pages("7,2-3")
        .unwrap();
    let report = reporter.render().unwrap();

    assert!(report.starts_with("TOTAL PAGES: 10\n"));
    assert_eq!(
        page_banners(&report),
        vec![
            "========== PAGE 2 ==========",
            "========== PAGE 3 ==========",
            "========== PAGE 7 ==========",
        ]
    );
}

#[test]
fn test_invalid_selection_rejected() {
    let result = PageReporter::new(MemoryDocument::blank(3)).select_pages("2-9");
    assert!(matches!(result, Err(Error::InvalidPageRange { .. })));
}

#[test]
fn test_write_report_with_bom() {
    let reporter = PageReporter::new(MemoryDocument::blank(1));
    let mut out = Vec::new();
    reporter
        .write_report(&mut out, OutputEncoding::Utf8Bom)
        .unwrap();

    assert_eq!(&out[..3], &[0xEF, 0xBB, 0xBF]);
    assert!(String::from_utf8(out[3..].to_vec())
        .unwrap()
        .starts_with("TOTAL PAGES: 1\n"));
}

#[test]
fn test_write_report_ascii_replaces_non_ascii_text() {
    let document = MemoryDocument::new(vec![Page::new(1).with_text("Größe")]);
    let mut out = Vec::new();
    PageReporter::new(document)
        .write_report(&mut out, OutputEncoding::Ascii)
        .unwrap();

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("[TEXT CONTENT]\nGr??e\n"));
}

#[test]
fn test_write_report_utf16() {
    let mut out = Vec::new();
    PageReporter::new(MemoryDocument::blank(1))
        .write_report(&mut out, OutputEncoding::Utf16Le)
        .unwrap();

    assert_eq!(&out[..2], &[0xFF, 0xFE]);
    let units: Vec<u16> = out[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let text = String::from_utf16(&units).unwrap();
    assert!(text.starts_with("TOTAL PAGES: 1\n"));
}
