//! Page-by-page structural report of a PDF document

use crate::encoding::OutputEncoding;
use crate::error::{Error, Result};
use crate::model::{ImageRegion, Page, Table};
use crate::pdf::{parse_page_range, DocumentSource};
use std::fmt;
use std::io::Write;

/// Shown in place of text for pages with nothing to extract
pub const NO_TEXT_MARKER: &str = "[NO TEXT EXTRACTED ON THIS PAGE]";

/// Shown for image dimensions the backend could not measure
const UNDECLARED: &str = "?";

/// What to do when a single page cannot be extracted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the report at the first failing page
    #[default]
    Abort,
    /// Note the failure in the page's section and carry on
    Continue,
}

/// One unit of report output
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// Leading summary line
    Header { total_pages: u32 },
    /// A successfully extracted page
    Page(Page),
    /// A page that failed under [`FailurePolicy::Continue`]
    Failed { ordinal: u32, reason: String },
}

fn page_banner(f: &mut fmt::Formatter<'_>, ordinal: u32) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "========== PAGE {} ==========", ordinal)
}

/// Whole sizes keep one decimal (`200.0`); others print in shortest form (`99.75`)
fn format_dimension(value: Option<f32>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => UNDECLARED.to_string(),
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, index: usize, table: &Table) -> fmt::Result {
    let rows = serde_json::to_string(table).map_err(|_| fmt::Error)?;
    writeln!(f, "  Table {}: {}", index, rows)
}

fn write_image(f: &mut fmt::Formatter<'_>, image: &ImageRegion) -> fmt::Result {
    let bbox = &image.bbox;
    writeln!(
        f,
        "  Image bbox: x0={:.1}, y0={:.1}, x1={:.1}, y1={:.1}, width={}, height={}",
        bbox.x0,
        bbox.y0,
        bbox.x1,
        bbox.y1,
        format_dimension(image.width),
        format_dimension(image.height),
    )
}

fn write_page(f: &mut fmt::Formatter<'_>, page: &Page) -> fmt::Result {
    page_banner(f, page.ordinal)?;

    match page.text.as_deref() {
        Some(text) if !text.is_empty() => {
            writeln!(f, "[TEXT CONTENT]")?;
            writeln!(f, "{}", text)?;
        }
        _ => writeln!(f, "{}", NO_TEXT_MARKER)?,
    }

    if !page.tables.is_empty() {
        writeln!(f)?;
        writeln!(f, "[TABLES FOUND: {}]", page.tables.len())?;
        for (i, table) in page.tables.iter().enumerate() {
            write_table(f, i + 1, table)?;
        }
    }

    if !page.images.is_empty() {
        writeln!(f)?;
        writeln!(f, "[EMBEDDED IMAGE OBJECTS: {}]", page.images.len())?;
        for image in &page.images {
            write_image(f, image)?;
        }
    }

    if page.rect_count > 0 {
        writeln!(f)?;
        writeln!(
            f,
            "[RECT OBJECTS (possible figure borders): {}]",
            page.rect_count
        )?;
    }

    Ok(())
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header { total_pages } => writeln!(f, "TOTAL PAGES: {}", total_pages),
            Section::Page(page) => write_page(f, page),
            Section::Failed { ordinal, reason } => {
                page_banner(f, *ordinal)?;
                writeln!(f, "[PAGE EXTRACTION FAILED: {}]", reason)
            }
        }
    }
}

/// Render one page's section of the report
pub fn render_page(page: &Page) -> String {
    Section::Page(page.clone()).to_string()
}

/// Counts from a written report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Pages in the document
    pub pages_total: u32,
    /// Pages rendered successfully
    pub pages_reported: u32,
    /// Pages that failed under [`FailurePolicy::Continue`]
    pub pages_failed: u32,
}

/// Produces the report for one document
pub struct PageReporter<D> {
    document: D,
    pages: Option<Vec<u32>>,
    failure_policy: FailurePolicy,
}

impl<D: DocumentSource> PageReporter<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            pages: None,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Restrict the report to a page range such as `1-3,7`
    pub fn select_pages(mut self, range: &str) -> Result<Self> {
        self.pages = Some(parse_page_range(range, self.document.page_count())?);
        Ok(self)
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Release the reporter, handing back the document
    pub fn into_inner(self) -> D {
        self.document
    }

    /// Lazily produce the report: the header, then one section per page.
    ///
    /// Pages are only extracted as the iterator advances. Under
    /// [`FailurePolicy::Abort`] the first page error is yielded and the
    /// iterator ends.
    pub fn sections(&self) -> Sections<'_, D> {
        let ordinals = match &self.pages {
            Some(pages) => pages.clone(),
            None => (1..=self.document.page_count()).collect(),
        };

        Sections {
            reporter: self,
            header_done: false,
            finished: false,
            ordinals: ordinals.into_iter(),
        }
    }

    /// Stream the report to `writer` in the given encoding
    pub fn write_report<W: Write>(
        &self,
        writer: &mut W,
        encoding: OutputEncoding,
    ) -> Result<ReportSummary> {
        let mut summary = ReportSummary {
            pages_total: self.document.page_count(),
            ..ReportSummary::default()
        };

        writer.write_all(encoding.preamble())?;
        for section in self.sections() {
            let section = section?;
            match &section {
                Section::Page(_) => summary.pages_reported += 1,
                Section::Failed { .. } => summary.pages_failed += 1,
                Section::Header { .. } => {}
            }
            encoding.write_str(writer, &section.to_string())?;
        }
        writer.flush()?;

        tracing::info!(
            pages_total = summary.pages_total,
            pages_reported = summary.pages_reported,
            pages_failed = summary.pages_failed,
            "Report complete"
        );
        Ok(summary)
    }

    /// Render the whole report into a string
    pub fn render(&self) -> Result<String> {
        self.sections()
            .map(|section| section.map(|s| s.to_string()))
            .collect()
    }
}

/// Iterator returned by [`PageReporter::sections`]
pub struct Sections<'r, D> {
    reporter: &'r PageReporter<D>,
    header_done: bool,
    finished: bool,
    ordinals: std::vec::IntoIter<u32>,
}

impl<D: DocumentSource> Iterator for Sections<'_, D> {
    type Item = Result<Section>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.header_done {
            self.header_done = true;
            return Some(Ok(Section::Header {
                total_pages: self.reporter.document.page_count(),
            }));
        }

        let ordinal = self.ordinals.next()?;
        tracing::debug!(page = ordinal, "Extracting page");

        match self.reporter.document.page(ordinal) {
            Ok(page) => Some(Ok(Section::Page(page))),
            Err(e) => {
                let e = match e.page() {
                    Some(_) => e,
                    None => Error::page_extraction(ordinal, e),
                };
                tracing::warn!(page = ordinal, error = %e, "Page extraction failed");

                match self.reporter.failure_policy {
                    FailurePolicy::Abort => {
                        self.finished = true;
                        Some(Err(e))
                    }
                    FailurePolicy::Continue => Some(Ok(Section::Failed {
                        ordinal,
                        reason: e.to_string(),
                    })),
                }
            }
        }
    }
}
