//! PDF Page Report Library
//!
//! Walks a PDF page by page and reports its structure:
//! - extracted text, or a marker when a page has none
//! - tables found by pdfplumber
//! - embedded image placements
//! - the number of vector rectangles drawn

pub mod config;
pub mod encoding;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod report;
pub mod source;

pub use config::{ReportConfig, TableStrategy, TextEngine};
pub use encoding::OutputEncoding;
pub use error::{Error, Result};
pub use model::{ImageRegion, Page, Table};
pub use pdf::{DocumentSource, PdfiumLibrary, PdfiumText, PlumberDocument, TextLayer};
pub use report::{render_page, FailurePolicy, PageReporter, ReportSummary, Section};

use std::io::Write;

/// Open the configured PDF and write its report to `writer`.
///
/// The document is held only for the duration of the call and released on
/// every exit path.
pub fn generate_report<W: Write>(config: &ReportConfig, writer: &mut W) -> Result<ReportSummary> {
    config.validate()?;

    let resolved = source::resolve_path(&config.path)?;
    let password = config.password.as_deref();

    // Bound before the document so the text layer can borrow it
    let library = match config.text_engine {
        TextEngine::Pdfium => Some(PdfiumLibrary::bind()?),
        TextEngine::Plumber => None,
    };

    let mut document = PlumberDocument::open(&resolved, password)?
        .with_table_settings(config.table_strategy.settings());
    if let Some(library) = &library {
        document = document.with_text_layer(library.load(&resolved, password)?);
    }

    tracing::info!(
        source = document.source_name(),
        page_count = document.page_count(),
        text_engine = %config.text_engine,
        table_strategy = %config.table_strategy,
        "Generating report"
    );

    let mut reporter = PageReporter::new(document).with_failure_policy(config.failure_policy);
    if let Some(pages) = &config.pages {
        reporter = reporter.select_pages(pages)?;
    }

    reporter.write_report(writer, config.encoding)
}
