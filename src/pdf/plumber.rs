//! PDF backend using pdfplumber
//!
//! Text, tables, image placements and rectangles all come from one content
//! stream pass, including anything drawn inside Form XObjects.

use super::document::{check_ordinal, DocumentSource, TextLayer};
use crate::error::{Error, Result};
use crate::geometry::BBox;
use crate::model::{ImageRegion, Page, Table};
use crate::source::ResolvedPdf;
use pdfplumber::{Pdf, PdfError, TableSettings, TextOptions};

/// Map pdfplumber open errors to our error type
fn map_plumber_error(err: PdfError) -> Error {
    match err {
        PdfError::PasswordRequired { .. } => Error::PasswordRequired,
        PdfError::InvalidPassword { .. } => Error::IncorrectPassword,
        PdfError::IoError(reason) => Error::Io(std::io::Error::other(reason)),
        other => Error::InvalidPdf {
            reason: other.to_string(),
        },
    }
}

/// Convert a top-down placement (`top` measured from the page's upper edge)
/// into a box in PDF user space
fn placement_bbox(x0: f64, top: f64, x1: f64, bottom: f64, page_height: f64) -> BBox {
    BBox::new(
        x0 as f32,
        (page_height - bottom) as f32,
        x1 as f32,
        (page_height - top) as f32,
    )
}

/// A document opened through pdfplumber; released when dropped
pub struct PlumberDocument<'t> {
    pdf: Pdf,
    source_name: String,
    page_count: u32,
    table_settings: TableSettings,
    text_layer: Option<Box<dyn TextLayer + 't>>,
}

impl<'t> PlumberDocument<'t> {
    /// Open a resolved PDF, decrypting it with `password` when given
    pub fn open(pdf: &ResolvedPdf, password: Option<&str>) -> Result<Self> {
        let document = match password {
            Some(pwd) => Pdf::open_file_with_password(&pdf.path, pwd.as_bytes(), None),
            None => Pdf::open_file(&pdf.path, None),
        }
        .map_err(map_plumber_error)?;

        let page_count = u32::try_from(document.page_count()).map_err(|_| Error::InvalidPdf {
            reason: format!("too many pages: {}", document.page_count()),
        })?;
        tracing::debug!(source = %pdf.source_name, page_count, "Loaded PDF");

        Ok(Self {
            pdf: document,
            source_name: pdf.source_name.clone(),
            page_count,
            table_settings: TableSettings::default(),
            text_layer: None,
        })
    }

    pub fn with_table_settings(mut self, table_settings: TableSettings) -> Self {
        self.table_settings = table_settings;
        self
    }

    /// Take page text from `layer` instead of pdfplumber's own extraction
    pub fn with_text_layer(mut self, layer: impl TextLayer + 't) -> Self {
        self.text_layer = Some(Box::new(layer));
        self
    }

    /// Where the document was read from
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

impl DocumentSource for PlumberDocument<'_> {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page(&self, ordinal: u32) -> Result<Page> {
        check_ordinal(ordinal, self.page_count)?;

        let page = self
            .pdf
            .page((ordinal - 1) as usize)
            .map_err(|e| Error::page_extraction(ordinal, e))?;

        let text = match &self.text_layer {
            Some(layer) => layer.page_text(ordinal)?,
            None => page.extract_text(&TextOptions::default()),
        };

        let height = page.height();
        let images: Vec<ImageRegion> = page
            .images()
            .iter()
            .map(|img| {
                ImageRegion::new(placement_bbox(img.x0, img.top, img.x1, img.bottom, height))
                    .with_size(img.width as f32, img.height as f32)
            })
            .collect();

        let tables: Vec<Table> = page
            .extract_tables(&self.table_settings)
            .into_iter()
            .map(|rows| Table { rows })
            .collect();

        tracing::debug!(
            page = ordinal,
            text_bytes = text.len(),
            tables = tables.len(),
            images = images.len(),
            rects = page.rects().len(),
            "Collected page objects"
        );

        Ok(Page {
            tables,
            images,
            ..Page::new(ordinal)
                .with_text(text)
                .with_rect_count(page.rects().len())
        })
    }
}
