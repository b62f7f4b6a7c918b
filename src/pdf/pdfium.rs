//! Optional text layer using PDFium

use super::document::{check_ordinal, TextLayer};
use crate::error::{Error, Result};
use crate::geometry::BBox;
use crate::layout::{chars_to_text, CharInfo};
use crate::source::ResolvedPdf;
use pdfium_render::prelude::*;

/// A bound PDFium library.
///
/// PDFium is not thread-safe, so each report binds its own instance; documents
/// loaded through it borrow it for their lifetime.
pub struct PdfiumLibrary {
    pdfium: Pdfium,
}

impl PdfiumLibrary {
    /// Bind to PDFium next to the binary, under `/opt/pdfium/lib`, or system-wide
    pub fn bind() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                    "/opt/pdfium/lib",
                ))
            })
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::Pdfium {
                reason: format!("Failed to initialize PDFium: {}", e),
            })?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Open the text layer of a resolved PDF; PDFium reads the file itself
    pub fn load<'a>(
        &'a self,
        pdf: &ResolvedPdf,
        password: Option<&'a str>,
    ) -> Result<PdfiumText<'a>> {
        let document = self
            .pdfium
            .load_pdf_from_file(&pdf.path, password)
            .map_err(|e| map_pdfium_error(e, password.is_some()))?;

        let page_count = document.pages().len() as u32;
        tracing::debug!(source = %pdf.source_name, page_count, "Loaded PDFium text layer");

        Ok(PdfiumText {
            document,
            page_count,
        })
    }
}

/// Map PDFium load errors to our error type
fn map_pdfium_error(err: PdfiumError, password_given: bool) -> Error {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            if password_given {
                Error::IncorrectPassword
            } else {
                Error::PasswordRequired
            }
        }
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::FormatError) => {
            Error::InvalidPdf {
                reason: format!("{}", err),
            }
        }
        _ => Error::Pdfium {
            reason: format!("{}", err),
        },
    }
}

/// Page text read through PDFium; the document is released when dropped
pub struct PdfiumText<'a> {
    document: PdfDocument<'a>,
    page_count: u32,
}

impl PdfiumText<'_> {
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_chars(page: &PdfPage, ordinal: u32) -> Result<Vec<CharInfo>> {
        let mut chars = Vec::new();

        // A page without a text layer is fine; a text layer PDFium cannot read is not
        let text = page
            .text()
            .map_err(|e| Error::page_extraction(ordinal, e))?;
        for segment in text.segments().iter() {
            let segment_chars = segment
                .chars()
                .map_err(|e| Error::page_extraction(ordinal, e))?;
            for char_result in segment_chars.iter() {
                let Some(c) = char_result.unicode_char() else {
                    continue;
                };
                if c.is_control() {
                    continue;
                }
                if let Ok(bounds) = char_result.loose_bounds() {
                    chars.push(CharInfo::new(
                        c,
                        BBox::new(
                            bounds.left().value,
                            bounds.bottom().value,
                            bounds.right().value,
                            bounds.top().value,
                        ),
                    ));
                }
            }
        }

        Ok(chars)
    }
}

impl TextLayer for PdfiumText<'_> {
    fn page_text(&self, ordinal: u32) -> Result<String> {
        check_ordinal(ordinal, self.page_count)?;

        let page = self
            .document
            .pages()
            .get((ordinal - 1) as u16)
            .map_err(|e| Error::page_extraction(ordinal, e))?;

        let chars = Self::page_chars(&page, ordinal)?;
        tracing::debug!(page = ordinal, chars = chars.len(), "Collected PDFium text");
        Ok(chars_to_text(&chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_error_mapping() {
        let err = || PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError);
        assert!(matches!(map_pdfium_error(err(), false), Error::PasswordRequired));
        assert!(matches!(map_pdfium_error(err(), true), Error::IncorrectPassword));
    }

    #[test]
    fn test_format_error_is_invalid_pdf() {
        let err = PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::FormatError);
        let mapped = map_pdfium_error(err, false);
        assert!(matches!(mapped, Error::InvalidPdf { .. }));
        assert!(mapped.is_document_open());
    }
}
