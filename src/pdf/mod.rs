//! PDF processing layer
//!
//! [`DocumentSource`] is the seam between reporting and parsing; pdfplumber
//! sits behind it via [`PlumberDocument`], optionally taking its text from
//! PDFium through [`PdfiumText`].

mod document;
mod pdfium;
mod plumber;

pub use document::{check_ordinal, parse_page_range, DocumentSource, TextLayer};
pub use pdfium::{PdfiumLibrary, PdfiumText};
pub use plumber::PlumberDocument;
