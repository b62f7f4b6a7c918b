//! Error types for PDF page reports

use thiserror::Error;

/// Result type alias for PDF page reports
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PDF page reports
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// PDF is password protected and no password was provided
    #[error("PDF is password protected")]
    PasswordRequired,

    /// Incorrect password provided
    #[error("Incorrect password")]
    IncorrectPassword,

    /// PDFium could not be bound or refused the document
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// A single page could not be parsed
    #[error("Failed to extract page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },

    /// Invalid page range
    #[error("Invalid page range: {range}")]
    InvalidPageRange { range: String },

    /// Page out of bounds
    #[error("Page {page} out of bounds (total: {total})")]
    PageOutOfBounds { page: u32, total: u32 },

    /// Invalid report configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the document itself could not be acquired.
    ///
    /// These abort the report before anything is written.
    pub fn is_document_open(&self) -> bool {
        matches!(
            self,
            Error::PdfNotFound { .. }
                | Error::InvalidPdf { .. }
                | Error::PasswordRequired
                | Error::IncorrectPassword
                | Error::Pdfium { .. }
        )
    }

    /// Page ordinal (1-indexed) for page-level failures
    pub fn page(&self) -> Option<u32> {
        match self {
            Error::PageExtraction { page, .. } | Error::PageOutOfBounds { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Wrap any failure raised while reading a page as a page extraction error
    pub(crate) fn page_extraction(page: u32, reason: impl std::fmt::Display) -> Self {
        Error::PageExtraction {
            page,
            reason: reason.to_string(),
        }
    }
}
