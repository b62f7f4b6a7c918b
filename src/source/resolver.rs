//! Source resolution for PDF files

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A file that carries the PDF signature, ready to be opened by a backend
#[derive(Debug, Clone)]
pub struct ResolvedPdf {
    pub path: PathBuf,
    pub source_name: String,
}

/// Check for the `%PDF` signature at the start of the data
pub fn has_pdf_header(data: &[u8]) -> bool {
    data.len() >= 4 && &data[0..4] == b"%PDF"
}

/// Resolve a file path to a PDF, reading only its signature
pub fn resolve_path<P: AsRef<Path>>(path: P) -> Result<ResolvedPdf> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::PdfNotFound {
            path: path.display().to_string(),
        });
    }

    let mut header = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut header)?;

    if !has_pdf_header(&header) {
        return Err(Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        });
    }

    tracing::debug!(path = %path.display(), "Resolved PDF");

    Ok(ResolvedPdf {
        path: path.to_path_buf(),
        source_name: path.display().to_string(),
    })
}
