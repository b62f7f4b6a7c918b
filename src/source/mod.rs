//! Source resolution

pub mod resolver;

pub use resolver::{has_pdf_header, resolve_path, ResolvedPdf};
