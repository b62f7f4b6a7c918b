//! Backend-neutral view of an opened document

use crate::error::{Error, Result};
use crate::model::Page;

/// An opened PDF the reporter can walk page by page.
///
/// Implementations own whatever handle they hold on the document and release
/// it on drop. Pages are derived on demand so large documents never have to be
/// held in memory at once.
pub trait DocumentSource {
    /// Total number of pages in the document
    fn page_count(&self) -> u32;

    /// Derive the content of page `ordinal` (1-indexed).
    ///
    /// Fails with [`Error::PageOutOfBounds`] for ordinals outside
    /// `1..=page_count()` and [`Error::PageExtraction`] when the page cannot be
    /// parsed.
    fn page(&self, ordinal: u32) -> Result<Page>;
}

impl<D: DocumentSource + ?Sized> DocumentSource for Box<D> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page(&self, ordinal: u32) -> Result<Page> {
        (**self).page(ordinal)
    }
}

/// Page text from a source other than the document's own backend
pub trait TextLayer {
    /// Text of page `ordinal` (1-indexed); empty when the page has none
    fn page_text(&self, ordinal: u32) -> Result<String>;
}

/// Reject ordinals outside `1..=total`
pub fn check_ordinal(ordinal: u32, total: u32) -> Result<()> {
    if ordinal < 1 || ordinal > total {
        return Err(Error::PageOutOfBounds {
            page: ordinal,
            total,
        });
    }
    Ok(())
}

/// Parse page range string (e.g., "1-5,10,15-20")
///
/// Pages come back sorted and without duplicates.
pub fn parse_page_range(range: &str, max_pages: u32) -> Result<Vec<u32>> {
    let invalid = || Error::InvalidPageRange {
        range: range.to_string(),
    };
    let mut pages = Vec::new();

    for part in range.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start: u32 = start.trim().parse().map_err(|_| invalid())?;
            let end: u32 = end.trim().parse().map_err(|_| invalid())?;

            if start < 1 || end > max_pages || start > end {
                return Err(invalid());
            }
            pages.extend(start..=end);
        } else {
            let page: u32 = part.parse().map_err(|_| invalid())?;

            if page < 1 || page > max_pages {
                return Err(invalid());
            }
            pages.push(page);
        }
    }

    if pages.is_empty() {
        return Err(invalid());
    }

    pages.sort_unstable();
    pages.dedup();

    Ok(pages)
}
