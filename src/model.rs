//! Read-only per-page data handed from a PDF backend to the reporter

use crate::geometry::BBox;
use serde::Serialize;

/// One page of a document, with everything the report needs derived up front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub ordinal: u32,
    /// Extracted text; `None` when the page has no recoverable text
    pub text: Option<String>,
    /// Detected tables, in reading order
    pub tables: Vec<Table>,
    /// Embedded image placements
    pub images: Vec<ImageRegion>,
    /// Number of vector rectangles drawn on the page
    pub rect_count: usize,
}

impl Page {
    pub fn new(ordinal: u32) -> Self {
        Self {
            ordinal,
            ..Self::default()
        }
    }

    /// Set the page text; only an empty string counts as no text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_image(mut self, image: ImageRegion) -> Self {
        self.images.push(image);
        self
    }

    pub fn with_rect_count(mut self, rect_count: usize) -> Self {
        self.rect_count = rect_count;
        self
    }
}

/// A table as rows of optional cell strings.
///
/// `None` marks a grid slot no cell covers (e.g. under a spanning cell);
/// `Some("")` is a cell that exists but holds no text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table where every cell is present
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }
}

/// Where an image is placed on its page
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRegion {
    /// Placement in page coordinates
    pub bbox: BBox,
    /// Width the image is drawn at, in points
    pub width: Option<f32>,
    /// Height the image is drawn at, in points
    pub height: Option<f32>,
}

impl ImageRegion {
    pub fn new(bbox: BBox) -> Self {
        Self {
            bbox,
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// An image whose size is the extent of its placement box
    pub fn placed(bbox: BBox) -> Self {
        Self::new(bbox).with_size(bbox.width(), bbox.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_text_is_absent() {
        assert_eq!(Page::new(1).with_text("").text, None);
        assert_eq!(Page::new(1).with_text(" \n\t").text.as_deref(), Some(" \n\t"));
        assert_eq!(Page::new(1).with_text("Hello").text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_placed_image_takes_box_extent() {
        let image = ImageRegion::placed(BBox::new(100.0, 500.0, 300.0, 650.0));
        assert_eq!(image.width, Some(200.0));
        assert_eq!(image.height, Some(150.0));
    }

    #[test]
    fn test_table_serializes_as_nested_arrays() {
        let table = Table {
            rows: vec![
                vec![Some("a".to_string()), Some("b".to_string())],
                vec![Some("c".to_string()), None],
            ],
        };
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"[["a","b"],["c",null]]"#
        );
    }

    #[test]
    fn test_table_from_rows() {
        let table = Table::from_rows([["a", "b"], ["c", "d"]]);
        assert_eq!(table.rows[1][0].as_deref(), Some("c"));
        assert_eq!(table.rows.len(), 2);
    }
}
