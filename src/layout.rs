//! Reading-order text reconstruction from positioned characters

use crate::geometry::BBox;
use std::cmp::Ordering;

/// Tolerance of ~5 points accounts for slight vertical variations within a line
const Y_TOLERANCE: f32 = 5.0;

/// Horizontal gap (in points) between glyphs that reads as a word break
const WORD_GAP: f32 = 3.0;

/// A character with its loose bounds on the page
#[derive(Debug, Clone, PartialEq)]
pub struct CharInfo {
    pub char: char,
    pub bbox: BBox,
}

impl CharInfo {
    pub fn new(char: char, bbox: BBox) -> Self {
        Self { char, bbox }
    }
}

/// Rebuild text with Y-coordinate based ordering (preserves reading order).
///
/// Characters are sorted top to bottom, grouped into lines when their tops
/// lie within [`Y_TOLERANCE`] of the line's first character, then each line is
/// read left to right. Returns an empty string when there is nothing to read.
pub fn chars_to_text<'a, I>(chars: I) -> String
where
    I: IntoIterator<Item = &'a CharInfo>,
{
    let mut chars: Vec<&CharInfo> = chars.into_iter().collect();
    if chars.is_empty() {
        return String::new();
    }

    // Y descending (top to bottom in PDF coordinates), then X ascending
    chars.sort_by(|a, b| {
        b.bbox
            .y1
            .partial_cmp(&a.bbox.y1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Vec<&CharInfo>> = Vec::new();
    let mut current_line: Vec<&CharInfo> = Vec::new();
    let mut current_y: Option<f32> = None;

    for info in chars {
        match current_y {
            Some(cur_y) if (cur_y - info.bbox.y1).abs() <= Y_TOLERANCE => {
                current_line.push(info);
            }
            _ => {
                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                }
                current_line.push(info);
                current_y = Some(info.bbox.y1);
            }
        }
    }
    if !current_line.is_empty() {
        lines.push(current_line);
    }

    let mut result = String::new();
    for mut line in lines {
        line.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal));

        let mut prev: Option<&CharInfo> = None;
        for info in line {
            if let Some(p) = prev {
                if info.bbox.x0 - p.bbox.x1 > WORD_GAP && info.char != ' ' && p.char != ' ' {
                    result.push(' ');
                }
            }
            result.push(info.char);
            prev = Some(info);
        }
        result.push('\n');
    }

    result.trim_end().to_string()
}
