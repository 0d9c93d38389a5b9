//! Line direction and run ordering.
//!
//! A whole line is classified by the presence of any Arabic character; this
//! is not the Unicode bidirectional algorithm. Lines mixing Arabic and Latin
//! runs are forced into right-to-left order.

use super::clustering::TextLine;
use crate::utils::safe_float_cmp;

/// Reading direction of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    /// Latin and other left-to-right scripts
    LeftToRight,
    /// Arabic
    RightToLeft,
}

/// True for characters in the Arabic block (U+0600-U+06FF).
pub fn is_arabic(c: char) -> bool {
    matches!(c as u32, 0x0600..=0x06FF)
}

/// Classify a piece of text.
///
/// # Examples
///
/// ```
/// use bilingual_import::layout::{detect_direction, TextDirection};
///
/// assert_eq!(detect_direction("Invoice 12"), TextDirection::LeftToRight);
/// assert_eq!(detect_direction("فاتورة 12"), TextDirection::RightToLeft);
/// ```
pub fn detect_direction(text: &str) -> TextDirection {
    if text.chars().any(is_arabic) {
        TextDirection::RightToLeft
    } else {
        TextDirection::LeftToRight
    }
}

impl TextLine {
    /// Direction of this line from its concatenated text.
    pub fn direction(&self) -> TextDirection {
        detect_direction(&self.text())
    }

    /// Put runs in reading order: descending `x` for right-to-left lines,
    /// ascending `x` otherwise. Stable for equal `x`.
    pub fn order_runs(&mut self) -> TextDirection {
        let direction = self.direction();
        match direction {
            TextDirection::RightToLeft => self.runs.sort_by(|a, b| safe_float_cmp(b.x, a.x)),
            TextDirection::LeftToRight => self.runs.sort_by(|a, b| safe_float_cmp(a.x, b.x)),
        }
        direction
    }
}
