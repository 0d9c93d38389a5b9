//! Reading-order reconstruction for extracted glyph runs.
//!
//! - Line clustering by vertical proximity
//! - Top-down line ordering
//! - Per-line direction detection and run ordering

pub mod clustering;
pub mod direction;
pub mod reading_order;

pub use clustering::{cluster_runs_into_lines, sort_lines_top_down, TextLine};
pub use direction::{detect_direction, is_arabic, TextDirection};
pub use reading_order::arrange_reading_order;
