//! Reading order for one page of runs.

use crate::content::PositionedGlyphRun;

use super::clustering::{cluster_runs_into_lines, sort_lines_top_down, TextLine};

/// Arrange a page's runs into lines in reading order.
///
/// Clusters runs into lines, orders lines top of page first, then orders
/// each line's runs by its detected direction.
///
/// # Examples
///
/// ```
/// use bilingual_import::content::PositionedGlyphRun;
/// use bilingual_import::layout::arrange_reading_order;
///
/// let lines = arrange_reading_order(
///     vec![
///         PositionedGlyphRun::new("world", 60.0, 700.0),
///         PositionedGlyphRun::new("footer", 10.0, 40.0),
///         PositionedGlyphRun::new("hello", 10.0, 702.0),
///     ],
///     8.0,
/// );
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].runs[0].text, "hello");
/// assert_eq!(lines[1].runs[0].text, "footer");
/// ```
pub fn arrange_reading_order(runs: Vec<PositionedGlyphRun>, tolerance: f32) -> Vec<TextLine> {
    let mut lines = cluster_runs_into_lines(runs, tolerance);
    sort_lines_top_down(&mut lines);
    for line in &mut lines {
        let direction = line.order_runs();
        log::trace!("Line at y={:.1}: {:?}, {} runs", line.y, direction, line.runs.len());
    }
    lines
}
