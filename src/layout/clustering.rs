//! Grouping glyph runs into visual lines.

use crate::content::PositionedGlyphRun;
use crate::utils::safe_float_cmp;

/// Runs judged to lie on the same visual line.
///
/// Every run satisfies `|run.y - line.y| <= tolerance` for the tolerance the
/// line was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Representative vertical coordinate (the first member's `y`)
    pub y: f32,
    /// Member runs; order is assigned during assembly
    pub runs: Vec<PositionedGlyphRun>,
}

impl TextLine {
    /// Open a line with `run` as its first member.
    pub fn new(run: PositionedGlyphRun) -> Self {
        Self {
            y: run.y,
            runs: vec![run],
        }
    }

    /// True if a run at `y` belongs on this line.
    pub fn accepts(&self, y: f32, tolerance: f32) -> bool {
        (self.y - y).abs() <= tolerance
    }

    /// Concatenated text of all runs, in current order, with no separator.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Cluster runs into lines.
///
/// Runs are scanned in source order. Whitespace-only runs are dropped. Each
/// remaining run joins the first line (in creation order) whose
/// representative `y` lies within `tolerance`; otherwise it opens a new
/// line. Membership is tested against the representative only, never
/// pairwise, so lines cannot drift down the page one run at a time.
///
/// # Examples
///
/// ```
/// use bilingual_import::content::PositionedGlyphRun;
/// use bilingual_import::layout::cluster_runs_into_lines;
///
/// let runs = vec![
///     PositionedGlyphRun::new("a", 0.0, 100.0),
///     PositionedGlyphRun::new("b", 0.0, 104.0),
///     PositionedGlyphRun::new("c", 0.0, 109.0),
/// ];
/// let lines = cluster_runs_into_lines(runs, 8.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].runs.len(), 2);
/// ```
pub fn cluster_runs_into_lines(runs: Vec<PositionedGlyphRun>, tolerance: f32) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();

    for run in runs {
        if run.text.trim().is_empty() {
            continue;
        }

        match lines.iter_mut().find(|line| line.accepts(run.y, tolerance)) {
            Some(line) => line.runs.push(run),
            None => lines.push(TextLine::new(run)),
        }
    }

    lines
}

/// Sort lines top of page first (descending `y`). Stable for equal `y`.
pub fn sort_lines_top_down(lines: &mut [TextLine]) {
    lines.sort_by(|a, b| safe_float_cmp(b.y, a.y));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: f32, y: f32) -> PositionedGlyphRun {
        PositionedGlyphRun::new(text, x, y)
    }

    #[test]
    fn test_clusters_against_representative() {
        let lines = cluster_runs_into_lines(
            vec![
                run("a", 0.0, 100.0),
                run("b", 0.0, 104.0),
                run("c", 0.0, 109.0),
                run("d", 0.0, 200.0),
            ],
            8.0,
        );

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].y, 100.0);
        assert_eq!(lines[0].text(), "ab");
        assert_eq!(lines[1].y, 109.0);
        assert_eq!(lines[1].text(), "c");
        assert_eq!(lines[2].y, 200.0);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let lines = cluster_runs_into_lines(vec![run("a", 0.0, 100.0), run("b", 0.0, 108.0)], 8.0);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_joins_first_matching_line() {
        // 106 is within 8 of both 100 and 110; the older line wins.
        let lines = cluster_runs_into_lines(
            vec![run("a", 0.0, 100.0), run("b", 0.0, 110.0), run("c", 0.0, 106.0)],
            8.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "ac");
        assert_eq!(lines[1].text(), "b");
    }

    #[test]
    fn test_whitespace_runs_dropped() {
        let lines = cluster_runs_into_lines(
            vec![run("  ", 0.0, 100.0), run("\t", 0.0, 300.0), run("x", 5.0, 100.0)],
            8.0,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].runs.len(), 1);
        assert_eq!(lines[0].runs[0].text, "x");
    }

    #[test]
    fn test_sort_lines_top_down() {
        let mut lines = cluster_runs_into_lines(
            vec![run("low", 0.0, 50.0), run("high", 0.0, 700.0), run("mid", 0.0, 400.0)],
            8.0,
        );
        sort_lines_top_down(&mut lines);
        let order: Vec<String> = lines.iter().map(TextLine::text).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_runs_into_lines(Vec::new(), 8.0).is_empty());
    }
}
