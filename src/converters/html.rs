//! Flat HTML output for extracted lines.
//!
//! The output is a sequence of lines separated by line-break markers, not
//! structured HTML: each line's runs are joined with a separator, followed
//! by the marker, and every page ends with one extra marker.

use crate::config::ImportConfig;
use crate::layout::TextLine;

/// Escape HTML special characters.
///
/// # Examples
///
/// ```
/// use bilingual_import::converters::escape_html;
///
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Accumulates lines and pages into one HTML string.
#[derive(Debug)]
pub struct HtmlLineWriter<'a> {
    config: &'a ImportConfig,
    html: String,
    lines: usize,
    pages: usize,
}

impl<'a> HtmlLineWriter<'a> {
    /// Create an empty writer.
    pub fn new(config: &'a ImportConfig) -> Self {
        Self {
            config,
            html: String::new(),
            lines: 0,
            pages: 0,
        }
    }

    /// Append one line, runs in their current order.
    pub fn write_line(&mut self, line: &TextLine) {
        for (i, run) in line.runs.iter().enumerate() {
            if i > 0 {
                self.html.push_str(&self.config.run_separator);
            }
            if self.config.escape_html {
                self.html.push_str(&escape_html(&run.text));
            } else {
                self.html.push_str(&run.text);
            }
        }
        self.html.push_str(&self.config.line_break);
        self.lines += 1;
    }

    /// Append a page's lines and close the page.
    pub fn write_page(&mut self, lines: &[TextLine]) {
        for line in lines {
            self.write_line(line);
        }
        self.end_page();
    }

    /// Close the current page.
    pub fn end_page(&mut self) {
        if self.config.page_break {
            self.html.push_str(&self.config.line_break);
        }
        self.pages += 1;
    }

    /// Lines written so far.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Pages closed so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// The assembled HTML.
    pub fn finish(self) -> String {
        self.html
    }
}
