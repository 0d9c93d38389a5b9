//! PDF path: glyph runs, reading order, HTML lines.

use lopdf::Document;

use super::{DocumentFormat, ExtractedDocument};
use crate::config::ImportConfig;
use crate::content::PageTextReader;
use crate::converters::HtmlLineWriter;
use crate::error::{Error, Result};
use crate::layout::arrange_reading_order;

/// Extracts reading-order HTML from PDF bytes.
pub struct PdfTextExtractor<'a> {
    config: &'a ImportConfig,
}

impl<'a> PdfTextExtractor<'a> {
    /// Create an extractor using `config`.
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    /// Extract every page.
    ///
    /// Fails with [`Error::NoExtractableText`] when no page yields a line.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let doc = Document::load_mem(bytes).map_err(pdf_error)?;
        if doc.trailer.get(b"Encrypt").is_ok() {
            return Err(Error::parse(DocumentFormat::Pdf, "encrypted documents are not supported"));
        }

        let reader = PageTextReader::new(&doc, self.config);
        let mut writer = HtmlLineWriter::new(self.config);

        for (page_number, page_id) in doc.get_pages() {
            let runs = reader.read_page(page_id).map_err(pdf_error)?;
            let run_count = runs.len();
            let lines = arrange_reading_order(runs, self.config.line_tolerance);
            log::debug!("Page {}: {} runs, {} lines", page_number, run_count, lines.len());
            writer.write_page(&lines);
        }

        if writer.line_count() == 0 {
            log::debug!("No text lines on any of {} pages", writer.page_count());
            return Err(Error::NoExtractableText);
        }

        let page_count = writer.page_count();
        let line_count = writer.line_count();
        Ok(ExtractedDocument {
            format: DocumentFormat::Pdf,
            html: writer.finish(),
            page_count,
            line_count,
        })
    }
}

fn pdf_error(err: lopdf::Error) -> Error {
    Error::parse(DocumentFormat::Pdf, err)
}
