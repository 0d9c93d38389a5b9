//! DOCX path.

use super::{DocumentFormat, ExtractedDocument};
use crate::converters::DocxHtmlConverter;
use crate::error::{Error, Result};

/// Extracts HTML from DOCX bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxTextExtractor {
    converter: DocxHtmlConverter,
}

impl DocxTextExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert the document; its HTML is passed through unchanged.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let converted = self.converter.convert(bytes)?;
        if !converted.has_text() {
            return Err(Error::NoExtractableText);
        }
        Ok(ExtractedDocument {
            format: DocumentFormat::Docx,
            html: converted.html,
            page_count: 1,
            line_count: converted.paragraph_count,
        })
    }
}
