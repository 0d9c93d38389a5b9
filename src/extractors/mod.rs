//! Document text extraction into editor HTML.
//!
//! [`DocumentTextExtractor`] dispatches on the MIME type of an upload:
//! PDFs go through the glyph-run reader and reading-order layout, DOCX files
//! through the Word converter. Nothing here touches an editor buffer.

mod docx;
mod pdf;

pub use docx::DocxTextExtractor;
pub use pdf::PdfTextExtractor;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ImportConfig;
use crate::error::{Error, Result};

/// MIME type of PDF uploads.
pub const PDF_MIME: &str = "application/pdf";

/// MIME type of Word (Open XML) uploads.
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,
    /// Word Open XML document
    Docx,
}

impl DocumentFormat {
    /// Resolve a MIME type.
    ///
    /// Case is ignored, as are parameters after `;`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bilingual_import::extractors::DocumentFormat;
    ///
    /// assert_eq!(
    ///     DocumentFormat::from_mime("Application/PDF; charset=binary").unwrap(),
    ///     DocumentFormat::Pdf
    /// );
    /// assert!(DocumentFormat::from_mime("image/png").is_err());
    /// ```
    pub fn from_mime(mime_type: &str) -> Result<Self> {
        let essence = mime_type.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            Ok(DocumentFormat::Pdf)
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Ok(DocumentFormat::Docx)
        } else {
            Err(Error::UnsupportedFormat(mime_type.to_string()))
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(DocumentFormat::Pdf)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }

    /// Canonical MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => PDF_MIME,
            DocumentFormat::Docx => DOCX_MIME,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
        }
    }
}

/// Result of one successful import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    /// Format the upload was read as
    pub format: DocumentFormat,
    /// Extracted HTML
    pub html: String,
    /// Pages read; a DOCX counts as one page
    pub page_count: usize,
    /// Lines (PDF) or paragraphs (DOCX) written
    pub line_count: usize,
}

impl ExtractedDocument {
    /// Extracted HTML.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Take the HTML, dropping the counters.
    pub fn into_html(self) -> String {
        self.html
    }
}

/// Turns uploaded PDF or DOCX bytes into HTML.
///
/// # Examples
///
/// ```no_run
/// use bilingual_import::extractors::DocumentTextExtractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("brief.pdf")?;
/// let extracted = DocumentTextExtractor::new().extract(&bytes, "application/pdf")?;
/// println!("{} lines", extracted.line_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentTextExtractor {
    config: ImportConfig,
}

impl DocumentTextExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with the given settings.
    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Extract HTML from `bytes` of the given MIME type.
    ///
    /// Unsupported MIME types fail before any parsing.
    pub fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<ExtractedDocument> {
        let format = DocumentFormat::from_mime(mime_type)?;
        log::debug!("Extracting {} document ({} bytes)", format, bytes.len());

        let extracted = match format {
            DocumentFormat::Pdf => PdfTextExtractor::new(&self.config).extract(bytes)?,
            DocumentFormat::Docx => DocxTextExtractor::new().extract(bytes)?,
        };

        log::debug!(
            "Extracted {} document: {} pages, {} lines",
            format,
            extracted.page_count,
            extracted.line_count
        );
        Ok(extracted)
    }
}
