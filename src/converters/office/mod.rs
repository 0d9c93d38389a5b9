//! Office document to HTML conversion.
//!
//! Office documents are XML-based archives (Open XML / OOXML format) that
//! can be parsed directly. Only Word documents (DOCX) are read; text,
//! character formatting, headings, lists and tables are kept.
//!
//! # Example
//!
//! ```no_run
//! use bilingual_import::converters::office::DocxHtmlConverter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("contract.docx")?;
//! let converted = DocxHtmlConverter::new().convert(&bytes)?;
//! println!("{}", converted.html);
//! # Ok(())
//! # }
//! ```

mod docx;
mod styles;

pub use docx::{DocxHtml, DocxHtmlConverter};
pub use styles::{heading_level, ListKind, ParagraphStyle, TextStyle};
