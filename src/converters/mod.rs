//! Format converters producing editor HTML.
//!
//! - **Lines**: extracted PDF lines written as a flat, `<br/>`-separated
//!   sequence
//! - **Office**: DOCX bodies converted to paragraphs, lists and tables

pub mod html;
pub mod office;

pub use html::{escape_html, HtmlLineWriter};
pub use office::{DocxHtml, DocxHtmlConverter};
