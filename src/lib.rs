// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Bilingual Import
//!
//! Document import and dual-language rich-text synchronization for a
//! content editor that keeps every item in two languages.
//!
//! ## Core Features
//!
//! ### Import
//! - **PDF**: glyph runs read from content streams (text matrix, CTM,
//!   ToUnicode CMaps, font widths), clustered into lines and put in reading
//!   order, including right-to-left Arabic lines
//! - **DOCX**: paragraphs, headings, lists, tables and character formatting
//!   converted to HTML
//! - **Errors**: unsupported formats, empty documents and parse failures are
//!   distinct and map to localized notifications
//!
//! ### Editing
//! - **Two buffers**: source and target languages never share state
//! - **Import tickets**: a slow import never overwrites later edits
//! - **Serializable snapshot** for the content API
//!
//! ## Quick Start
//!
//! ```no_run
//! use bilingual_import::editor::{DualLanguageEditor, LanguageSlot, MemorySurface};
//! use bilingual_import::extractors::DocumentTextExtractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = DualLanguageEditor::new(MemorySurface::new(), MemorySurface::new());
//! let extractor = DocumentTextExtractor::new();
//!
//! let bytes = std::fs::read("contract.pdf")?;
//! editor.import(LanguageSlot::Target, &extractor, &bytes, "application/pdf")?;
//!
//! println!("{}", serde_json::to_string(&editor.snapshot())?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// PDF content streams and fonts
pub mod content;
pub mod fonts;

// Reading order
pub mod layout;

// HTML output
pub mod converters;

// Import entry point
pub mod extractors;

// Dual-language buffers
pub mod editor;

pub use config::ImportConfig;
pub use editor::{DualLanguageContent, DualLanguageEditor, LanguageSlot, Notification};
pub use error::{Error, Result};
pub use extractors::{DocumentFormat, DocumentTextExtractor, ExtractedDocument};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats, treating NaN as equal to itself and greater than
    /// every number, so sorts never see an inconsistent order.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
