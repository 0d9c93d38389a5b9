//! Font handling for text extraction.
//!
//! Font dictionaries are reduced to decoding (ToUnicode CMap or WinAnsi)
//! and horizontal metrics.

pub mod cmap;
pub mod encoding;
pub mod font_info;

pub use cmap::ToUnicodeCMap;
pub use font_info::{lookup_font, DecodedGlyph, FontInfo};
