//! Font dictionaries reduced to what text positioning needs: how to split a
//! show-text string into codes, how to map each code to Unicode, and how far
//! each glyph advances.

use lopdf::{Dictionary, Document, Object};
use std::collections::HashMap;

use super::cmap::{codespace_bytes, ToUnicodeCMap};
use super::encoding::winansi_to_char;
use crate::content::resources::{
    get, get_array, get_dict, get_name, get_number, get_stream, number, resolve, stream_data,
};

/// Width used when a font gives no metrics at all (glyph space units).
pub const DEFAULT_GLYPH_WIDTH: f32 = 500.0;

/// Default width of a CID font (`DW`).
const DEFAULT_CID_WIDTH: f32 = 1000.0;

/// Code width of Identity-H/V and other predefined CJK CMaps.
const DEFAULT_CID_CODE_BYTES: usize = 2;

/// One decoded glyph from a show-text string.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedGlyph {
    /// Character code as it appeared in the string
    pub code: u32,
    /// Unicode text for the code (may be empty or several chars)
    pub text: String,
    /// Horizontal advance in glyph space (thousandths of text space)
    pub width: f32,
    /// Single-byte code 32, which receives word spacing
    pub is_word_space: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Widths {
    Simple {
        first_char: u32,
        widths: Vec<f32>,
        missing: f32,
    },
    Composite {
        default: f32,
        widths: HashMap<u32, f32>,
    },
}

/// Decoding and metrics for one font resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    /// BaseFont name, for diagnostics
    pub base_font: String,
    composite: bool,
    code_bytes: usize,
    to_unicode: Option<ToUnicodeCMap>,
    widths: Widths,
}

impl FontInfo {
    /// Build from a font dictionary.
    pub fn from_dict(doc: &Document, font: &Dictionary) -> Self {
        let base_font = get_name(doc, font, b"BaseFont")
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .unwrap_or_default();
        let composite = get_name(doc, font, b"Subtype") == Some(b"Type0".as_slice());

        let to_unicode = get_stream(doc, font, b"ToUnicode")
            .map(|s| ToUnicodeCMap::parse(&stream_data(s)))
            .filter(|cmap| !cmap.is_empty());

        let widths = if composite {
            composite_widths(doc, font)
        } else {
            simple_widths(doc, font)
        };

        // An embedded Encoding CMap is authoritative; the ToUnicode codespace
        // is the next best hint before assuming Identity-H.
        let code_bytes = if composite {
            get_stream(doc, font, b"Encoding")
                .and_then(|s| codespace_bytes(&stream_data(s)))
                .or_else(|| to_unicode.as_ref().and_then(ToUnicodeCMap::code_bytes))
                .unwrap_or(DEFAULT_CID_CODE_BYTES)
        } else {
            1
        };

        log::debug!(
            "Font {} (composite: {}, code bytes: {}, ToUnicode: {})",
            base_font,
            composite,
            code_bytes,
            to_unicode.is_some()
        );

        Self {
            base_font,
            composite,
            code_bytes,
            to_unicode,
            widths,
        }
    }

    /// Stand-in for a font resource that could not be found.
    pub fn fallback() -> Self {
        Self {
            base_font: String::new(),
            composite: false,
            code_bytes: 1,
            to_unicode: None,
            widths: Widths::Simple {
                first_char: 0,
                widths: Vec::new(),
                missing: DEFAULT_GLYPH_WIDTH,
            },
        }
    }

    /// True for Type0 fonts.
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// Split a show-text string into glyphs.
    pub fn decode(&self, bytes: &[u8]) -> Vec<DecodedGlyph> {
        let code_len = self.code_bytes;

        bytes
            .chunks(code_len)
            .map(|chunk| {
                let code = chunk.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
                DecodedGlyph {
                    code,
                    text: self.code_to_text(code),
                    width: self.width(code),
                    is_word_space: code_len == 1 && code == 32,
                }
            })
            .collect()
    }

    fn code_to_text(&self, code: u32) -> String {
        if let Some(mapped) = self.to_unicode.as_ref().and_then(|m| m.get(code)) {
            return mapped.to_string();
        }
        if self.composite {
            // Identity-mapped CIDs without a ToUnicode map carry no reliable
            // Unicode; keep printable code points only.
            char::from_u32(code)
                .filter(|c| !c.is_control())
                .map(String::from)
                .unwrap_or_default()
        } else {
            u8::try_from(code)
                .ok()
                .and_then(winansi_to_char)
                .map(String::from)
                .unwrap_or_default()
        }
    }

    fn width(&self, code: u32) -> f32 {
        match &self.widths {
            Widths::Simple {
                first_char,
                widths,
                missing,
            } => code
                .checked_sub(*first_char)
                .and_then(|i| widths.get(i as usize))
                .copied()
                .unwrap_or(*missing),
            Widths::Composite { default, widths } => widths.get(&code).copied().unwrap_or(*default),
        }
    }
}

fn simple_widths(doc: &Document, font: &Dictionary) -> Widths {
    let first_char = get_number(doc, font, b"FirstChar").unwrap_or(0.0).max(0.0) as u32;
    let widths = get_array(doc, font, b"Widths")
        .map(|items| {
            items
                .iter()
                .map(|w| resolve(doc, w).and_then(number).unwrap_or(0.0))
                .collect()
        })
        .unwrap_or_default();
    let missing = get_dict(doc, font, b"FontDescriptor")
        .and_then(|d| get_number(doc, d, b"MissingWidth"))
        .filter(|w| *w > 0.0)
        .unwrap_or(DEFAULT_GLYPH_WIDTH);

    Widths::Simple {
        first_char,
        widths,
        missing,
    }
}

fn composite_widths(doc: &Document, font: &Dictionary) -> Widths {
    let descendant = get_array(doc, font, b"DescendantFonts")
        .and_then(|fonts| fonts.first())
        .and_then(|f| resolve(doc, f))
        .and_then(|f| match f {
            Object::Dictionary(d) => Some(d),
            _ => None,
        });

    let Some(descendant) = descendant else {
        return Widths::Composite {
            default: DEFAULT_CID_WIDTH,
            widths: HashMap::new(),
        };
    };

    let default = get_number(doc, descendant, b"DW").unwrap_or(DEFAULT_CID_WIDTH);
    let widths = get_array(doc, descendant, b"W")
        .map(|w| parse_cid_widths(doc, w))
        .unwrap_or_default();

    Widths::Composite { default, widths }
}

/// Parse a CID `W` array: `c [w1 w2 ...]` and `c_first c_last w` entries.
fn parse_cid_widths(doc: &Document, items: &[Object]) -> HashMap<u32, f32> {
    let mut widths = HashMap::new();
    let resolved: Vec<&Object> = items
        .iter()
        .filter_map(|o| resolve(doc, o))
        .collect();

    let mut i = 0;
    while i < resolved.len() {
        let Some(first) = number(resolved[i]) else {
            i += 1;
            continue;
        };
        let first = first.max(0.0) as u32;

        match resolved.get(i + 1) {
            Some(Object::Array(list)) => {
                for (offset, w) in list.iter().enumerate() {
                    if let Some(w) = number(w) {
                        widths.insert(first + offset as u32, w);
                    }
                }
                i += 2;
            },
            Some(last) => {
                let last = number(last).map(|l| l.max(0.0) as u32);
                let width = resolved.get(i + 2).and_then(|w| number(w));
                if let (Some(last), Some(width)) = (last, width) {
                    for cid in first..=last.min(first.saturating_add(0xFFFF)) {
                        widths.insert(cid, width);
                    }
                }
                i += 3;
            },
            None => break,
        }
    }

    widths
}

/// Resolve a font resource by name from a resource dictionary.
pub fn lookup_font<'a>(doc: &'a Document, resources: &'a Dictionary, name: &[u8]) -> Option<&'a Dictionary> {
    let fonts = get_dict(doc, resources, b"Font")?;
    match get(doc, fonts, name)? {
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}
