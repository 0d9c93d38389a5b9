//! ToUnicode CMap parser.
//!
//! A ToUnicode CMap maps the character codes of a show-text string to
//! Unicode. Arabic PDFs almost always use composite fonts whose codes are
//! glyph ids, so without this map their text cannot be recovered at all.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref RE_BFCHAR: Regex = Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>").unwrap();
    static ref RE_BFRANGE_SEQ: Regex =
        Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>").unwrap();
    static ref RE_BFRANGE_ARRAY: Regex = Regex::new(
        r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*\[((?:\s*<[0-9A-Fa-f]+>\s*)+)\]"
    )
    .unwrap();
    static ref RE_HEX: Regex = Regex::new(r"<([0-9A-Fa-f]+)>").unwrap();
}

/// Upper bound on the number of codes a single sequential bfrange may cover.
const MAX_RANGE_SPAN: u32 = 0xFFFF;

/// A parsed ToUnicode map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToUnicodeCMap {
    mappings: HashMap<u32, String>,
    code_bytes: Option<usize>,
}

impl ToUnicodeCMap {
    /// Parse a decoded CMap stream.
    pub fn parse(data: &[u8]) -> Self {
        let content = String::from_utf8_lossy(data);
        let mut mappings = HashMap::new();

        for section in sections(&content, "beginbfchar", "endbfchar") {
            for caps in RE_BFCHAR.captures_iter(section) {
                let Ok(src) = u32::from_str_radix(&caps[1], 16) else {
                    continue;
                };
                if let Some(dst) = decode_destination(&caps[2]) {
                    log::trace!("ToUnicode bfchar: 0x{:02X} -> {:?}", src, dst);
                    mappings.insert(src, dst);
                }
            }
        }

        for section in sections(&content, "beginbfrange", "endbfrange") {
            parse_bfrange_section(section, &mut mappings);
        }

        let code_bytes = codespace_width(&content);
        Self {
            mappings,
            code_bytes,
        }
    }

    /// Width in bytes of one character code, if the map declares a
    /// codespace range.
    pub fn code_bytes(&self) -> Option<usize> {
        self.code_bytes
    }

    /// Look up one character code.
    pub fn get(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(String::as_str)
    }

    /// Number of mapped codes.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// True if nothing was mapped.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Slices between `begin` and `end` markers.
fn sections<'a>(content: &'a str, begin: &str, end: &str) -> Vec<&'a str> {
    let mut found = Vec::new();
    let mut remaining = content;

    while let Some(begin_pos) = remaining.find(begin) {
        let after_begin = &remaining[begin_pos + begin.len()..];
        let Some(end_pos) = after_begin.find(end) else {
            break;
        };
        found.push(&after_begin[..end_pos]);
        remaining = &after_begin[end_pos + end.len()..];
    }

    found
}

/// Byte width declared by the first codespace range of a CMap stream.
///
/// Works for both ToUnicode maps and embedded `Encoding` CMaps.
pub fn codespace_bytes(data: &[u8]) -> Option<usize> {
    codespace_width(&String::from_utf8_lossy(data))
}

fn codespace_width(content: &str) -> Option<usize> {
    let section = sections(content, "begincodespacerange", "endcodespacerange")
        .into_iter()
        .next()?;
    let caps = RE_HEX.captures(section)?;
    Some(caps[1].len().div_ceil(2).clamp(1, 4))
}

/// Decode a destination hex string.
///
/// Four digits or fewer is one BMP code point; eight digits is first tried
/// as a UTF-16 surrogate pair; anything longer is a sequence of UTF-16 units
/// (ligatures such as "ffi").
fn decode_destination(hex: &str) -> Option<String> {
    if hex.len() <= 4 {
        let code = u32::from_str_radix(hex, 16).ok()?;
        return char::from_u32(code).map(String::from);
    }

    let units: Vec<u16> = hex
        .as_bytes()
        .chunks(4)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .filter_map(|chunk| u16::from_str_radix(chunk, 16).ok())
        .collect();
    let decoded: String = char::decode_utf16(units.iter().copied())
        .filter_map(|r| r.ok())
        .collect();

    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Parse every bfrange entry of a section.
///
/// Entries may share a line. Array-form matches are blanked out before the
/// sequential pass so their destination lists are not read as ranges.
fn parse_bfrange_section(section: &str, mappings: &mut HashMap<u32, String>) {
    let mut masked = section.to_string();

    for caps in RE_BFRANGE_ARRAY.captures_iter(section) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        masked.replace_range(whole.range(), &" ".repeat(whole.len()));

        let Some((start, end)) = range_bounds(&caps[1], &caps[2]) else {
            continue;
        };
        let destinations: Vec<&str> = RE_HEX
            .captures_iter(&caps[3])
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();

        let span = end.saturating_sub(start) as usize + 1;
        if destinations.len() != span {
            log::warn!(
                "ToUnicode bfrange array size mismatch: expected {} entries for range 0x{:X}-0x{:X}, got {}",
                span,
                start,
                end,
                destinations.len()
            );
        }

        for (offset, hex) in destinations.into_iter().take(span).enumerate() {
            if let Some(dst) = decode_destination(hex) {
                mappings.insert(start + offset as u32, dst);
            }
        }
    }

    for caps in RE_BFRANGE_SEQ.captures_iter(&masked) {
        let Some((start, end)) = range_bounds(&caps[1], &caps[2]) else {
            continue;
        };
        let Some(first) = decode_destination(&caps[3]) else {
            continue;
        };

        // Only the last UTF-16 unit increments across the range.
        let mut units: Vec<u16> = first.encode_utf16().collect();
        let span = end.saturating_sub(start).min(MAX_RANGE_SPAN);
        for offset in 0..=span {
            if let Ok(dst) = String::from_utf16(&units) {
                mappings.insert(start.wrapping_add(offset), dst);
            }
            if let Some(last) = units.last_mut() {
                *last = last.wrapping_add(1);
            }
        }
    }
}

fn range_bounds(lo: &str, hi: &str) -> Option<(u32, u32)> {
    Some((u32::from_str_radix(lo, 16).ok()?, u32::from_str_radix(hi, 16).ok()?))
}
