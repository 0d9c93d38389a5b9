//! Single-byte encodings for simple fonts without a ToUnicode map.

/// Decode one byte of WinAnsi (Windows-1252) text.
///
/// 0x00-0x7F and 0xA0-0xFF coincide with Latin-1; the 0x80-0x9F block
/// carries typographic punctuation. Undefined slots yield `None`.
pub fn winansi_to_char(byte: u8) -> Option<char> {
    if byte < 0x80 || byte >= 0xA0 {
        return Some(byte as char);
    }

    let code = match byte {
        0x80 => 0x20AC, // Euro sign
        0x82 => 0x201A, // Single low-9 quotation mark
        0x83 => 0x0192, // Latin small letter f with hook
        0x84 => 0x201E, // Double low-9 quotation mark
        0x85 => 0x2026, // Horizontal ellipsis
        0x86 => 0x2020, // Dagger
        0x87 => 0x2021, // Double dagger
        0x88 => 0x02C6, // Modifier letter circumflex accent
        0x89 => 0x2030, // Per mille sign
        0x8A => 0x0160, // Latin capital letter S with caron
        0x8B => 0x2039, // Single left-pointing angle quotation mark
        0x8C => 0x0152, // Latin capital ligature OE
        0x8E => 0x017D, // Latin capital letter Z with caron
        0x91 => 0x2018, // Left single quotation mark
        0x92 => 0x2019, // Right single quotation mark
        0x93 => 0x201C, // Left double quotation mark
        0x94 => 0x201D, // Right double quotation mark
        0x95 => 0x2022, // Bullet
        0x96 => 0x2013, // En dash
        0x97 => 0x2014, // Em dash
        0x98 => 0x02DC, // Small tilde
        0x99 => 0x2122, // Trade mark sign
        0x9A => 0x0161, // Latin small letter s with caron
        0x9B => 0x203A, // Single right-pointing angle quotation mark
        0x9C => 0x0153, // Latin small ligature oe
        0x9E => 0x017E, // Latin small letter z with caron
        0x9F => 0x0178, // Latin capital letter Y with diaeresis
        _ => return None,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        for b in b"Hello, World".iter().copied() {
            assert_eq!(winansi_to_char(b), Some(b as char));
        }
    }

    #[test]
    fn test_special_block() {
        assert_eq!(winansi_to_char(0x80), Some('€'));
        assert_eq!(winansi_to_char(0x93), Some('\u{201C}'));
        assert_eq!(winansi_to_char(0x97), Some('—'));
        assert_eq!(winansi_to_char(0x81), None);
    }

    #[test]
    fn test_latin1_upper_half() {
        assert_eq!(winansi_to_char(0xE9), Some('é'));
        assert_eq!(winansi_to_char(0xFF), Some('ÿ'));
    }
}
