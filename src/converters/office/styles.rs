//! Word formatting mapped to HTML tags.

/// Character formatting of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
    /// Strikethrough
    pub strikethrough: bool,
}

impl TextStyle {
    /// Tags to open, outermost first.
    pub fn open_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.bold {
            tags.push("strong");
        }
        if self.italic {
            tags.push("em");
        }
        if self.underline {
            tags.push("u");
        }
        if self.strikethrough {
            tags.push("s");
        }
        tags
    }
}

/// List marker kind, from the numbering definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Bulleted list (`<ul>`)
    Bullet,
    /// Numbered list (`<ol>`)
    Numbered,
}

impl ListKind {
    /// Container tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

/// Paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphStyle {
    /// Heading level 1-6, from `Heading N` / `Title` styles
    pub heading_level: Option<u8>,
    /// Numbering reference (`numId`, `ilvl`) when the paragraph is a list item
    pub numbering: Option<(String, u8)>,
    /// Right-to-left paragraph (`w:bidi`)
    pub rtl: bool,
}

impl ParagraphStyle {
    /// Block tag for a paragraph that is not a list item.
    pub fn block_tag(&self) -> String {
        match self.heading_level {
            Some(level) => format!("h{}", level.clamp(1, 6)),
            None => "p".to_string(),
        }
    }
}

/// Heading level for a paragraph style id or name.
///
/// Accepts `Heading1`, `heading 2`, `Title`; anything else is body text.
pub fn heading_level(style_id: &str) -> Option<u8> {
    let lower = style_id.to_ascii_lowercase();
    if lower == "title" {
        return Some(1);
    }
    let rest = lower.strip_prefix("heading")?.trim();
    match rest.parse::<u8>() {
        Ok(level) if (1..=6).contains(&level) => Some(level),
        _ => None,
    }
}

/// True if an on/off property such as `<w:b w:val="0"/>` is switched on.
pub fn toggle_enabled(val: Option<&str>) -> bool {
    !matches!(val, Some("0") | Some("false") | Some("off") | Some("none"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("Heading1"), Some(1));
        assert_eq!(heading_level("heading 3"), Some(3));
        assert_eq!(heading_level("Title"), Some(1));
        assert_eq!(heading_level("Heading9"), None);
        assert_eq!(heading_level("Normal"), None);
    }

    #[test]
    fn test_open_tags_order() {
        let style = TextStyle {
            bold: true,
            italic: true,
            underline: false,
            strikethrough: true,
        };
        assert_eq!(style.open_tags(), vec!["strong", "em", "s"]);
        assert!(TextStyle::default().open_tags().is_empty());
    }

    #[test]
    fn test_toggle_enabled() {
        assert!(toggle_enabled(None));
        assert!(toggle_enabled(Some("1")));
        assert!(toggle_enabled(Some("true")));
        assert!(!toggle_enabled(Some("0")));
        assert!(!toggle_enabled(Some("false")));
        assert!(!toggle_enabled(Some("none")));
    }

    #[test]
    fn test_block_tag() {
        let mut style = ParagraphStyle::default();
        assert_eq!(style.block_tag(), "p");
        style.heading_level = Some(2);
        assert_eq!(style.block_tag(), "h2");
    }
}
