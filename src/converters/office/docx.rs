//! DOCX to HTML conversion.
//!
//! DOCX files are ZIP archives of Open XML parts. The body lives in
//! `word/document.xml`; list marker kinds come from `word/numbering.xml`
//! when it is present.
//!
//! The HTML produced is a flat sequence of blocks: paragraphs, headings,
//! lists and tables. Character formatting maps to `<strong>`, `<em>`, `<u>`
//! and `<s>`. Fonts, sizes, colors and images are dropped.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use super::styles::{heading_level, toggle_enabled, ListKind, ParagraphStyle, TextStyle};
use crate::converters::escape_html;
use crate::error::{Error, Result};
use crate::extractors::DocumentFormat;

const DOCUMENT_PART: &str = "word/document.xml";
const NUMBERING_PART: &str = "word/numbering.xml";

/// Result of converting one DOCX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxHtml {
    /// Assembled HTML
    pub html: String,
    /// Non-empty paragraphs written, table cells included
    pub paragraph_count: usize,
}

impl DocxHtml {
    /// True if at least one paragraph carried visible text.
    pub fn has_text(&self) -> bool {
        self.paragraph_count > 0
    }
}

/// DOCX to HTML converter.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxHtmlConverter;

impl DocxHtmlConverter {
    /// Create a new DOCX converter.
    pub fn new() -> Self {
        Self
    }

    /// Convert DOCX bytes to HTML.
    pub fn convert(&self, bytes: &[u8]) -> Result<DocxHtml> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(docx_error)?;

        let numbering = match read_part(&mut archive, NUMBERING_PART)? {
            Some(xml) => parse_numbering(&xml)?,
            None => Numbering::default(),
        };

        let xml = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| Error::parse(DocumentFormat::Docx, "missing word/document.xml"))?;

        let blocks = parse_document(&xml)?;
        let mut paragraph_count = 0;
        let html = render_blocks(&blocks, &numbering, &mut paragraph_count);
        log::debug!("DOCX converted: {} paragraphs, {} bytes of HTML", paragraph_count, html.len());

        Ok(DocxHtml {
            html,
            paragraph_count,
        })
    }
}

fn docx_error<E>(err: E) -> Error
where
    E: Into<crate::error::BoxedCause>,
{
    Error::parse(DocumentFormat::Docx, err)
}

/// Read a part as UTF-8, `None` if the archive has no such entry.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(docx_error(e)),
    };
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(docx_error)?;
    Ok(Some(content))
}

/// `numId` to per-level list kinds.
#[derive(Debug, Default)]
struct Numbering {
    abstract_levels: HashMap<String, HashMap<u8, ListKind>>,
    num_to_abstract: HashMap<String, String>,
}

impl Numbering {
    fn kind(&self, num_id: &str, level: u8) -> ListKind {
        self.num_to_abstract
            .get(num_id)
            .and_then(|abs| self.abstract_levels.get(abs))
            .and_then(|levels| levels.get(&level))
            .copied()
            .unwrap_or(ListKind::Bullet)
    }
}

fn parse_numbering(xml: &str) -> Result<Numbering> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut numbering = Numbering::default();

    let mut current_abstract: Option<String> = None;
    let mut current_level: Option<u8> = None;
    let mut current_num: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"abstractNum" => current_abstract = get_attribute(e, "abstractNumId"),
                b"lvl" => current_level = get_attribute(e, "ilvl").and_then(|v| v.parse().ok()),
                b"numFmt" => {
                    if let (Some(abs), Some(level), Some(fmt)) =
                        (&current_abstract, current_level, get_attribute(e, "val"))
                    {
                        let kind = if fmt == "bullet" || fmt == "none" {
                            ListKind::Bullet
                        } else {
                            ListKind::Numbered
                        };
                        numbering
                            .abstract_levels
                            .entry(abs.clone())
                            .or_default()
                            .insert(level, kind);
                    }
                },
                b"num" => current_num = get_attribute(e, "numId"),
                b"abstractNumId" => {
                    if let (Some(num), Some(abs)) = (&current_num, get_attribute(e, "val")) {
                        numbering.num_to_abstract.insert(num.clone(), abs);
                    }
                },
                _ => {},
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"abstractNum" => current_abstract = None,
                b"lvl" => current_level = None,
                b"num" => current_num = None,
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(docx_error(e)),
            _ => {},
        }
        buf.clear();
    }

    Ok(numbering)
}

/// A run of identically formatted text. Line breaks are kept as `'\n'`.
#[derive(Debug, Clone, Default)]
struct TextRun {
    text: String,
    style: TextStyle,
}

#[derive(Debug, Default)]
struct DocumentParagraph {
    runs: Vec<TextRun>,
    style: ParagraphStyle,
}

impl DocumentParagraph {
    fn has_text(&self) -> bool {
        self.runs.iter().any(|r| !r.text.trim().is_empty())
    }

    /// Append a run, merging it into the previous one when styles match.
    fn push_run(&mut self, run: TextRun) {
        if run.text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.style == run.style => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }
}

type Row = Vec<Vec<Block>>;

#[derive(Debug)]
enum Block {
    Paragraph(DocumentParagraph),
    Table(Vec<Row>),
}

/// Blocks are written to the innermost open table cell, or the body.
#[derive(Debug, Default)]
struct BlockSink {
    body: Vec<Block>,
    tables: Vec<Vec<Row>>,
}

impl BlockSink {
    fn push(&mut self, block: Block) {
        let cell = self
            .tables
            .last_mut()
            .and_then(|rows| rows.last_mut())
            .and_then(|row| row.last_mut());
        match cell {
            Some(cell) => cell.push(block),
            None => {
                if self.tables.is_empty() {
                    self.body.push(block);
                }
                // Content outside any cell of an open table is dropped.
            },
        }
    }

    fn start_table(&mut self) {
        self.tables.push(Vec::new());
    }

    fn start_row(&mut self) {
        if let Some(rows) = self.tables.last_mut() {
            rows.push(Vec::new());
        }
    }

    fn start_cell(&mut self) {
        if let Some(row) = self.tables.last_mut().and_then(|rows| rows.last_mut()) {
            row.push(Vec::new());
        }
    }

    fn end_table(&mut self) {
        if let Some(rows) = self.tables.pop() {
            self.push(Block::Table(rows));
        }
    }
}

fn parse_document(xml: &str) -> Result<Vec<Block>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut sink = BlockSink::default();
    let mut current_paragraph = DocumentParagraph::default();
    let mut current_run = TextRun::default();
    let mut in_paragraph = false;
    let mut in_paragraph_props = false;
    let mut in_run = false;
    let mut in_run_props = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"tbl" => sink.start_table(),
                b"tr" => sink.start_row(),
                b"tc" => sink.start_cell(),
                b"p" => {
                    in_paragraph = true;
                    current_paragraph = DocumentParagraph::default();
                },
                b"pPr" => in_paragraph_props = in_paragraph,
                b"r" => {
                    in_run = true;
                    current_run = TextRun::default();
                },
                b"rPr" => in_run_props = in_run,
                b"t" => in_text = in_run,
                _ => {
                    if in_run_props {
                        apply_run_property(e, &mut current_run.style);
                    } else if in_paragraph_props {
                        apply_paragraph_property(e, &mut current_paragraph.style);
                    }
                },
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"br" | b"cr" => {
                    if in_run {
                        current_run.text.push('\n');
                    }
                },
                b"tab" => {
                    if in_run && !in_run_props {
                        current_run.text.push(' ');
                    }
                },
                _ => {
                    if in_run_props {
                        apply_run_property(e, &mut current_run.style);
                    } else if in_paragraph_props {
                        apply_paragraph_property(e, &mut current_paragraph.style);
                    }
                },
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = false;
                    if current_paragraph.has_text() {
                        sink.push(Block::Paragraph(std::mem::take(&mut current_paragraph)));
                    }
                },
                b"pPr" => in_paragraph_props = false,
                b"r" => {
                    in_run = false;
                    current_paragraph.push_run(std::mem::take(&mut current_run));
                },
                b"rPr" => in_run_props = false,
                b"t" => in_text = false,
                b"tbl" => sink.end_table(),
                _ => {},
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    let text = e.unescape().map_err(docx_error)?;
                    current_run.text.push_str(&text);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(docx_error(e)),
            _ => {},
        }
        buf.clear();
    }

    // Unclosed tables in a truncated document still yield their content.
    while !sink.tables.is_empty() {
        sink.end_table();
    }

    Ok(sink.body)
}

fn apply_run_property(e: &BytesStart, style: &mut TextStyle) {
    let enabled = || toggle_enabled(get_attribute(e, "val").as_deref());
    match e.local_name().as_ref() {
        b"b" => style.bold = enabled(),
        b"i" => style.italic = enabled(),
        b"u" => style.underline = enabled(),
        b"strike" | b"dstrike" => style.strikethrough = enabled(),
        _ => {},
    }
}

fn apply_paragraph_property(e: &BytesStart, style: &mut ParagraphStyle) {
    match e.local_name().as_ref() {
        b"pStyle" => {
            if let Some(val) = get_attribute(e, "val") {
                style.heading_level = heading_level(&val);
            }
        },
        b"bidi" => style.rtl = toggle_enabled(get_attribute(e, "val").as_deref()),
        b"numId" => {
            if let Some(num_id) = get_attribute(e, "val") {
                let level = style.numbering.as_ref().map(|(_, l)| *l).unwrap_or(0);
                // numId 0 removes numbering
                style.numbering = if num_id == "0" { None } else { Some((num_id, level)) };
            }
        },
        b"ilvl" => {
            let level = get_attribute(e, "val").and_then(|v| v.parse().ok()).unwrap_or(0);
            match style.numbering.as_mut() {
                Some((_, l)) => *l = level,
                None => style.numbering = Some((String::new(), level)),
            }
        },
        _ => {},
    }
}

fn render_blocks(blocks: &[Block], numbering: &Numbering, paragraphs: &mut usize) -> String {
    let mut html = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in blocks {
        let list_kind = match block {
            Block::Paragraph(para) => para
                .style
                .numbering
                .as_ref()
                .filter(|(num_id, _)| !num_id.is_empty())
                .map(|(num_id, level)| numbering.kind(num_id, *level)),
            Block::Table(_) => None,
        };

        if open_list.is_some() && open_list != list_kind {
            if let Some(kind) = open_list.take() {
                html.push_str(&format!("</{}>", kind.tag()));
            }
        }
        if let (None, Some(kind)) = (open_list, list_kind) {
            html.push_str(&format!("<{}>", kind.tag()));
            open_list = Some(kind);
        }

        match block {
            Block::Paragraph(para) => {
                let tag = if list_kind.is_some() {
                    "li".to_string()
                } else {
                    para.style.block_tag()
                };
                let dir = if para.style.rtl { " dir=\"rtl\"" } else { "" };
                html.push_str(&format!("<{}{}>", tag, dir));
                render_runs(&para.runs, &mut html);
                html.push_str(&format!("</{}>", tag));
                *paragraphs += 1;
            },
            Block::Table(rows) => render_table(rows, numbering, paragraphs, &mut html),
        }
    }

    if let Some(kind) = open_list {
        html.push_str(&format!("</{}>", kind.tag()));
    }
    html
}

fn render_table(rows: &[Row], numbering: &Numbering, paragraphs: &mut usize, html: &mut String) {
    if rows.iter().all(|row| row.iter().all(|cell| cell.is_empty())) {
        return;
    }
    html.push_str("<table>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&render_blocks(cell, numbering, paragraphs));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
}

fn render_runs(runs: &[TextRun], html: &mut String) {
    for run in runs {
        let tags = run.style.open_tags();
        for tag in &tags {
            html.push_str(&format!("<{}>", tag));
        }
        html.push_str(&escape_html(&run.text).replace('\n', "<br />"));
        for tag in tags.iter().rev() {
            html.push_str(&format!("</{}>", tag));
        }
    }
}

/// Helper to get an attribute value from an XML element.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    // Check both with and without namespace prefix
    for attr in e.attributes().flatten() {
        let key = attr.key.local_name();
        if key.as_ref() == name.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            inner
        )
    }

    fn to_html(inner: &str) -> String {
        let blocks = parse_document(&body(inner)).unwrap();
        let mut count = 0;
        render_blocks(&blocks, &Numbering::default(), &mut count)
    }

    #[test]
    fn test_plain_paragraphs() {
        let html = to_html(
            "<w:p><w:r><w:t>Hello</w:t></w:r></w:p><w:p/><w:p><w:r><w:t xml:space=\"preserve\"> </w:t></w:r></w:p><w:p><w:r><w:t>World</w:t></w:r></w:p>",
        );
        assert_eq!(html, "<p>Hello</p><p>World</p>");
    }

    #[test]
    fn test_run_formatting_and_merging() {
        let html = to_html(
            "<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Bold </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>text</w:t></w:r><w:r><w:rPr><w:b w:val=\"0\"/><w:i/></w:rPr><w:t> and italic</w:t></w:r></w:p>",
        );
        assert_eq!(html, "<p><strong>Bold text</strong><em> and italic</em></p>");
    }

    #[test]
    fn test_heading_and_rtl() {
        let html = to_html(
            "<w:p><w:pPr><w:pStyle w:val=\"Heading2\"/></w:pPr><w:r><w:t>Scope</w:t></w:r></w:p><w:p><w:pPr><w:bidi/></w:pPr><w:r><w:t>نطاق العمل</w:t></w:r></w:p>",
        );
        assert_eq!(html, "<h2>Scope</h2><p dir=\"rtl\">نطاق العمل</p>");
    }

    #[test]
    fn test_text_is_escaped_and_breaks_kept() {
        let html = to_html("<w:p><w:r><w:t>a &lt; b</w:t><w:br/><w:t>c</w:t><w:tab/><w:t>d</w:t></w:r></w:p>");
        assert_eq!(html, "<p>a &lt; b<br />c d</p>");
    }

    #[test]
    fn test_list_items_grouped() {
        let html = to_html(
            "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr></w:pPr><w:r><w:t>one</w:t></w:r></w:p>\
             <w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr></w:pPr><w:r><w:t>two</w:t></w:r></w:p>\
             <w:p><w:r><w:t>after</w:t></w:r></w:p>",
        );
        assert_eq!(html, "<ul><li>one</li><li>two</li></ul><p>after</p>");
    }

    #[test]
    fn test_numbered_list_from_numbering_part() {
        let numbering = parse_numbering(
            r#"<w:numbering xmlns:w="w"><w:abstractNum w:abstractNumId="3"><w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum><w:num w:numId="7"><w:abstractNumId w:val="3"/></w:num></w:numbering>"#,
        )
        .unwrap();
        assert_eq!(numbering.kind("7", 0), ListKind::Numbered);
        assert_eq!(numbering.kind("8", 0), ListKind::Bullet);

        let blocks = parse_document(&body(
            "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"7\"/></w:numPr></w:pPr><w:r><w:t>first</w:t></w:r></w:p>",
        ))
        .unwrap();
        let mut count = 0;
        assert_eq!(render_blocks(&blocks, &numbering, &mut count), "<ol><li>first</li></ol>");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_table() {
        let html = to_html(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B1</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>below</w:t></w:r></w:p>",
        );
        assert_eq!(html, "<table><tr><td><p>A1</p></td><td><p>B1</p></td></tr></table><p>below</p>");
    }

    #[test]
    fn test_hyperlink_text_kept() {
        let html = to_html(
            "<w:p><w:hyperlink><w:r><w:t>link</w:t></w:r></w:hyperlink></w:p>",
        );
        assert_eq!(html, "<p>link</p>");
    }

    #[test]
    fn test_invalid_archive() {
        let err = DocxHtmlConverter::new().convert(b"not a zip").unwrap_err();
        assert!(matches!(
            err,
            Error::DocumentParse {
                format: DocumentFormat::Docx,
                ..
            }
        ));
    }
}
