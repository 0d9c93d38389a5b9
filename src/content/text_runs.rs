//! Positioned glyph runs from a page's content stream.
//!
//! Each text-showing operator (`Tj`, `TJ`, `'`, `"`) yields one run placed at
//! the origin of the text rendering matrix when the operator starts. The
//! text matrix then advances by the glyph widths so the next run without an
//! explicit move lands where the previous one ended.

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::sync::Arc;

use super::graphics_state::{GraphicsStateStack, Matrix};
use super::operators::{TextElement, TextOperator};
use super::resources::{get, get_array, get_dict, get_name, numbers, page_resources, stream_data};
use crate::config::ImportConfig;
use crate::fonts::{lookup_font, FontInfo};

/// A contiguous text fragment and its baseline origin in page space.
///
/// Coordinates are PDF user space after the CTM: origin bottom-left, `y`
/// growing up the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedGlyphRun {
    /// Text content
    pub text: String,
    /// Horizontal baseline origin
    pub x: f32,
    /// Vertical baseline origin
    pub y: f32,
}

impl PositionedGlyphRun {
    /// Create a run.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Reads glyph runs from the pages of a loaded document.
pub struct PageTextReader<'a> {
    doc: &'a Document,
    config: &'a ImportConfig,
}

impl<'a> PageTextReader<'a> {
    /// Create a reader over `doc`.
    pub fn new(doc: &'a Document, config: &'a ImportConfig) -> Self {
        Self { doc, config }
    }

    /// Runs of one page, in content stream order.
    pub fn read_page(&self, page_id: ObjectId) -> lopdf::Result<Vec<PositionedGlyphRun>> {
        let data = self.doc.get_page_content(page_id)?;
        let content = Content::decode(&data)?;
        let empty = Dictionary::new();
        let resources = page_resources(self.doc, page_id).unwrap_or(&empty);

        let mut interpreter = Interpreter::new(self.doc, self.config);
        interpreter.run(&content, resources, 0);
        Ok(interpreter.runs)
    }
}

struct Interpreter<'a> {
    doc: &'a Document,
    config: &'a ImportConfig,
    state: GraphicsStateStack,
    text_matrix: Matrix,
    line_matrix: Matrix,
    fonts: HashMap<ObjectId, Arc<FontInfo>>,
    runs: Vec<PositionedGlyphRun>,
}

impl<'a> Interpreter<'a> {
    fn new(doc: &'a Document, config: &'a ImportConfig) -> Self {
        Self {
            doc,
            config,
            state: GraphicsStateStack::default(),
            text_matrix: Matrix::identity(),
            line_matrix: Matrix::identity(),
            fonts: HashMap::new(),
            runs: Vec::new(),
        }
    }

    fn run(&mut self, content: &Content, resources: &'a Dictionary, depth: u32) {
        for op in &content.operations {
            let Some(op) = TextOperator::from_operation(op) else {
                continue;
            };
            self.apply(op, resources, depth);
        }
    }

    fn apply(&mut self, op: TextOperator, resources: &'a Dictionary, depth: u32) {
        match op {
            TextOperator::SaveState => self.state.save(),
            TextOperator::RestoreState => self.state.restore(),
            TextOperator::Transform(m) => {
                let ctm = self.state.current().ctm;
                self.state.current_mut().ctm = m.multiply(&ctm);
            },
            TextOperator::BeginText => {
                self.text_matrix = Matrix::identity();
                self.line_matrix = Matrix::identity();
            },
            TextOperator::EndText => {},
            TextOperator::SetFont { name, size } => {
                let font = self.font(resources, &name);
                let text = &mut self.state.current_mut().text;
                text.font = Some(font);
                text.font_size = size;
            },
            TextOperator::MoveText { tx, ty } => self.move_line(tx, ty),
            TextOperator::MoveTextSetLeading { tx, ty } => {
                self.state.current_mut().text.leading = -ty;
                self.move_line(tx, ty);
            },
            TextOperator::SetTextMatrix(m) => {
                self.text_matrix = m;
                self.line_matrix = m;
            },
            TextOperator::NextLine => self.next_line(),
            TextOperator::SetLeading(v) => self.state.current_mut().text.leading = v,
            TextOperator::SetCharSpacing(v) => self.state.current_mut().text.char_space = v,
            TextOperator::SetWordSpacing(v) => self.state.current_mut().text.word_space = v,
            TextOperator::SetHorizontalScaling(v) => {
                self.state.current_mut().text.horizontal_scaling = v
            },
            TextOperator::SetRise(v) => self.state.current_mut().text.rise = v,
            TextOperator::ShowText(bytes) => self.show(&[TextElement::Text(bytes)]),
            TextOperator::ShowTextArray(elements) => self.show(&elements),
            TextOperator::NextLineShowText(bytes) => {
                self.next_line();
                self.show(&[TextElement::Text(bytes)]);
            },
            TextOperator::SetSpacingNextLineShowText {
                word_space,
                char_space,
                text,
            } => {
                let state = &mut self.state.current_mut().text;
                state.word_space = word_space;
                state.char_space = char_space;
                self.next_line();
                self.show(&[TextElement::Text(text)]);
            },
            TextOperator::PaintXObject(name) => self.paint_xobject(resources, &name, depth),
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.current().text.leading;
        self.move_line(0.0, -leading);
    }

    fn font(&mut self, resources: &'a Dictionary, name: &[u8]) -> Arc<FontInfo> {
        let reference = get_dict(self.doc, resources, b"Font")
            .and_then(|fonts| fonts.get(name).ok())
            .and_then(|obj| match obj {
                Object::Reference(id) => Some(*id),
                _ => None,
            });

        if let Some(id) = reference {
            if let Some(cached) = self.fonts.get(&id) {
                return Arc::clone(cached);
            }
        }

        let info = match lookup_font(self.doc, resources, name) {
            Some(dict) => FontInfo::from_dict(self.doc, dict),
            None => {
                log::warn!(
                    "Font resource /{} not found, using fallback metrics",
                    String::from_utf8_lossy(name)
                );
                FontInfo::fallback()
            },
        };
        let info = Arc::new(info);
        if let Some(id) = reference {
            self.fonts.insert(id, Arc::clone(&info));
        }
        info
    }

    fn show(&mut self, elements: &[TextElement]) {
        let text_state = self.state.current().text.clone();
        let font = text_state
            .font
            .clone()
            .unwrap_or_else(|| Arc::new(FontInfo::fallback()));
        let scale = text_state.horizontal_scaling / 100.0;
        let size = text_state.font_size;

        let (tx, ty) = self.text_matrix.transform_point(0.0, text_state.rise);
        let (x, y) = self.state.current().ctm.transform_point(tx, ty);

        let mut text = String::new();
        for element in elements {
            match element {
                TextElement::Text(bytes) => {
                    for glyph in font.decode(bytes) {
                        text.push_str(&glyph.text);
                        let mut advance = glyph.width / 1000.0 * size + text_state.char_space;
                        if glyph.is_word_space {
                            advance += text_state.word_space;
                        }
                        self.advance(advance * scale);
                    }
                },
                TextElement::Offset(adjustment) => {
                    if *adjustment < self.config.tj_space_threshold
                        && !text.is_empty()
                        && !text.ends_with(' ')
                    {
                        text.push(' ');
                    }
                    self.advance(-adjustment / 1000.0 * size * scale);
                },
            }
        }

        if !text.is_empty() {
            log::trace!("Run {:?} at ({:.1}, {:.1})", text, x, y);
            self.runs.push(PositionedGlyphRun { text, x, y });
        }
    }

    fn advance(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).multiply(&self.text_matrix);
    }

    fn paint_xobject(&mut self, resources: &'a Dictionary, name: &[u8], depth: u32) {
        if depth >= self.config.max_xobject_depth {
            log::warn!(
                "Form XObject /{} skipped: nesting deeper than {}",
                String::from_utf8_lossy(name),
                self.config.max_xobject_depth
            );
            return;
        }

        let doc = self.doc;
        let Some(xobjects) = get_dict(doc, resources, b"XObject") else {
            return;
        };
        let Some(Object::Stream(stream)) = get(doc, xobjects, name) else {
            return;
        };
        if get_name(doc, &stream.dict, b"Subtype") != Some(b"Form".as_slice()) {
            return;
        }

        let content = match Content::decode(&stream_data(stream)) {
            Ok(content) => content,
            Err(e) => {
                log::warn!(
                    "Form XObject /{} has an undecodable content stream: {}",
                    String::from_utf8_lossy(name),
                    e
                );
                return;
            },
        };
        let matrix = get_array(doc, &stream.dict, b"Matrix")
            .and_then(numbers)
            .and_then(|values| Matrix::from_slice(&values))
            .unwrap_or_default();
        let form_resources = get_dict(doc, &stream.dict, b"Resources").unwrap_or(resources);

        let saved_text = (self.text_matrix, self.line_matrix);
        self.state.save();
        let ctm = self.state.current().ctm;
        self.state.current_mut().ctm = matrix.multiply(&ctm);
        self.run(&content, form_resources, depth + 1);
        self.state.restore();
        (self.text_matrix, self.line_matrix) = saved_text;
    }
}
