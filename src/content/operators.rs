//! Content stream operators that affect text placement.
//!
//! `lopdf` tokenizes a content stream into untyped `Operation`s. This module
//! lifts the ones text extraction cares about into a typed enum; every other
//! operator (paths, colors, images, marked content) is skipped.

use lopdf::content::Operation;
use lopdf::Object;

use super::graphics_state::Matrix;
use super::resources::{number, numbers};

/// One element of a `TJ` array.
#[derive(Debug, Clone, PartialEq)]
pub enum TextElement {
    /// A string to show
    Text(Vec<u8>),
    /// A position adjustment in thousandths of text space
    Offset(f32),
}

/// A text-relevant content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum TextOperator {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Concatenate to the CTM (cm)
    Transform(Matrix),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont {
        /// Font resource name
        name: Vec<u8>,
        /// Font size
        size: f32,
    },
    /// Move text position (Td)
    MoveText {
        /// Horizontal offset
        tx: f32,
        /// Vertical offset
        ty: f32,
    },
    /// Move text position and set leading (TD)
    MoveTextSetLeading {
        /// Horizontal offset
        tx: f32,
        /// Vertical offset
        ty: f32,
    },
    /// Set text matrix (Tm)
    SetTextMatrix(Matrix),
    /// Move to start of next line (T*)
    NextLine,
    /// Set leading (TL)
    SetLeading(f32),
    /// Set character spacing (Tc)
    SetCharSpacing(f32),
    /// Set word spacing (Tw)
    SetWordSpacing(f32),
    /// Set horizontal scaling (Tz)
    SetHorizontalScaling(f32),
    /// Set text rise (Ts)
    SetRise(f32),
    /// Show text (Tj)
    ShowText(Vec<u8>),
    /// Show text with glyph positioning (TJ)
    ShowTextArray(Vec<TextElement>),
    /// Next line then show text (')
    NextLineShowText(Vec<u8>),
    /// Set spacing, next line, show text (")
    SetSpacingNextLineShowText {
        /// Word spacing
        word_space: f32,
        /// Character spacing
        char_space: f32,
        /// Text to show
        text: Vec<u8>,
    },
    /// Paint an XObject (Do)
    PaintXObject(Vec<u8>),
}

impl TextOperator {
    /// Lift a tokenized operation. Returns `None` for operators text
    /// extraction ignores and for malformed operand lists.
    pub fn from_operation(op: &Operation) -> Option<Self> {
        let operands = op.operands.as_slice();
        let parsed = match op.operator.as_str() {
            "q" => Self::SaveState,
            "Q" => Self::RestoreState,
            "cm" => Self::Transform(Matrix::from_slice(&numbers(operands)?)?),
            "BT" => Self::BeginText,
            "ET" => Self::EndText,
            "Tf" => match operands {
                [Object::Name(name), size] => Self::SetFont {
                    name: name.clone(),
                    size: number(size)?,
                },
                _ => return None,
            },
            "Td" => {
                let [tx, ty] = two_numbers(operands)?;
                Self::MoveText { tx, ty }
            },
            "TD" => {
                let [tx, ty] = two_numbers(operands)?;
                Self::MoveTextSetLeading { tx, ty }
            },
            "Tm" => Self::SetTextMatrix(Matrix::from_slice(&numbers(operands)?)?),
            "T*" => Self::NextLine,
            "TL" => Self::SetLeading(number(operands.first()?)?),
            "Tc" => Self::SetCharSpacing(number(operands.first()?)?),
            "Tw" => Self::SetWordSpacing(number(operands.first()?)?),
            "Tz" => Self::SetHorizontalScaling(number(operands.first()?)?),
            "Ts" => Self::SetRise(number(operands.first()?)?),
            "Tj" => Self::ShowText(string_bytes(operands.first()?)?),
            "'" => Self::NextLineShowText(string_bytes(operands.first()?)?),
            "\"" => match operands {
                [aw, ac, text] => Self::SetSpacingNextLineShowText {
                    word_space: number(aw)?,
                    char_space: number(ac)?,
                    text: string_bytes(text)?,
                },
                _ => return None,
            },
            "TJ" => match operands.first()? {
                Object::Array(items) => Self::ShowTextArray(
                    items
                        .iter()
                        .filter_map(|item| match item {
                            Object::String(bytes, _) => Some(TextElement::Text(bytes.clone())),
                            other => number(other).map(TextElement::Offset),
                        })
                        .collect(),
                ),
                _ => return None,
            },
            "Do" => match operands.first()? {
                Object::Name(name) => Self::PaintXObject(name.clone()),
                _ => return None,
            },
            _ => return None,
        };
        Some(parsed)
    }
}

fn two_numbers(operands: &[Object]) -> Option<[f32; 2]> {
    match operands {
        [a, b] => Some([number(a)?, number(b)?]),
        _ => None,
    }
}

fn string_bytes(object: &Object) -> Option<Vec<u8>> {
    match object {
        Object::String(bytes, _) => Some(bytes.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    #[test]
    fn test_lift_font_and_positioning() {
        assert_eq!(
            TextOperator::from_operation(&op("Tf", vec![Object::Name(b"F1".to_vec()), 12.into()])),
            Some(TextOperator::SetFont {
                name: b"F1".to_vec(),
                size: 12.0
            })
        );
        assert_eq!(
            TextOperator::from_operation(&op("Td", vec![100.into(), Object::Real(7.5)])),
            Some(TextOperator::MoveText { tx: 100.0, ty: 7.5 })
        );
        assert_eq!(
            TextOperator::from_operation(&op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 700.into()])),
            Some(TextOperator::SetTextMatrix(Matrix::translation(72.0, 700.0)))
        );
    }

    #[test]
    fn test_lift_show_text_array() {
        let array = Object::Array(vec![
            Object::string_literal("Hel"),
            Object::Integer(-250),
            Object::string_literal("lo"),
        ]);
        assert_eq!(
            TextOperator::from_operation(&op("TJ", vec![array])),
            Some(TextOperator::ShowTextArray(vec![
                TextElement::Text(b"Hel".to_vec()),
                TextElement::Offset(-250.0),
                TextElement::Text(b"lo".to_vec()),
            ]))
        );
    }

    #[test]
    fn test_ignored_and_malformed() {
        assert_eq!(TextOperator::from_operation(&op("re", vec![])), None);
        assert_eq!(TextOperator::from_operation(&op("Td", vec![1.into()])), None);
        assert_eq!(TextOperator::from_operation(&op("Tj", vec![1.into()])), None);
    }
}
