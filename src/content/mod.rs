//! PDF content stream interpretation.
//!
//! `lopdf` supplies the tokenized operations; this module tracks the
//! graphics and text state they manipulate and turns text-showing operators
//! into positioned glyph runs.

pub mod graphics_state;
pub mod operators;
pub mod resources;
pub mod text_runs;

pub use graphics_state::{GraphicsState, GraphicsStateStack, Matrix, TextState};
pub use operators::{TextElement, TextOperator};
pub use text_runs::{PageTextReader, PositionedGlyphRun};
