//! Graphics state for content stream execution.
//!
//! Only the parameters that move text around are tracked: the current
//! transformation matrix and the text state (font, size, spacing, scaling,
//! leading, rise).

use std::sync::Arc;

use crate::fonts::FontInfo;

/// Affine transform `[a b c d e f]` as it appears in `cm` and `Tm` operands.
///
/// Points are row vectors, so `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// x scale
    pub a: f32,
    /// x shear into y
    pub b: f32,
    /// y shear into x
    pub c: f32,
    /// y scale
    pub d: f32,
    /// x offset
    pub e: f32,
    /// y offset
    pub f: f32,
}

impl Matrix {
    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use bilingual_import::content::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.a, 1.0);
    /// assert_eq!(m.e, 0.0);
    /// ```
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a matrix from its six components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create a matrix from an operand list of exactly six numbers.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [a, b, c, d, e, f] => Some(Self::new(*a, *b, *c, *d, *e, *f)),
            _ => None,
        }
    }

    /// Create a translation matrix.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Multiply this matrix with another matrix.
    ///
    /// The result represents first applying `self`, then applying `other`,
    /// which is the order PDF composes `cm` and `Tm` with the CTM.
    ///
    /// # Examples
    ///
    /// ```
    /// use bilingual_import::content::Matrix;
    ///
    /// let scale = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
    /// let moved = Matrix::translation(10.0, 5.0).multiply(&scale);
    /// assert_eq!((moved.e, moved.f), (20.0, 10.0));
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point using this matrix.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Text state parameters (ISO 32000-1:2008, 9.3).
#[derive(Debug, Clone)]
pub struct TextState {
    /// Character spacing (Tc)
    pub char_space: f32,
    /// Word spacing (Tw)
    pub word_space: f32,
    /// Horizontal scaling percentage (Tz)
    pub horizontal_scaling: f32,
    /// Text leading (TL)
    pub leading: f32,
    /// Current font (Tf)
    pub font: Option<Arc<FontInfo>>,
    /// Current font size (Tf)
    pub font_size: f32,
    /// Text rise (Ts)
    pub rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            char_space: 0.0,
            word_space: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            font: None,
            font_size: 12.0,
            rise: 0.0,
        }
    }
}

/// Graphics state saved and restored by `q` / `Q`.
#[derive(Debug, Clone, Default)]
pub struct GraphicsState {
    /// Current transformation matrix
    pub ctm: Matrix,
    /// Text state
    pub text: TextState,
}

/// Stack of graphics states for `q` / `Q`.
#[derive(Debug, Clone)]
pub struct GraphicsStateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl GraphicsStateStack {
    /// Create a stack whose current state starts at `ctm`.
    pub fn new(ctm: Matrix) -> Self {
        Self {
            current: GraphicsState {
                ctm,
                text: TextState::default(),
            },
            saved: Vec::new(),
        }
    }

    /// The current state.
    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    /// The current state, mutably.
    pub fn current_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    /// Save the current state (`q`).
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Restore the last saved state (`Q`). Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.current = state,
            None => log::warn!("Unbalanced Q operator ignored"),
        }
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

impl Default for GraphicsStateStack {
    fn default() -> Self {
        Self::new(Matrix::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_then_scale() {
        let scale = Matrix::new(2.0, 0.0, 0.0, 3.0, 0.0, 0.0);
        let m = Matrix::translation(10.0, 20.0).multiply(&scale);
        assert_eq!(m.transform_point(0.0, 0.0), (20.0, 60.0));
    }

    #[test]
    fn test_from_slice() {
        assert_eq!(
            Matrix::from_slice(&[1.0, 0.0, 0.0, 1.0, 5.0, 6.0]),
            Some(Matrix::translation(5.0, 6.0))
        );
        assert_eq!(Matrix::from_slice(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_save_restore() {
        let mut stack = GraphicsStateStack::default();
        stack.current_mut().text.font_size = 20.0;
        stack.save();
        stack.current_mut().text.font_size = 9.0;
        stack.current_mut().ctm = Matrix::translation(1.0, 1.0);
        assert_eq!(stack.depth(), 1);

        stack.restore();
        assert_eq!(stack.current().text.font_size, 20.0);
        assert_eq!(stack.current().ctm, Matrix::identity());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut stack = GraphicsStateStack::default();
        stack.current_mut().text.char_space = 2.0;
        stack.restore();
        assert_eq!(stack.current().text.char_space, 2.0);
    }
}
