//! Dual-language rich-text editing.
//!
//! A content item is edited in two languages at once. Each language has its
//! own [`EditorBuffer`] wrapping a [`RichTextSurface`]; the two never share
//! state.
//!
//! ## Architecture
//!
//! ```text
//! DocumentTextExtractor ──▶ ExtractedDocument
//!                                 │ (import ticket)
//!                                 ▼
//! DualLanguageEditor ─┬─ EditorBuffer (source) ─ RichTextSurface
//!                     └─ EditorBuffer (target) ─ RichTextSurface
//! ```
//!
//! ## Write ordering
//!
//! Raw writes (`load_initial`, `on_user_edit`, `on_programmatic_import`,
//! `on_external_update`) are last-write-wins. An import started with
//! [`EditorBuffer::begin_import`] is only applied on completion if nothing
//! else was written to the buffer after it started; otherwise the result is
//! discarded as stale.

mod buffer;
mod dual;
mod notification;
mod surface;

pub use buffer::{EditorBuffer, ImportOutcome, ImportTicket};
pub use dual::{DualLanguageContent, DualLanguageEditor, LanguageSlot};
pub use notification::{Notification, Severity, UiLanguage};
pub use surface::{ChangeListener, MemorySurface, RichTextSurface};
