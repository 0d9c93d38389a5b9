//! The rich-text widget seam.

use std::fmt;

/// Callback invoked with the surface's HTML after user input.
pub type ChangeListener = Box<dyn FnMut(&str) + Send>;

/// A rich-text editing widget holding HTML.
///
/// Implementations notify change listeners for user input only. A
/// programmatic [`write`](RichTextSurface::write) must not call them back,
/// or an import would echo into the buffer as a user edit.
///
/// [`EditorBuffer`](crate::editor::EditorBuffer) never registers a listener
/// itself. Listeners are `'static` and cannot borrow the buffer, so the host
/// forwards edits, typically through a channel drained on its event loop:
///
/// ```
/// use std::sync::mpsc;
/// use bilingual_import::editor::{EditorBuffer, MemorySurface, RichTextSurface};
/// use bilingual_import::LanguageSlot;
///
/// let (tx, rx) = mpsc::channel::<String>();
/// let mut surface = MemorySurface::new();
/// surface.on_change(Box::new(move |html| {
///     let _ = tx.send(html.to_string());
/// }));
///
/// let mut buffer = EditorBuffer::new(LanguageSlot::Target, surface);
/// buffer.surface_mut().type_text("<p>typed</p>");
///
/// for html in rx.try_iter() {
///     buffer.on_user_edit(&html);
/// }
/// assert_eq!(buffer.current_html(), "<p>typed</p>");
/// ```
pub trait RichTextSurface {
    /// Current HTML shown by the widget.
    fn read(&self) -> String;

    /// Replace the widget's content.
    fn write(&mut self, html: &str);

    /// Register a listener for user edits.
    fn on_change(&mut self, listener: ChangeListener);
}

/// In-memory surface for headless hosts and tests.
#[derive(Default)]
pub struct MemorySurface {
    html: String,
    listeners: Vec<ChangeListener>,
    writes: usize,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface already showing `html`.
    pub fn with_content(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    /// Simulate the user replacing the content with `html`.
    ///
    /// Change listeners are notified.
    pub fn type_text(&mut self, html: &str) {
        self.html = html.to_string();
        for listener in &mut self.listeners {
            listener(html);
        }
    }

    /// Number of programmatic writes received.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl RichTextSurface for MemorySurface {
    fn read(&self) -> String {
        self.html.clone()
    }

    fn write(&mut self, html: &str) {
        self.html = html.to_string();
        self.writes += 1;
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySurface")
            .field("html", &self.html)
            .field("listeners", &self.listeners.len())
            .field("writes", &self.writes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_listeners_fire_on_user_input_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut surface = MemorySurface::new();
        surface.on_change(Box::new(move |html| sink.lock().unwrap().push(html.to_string())));

        surface.write("<p>imported</p>");
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(surface.read(), "<p>imported</p>");

        surface.type_text("<p>typed</p>");
        assert_eq!(*seen.lock().unwrap(), vec!["<p>typed</p>".to_string()]);
        assert_eq!(surface.read(), "<p>typed</p>");
        assert_eq!(surface.write_count(), 1);
    }
}
