//! One language's editable buffer.

use super::dual::LanguageSlot;
use super::surface::RichTextSurface;
use crate::error::{Error, Result};
use crate::extractors::ExtractedDocument;

/// Proof that an import into a buffer is in flight.
///
/// Returned by [`EditorBuffer::begin_import`] and consumed by
/// [`EditorBuffer::finish_import`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an unfinished import keeps the buffer busy"]
pub struct ImportTicket {
    slot: LanguageSlot,
    sequence: u64,
}

impl ImportTicket {
    /// Buffer the import targets.
    pub fn slot(&self) -> LanguageSlot {
        self.slot
    }

    /// Sequence number taken when the import started.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// What happened to a successful import result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The buffer now holds the imported HTML.
    Applied,
    /// Another write started after the import; the result was dropped.
    DiscardedStale,
}

/// HTML buffer bound to a rich-text surface.
#[derive(Debug)]
pub struct EditorBuffer<S> {
    slot: LanguageSlot,
    surface: S,
    current_html: String,
    sequence: u64,
    last_write: u64,
    in_flight: Option<u64>,
}

impl<S: RichTextSurface> EditorBuffer<S> {
    /// Wrap `surface`; the buffer starts with whatever it shows.
    pub fn new(slot: LanguageSlot, surface: S) -> Self {
        let current_html = surface.read();
        Self {
            slot,
            surface,
            current_html,
            sequence: 0,
            last_write: 0,
            in_flight: None,
        }
    }

    /// Which language this buffer holds.
    pub fn slot(&self) -> LanguageSlot {
        self.slot
    }

    /// The last HTML written to the buffer.
    pub fn current_html(&self) -> &str {
        &self.current_html
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The wrapped surface, e.g. to register change listeners.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the buffer, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// True while an import is in flight.
    pub fn is_importing(&self) -> bool {
        self.in_flight.is_some()
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn replace(&mut self, html: &str) {
        self.last_write = self.next_sequence();
        self.current_html = html.to_string();
        self.surface.write(html);
    }

    /// Set the initial content, e.g. from a fetched content item.
    pub fn load_initial(&mut self, html: &str) {
        self.replace(html);
    }

    /// Record a user edit. The surface already shows `html`.
    pub fn on_user_edit(&mut self, html: &str) {
        self.last_write = self.next_sequence();
        self.current_html = html.to_string();
    }

    /// Replace the content with imported HTML.
    pub fn on_programmatic_import(&mut self, html: &str) {
        log::debug!("{} buffer: programmatic import of {} bytes", self.slot, html.len());
        self.replace(html);
    }

    /// Apply content pushed from outside (e.g. a refetch).
    ///
    /// Skipped when the surface already shows exactly `html`, so the
    /// cursor is not reset by a no-op write. Returns whether it applied.
    pub fn on_external_update(&mut self, html: &str) -> bool {
        if self.surface.read() == html {
            log::trace!("{} buffer: external update unchanged, skipped", self.slot);
            return false;
        }
        self.replace(html);
        true
    }

    /// Apply an extraction result.
    ///
    /// On error the buffer is left untouched and the error returned.
    pub fn apply_extraction(&mut self, result: Result<ExtractedDocument>) -> Result<()> {
        let extracted = result?;
        self.on_programmatic_import(extracted.html());
        Ok(())
    }

    /// Mark an import as started.
    ///
    /// Fails with [`Error::ImportInProgress`] if one is already running.
    pub fn begin_import(&mut self) -> Result<ImportTicket> {
        if self.in_flight.is_some() {
            return Err(Error::ImportInProgress(self.slot));
        }
        let sequence = self.next_sequence();
        self.in_flight = Some(sequence);
        Ok(ImportTicket {
            slot: self.slot,
            sequence,
        })
    }

    /// Complete an import started with [`begin_import`](Self::begin_import).
    ///
    /// Errors are returned with the buffer untouched. A successful result is
    /// applied only if no write was started after the ticket was taken.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        result: Result<ExtractedDocument>,
    ) -> Result<ImportOutcome> {
        let current = self.in_flight == Some(ticket.sequence) && ticket.slot == self.slot;
        if current {
            self.in_flight = None;
        }

        let extracted = result?;
        if !current || self.last_write > ticket.sequence {
            log::debug!(
                "{} buffer: import #{} superseded by write #{}, discarded",
                self.slot,
                ticket.sequence,
                self.last_write
            );
            return Ok(ImportOutcome::DiscardedStale);
        }

        self.on_programmatic_import(extracted.html());
        Ok(ImportOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MemorySurface;
    use crate::extractors::DocumentFormat;

    fn buffer() -> EditorBuffer<MemorySurface> {
        EditorBuffer::new(LanguageSlot::Target, MemorySurface::new())
    }

    fn extracted(html: &str) -> Result<ExtractedDocument> {
        Ok(ExtractedDocument {
            format: DocumentFormat::Pdf,
            html: html.to_string(),
            page_count: 1,
            line_count: 1,
        })
    }

    #[test]
    fn test_change_events_forwarded_through_channel() {
        let (tx, rx) = std::sync::mpsc::channel::<String>();
        let mut buf = buffer();
        buf.surface_mut().on_change(Box::new(move |html| {
            let _ = tx.send(html.to_string());
        }));

        let ticket = buf.begin_import().unwrap();
        buf.surface_mut().type_text("<p>typed</p>");
        for html in rx.try_iter() {
            buf.on_user_edit(&html);
        }

        let outcome = buf.finish_import(ticket, extracted("late<br/><br/>")).unwrap();
        assert_eq!(outcome, ImportOutcome::DiscardedStale);
        assert_eq!(buf.current_html(), "<p>typed</p>");
        // The import write never reached the listener.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_new_reads_surface() {
        let buf = EditorBuffer::new(LanguageSlot::Source, MemorySurface::with_content("<p>x</p>"));
        assert_eq!(buf.current_html(), "<p>x</p>");
        assert!(!buf.is_importing());
    }

    #[test]
    fn test_import_replaces_content() {
        let mut buf = buffer();
        buf.load_initial("<p>old</p>");
        buf.on_programmatic_import("new<br/><br/>");
        assert_eq!(buf.current_html(), "new<br/><br/>");
        assert_eq!(buf.surface().read(), "new<br/><br/>");
    }

    #[test]
    fn test_user_edit_does_not_write_surface() {
        let mut buf = buffer();
        buf.surface_mut().type_text("<p>typed</p>");
        buf.on_user_edit("<p>typed</p>");
        assert_eq!(buf.current_html(), "<p>typed</p>");
        assert_eq!(buf.surface().write_count(), 0);
    }

    #[test]
    fn test_external_update_equality_check() {
        let mut buf = buffer();
        buf.load_initial("<p>same</p>");
        assert!(!buf.on_external_update("<p>same</p>"));
        assert_eq!(buf.surface().write_count(), 1);
        assert!(buf.on_external_update("<p>changed</p>"));
        assert_eq!(buf.current_html(), "<p>changed</p>");
    }

    #[test]
    fn test_failed_extraction_leaves_buffer() {
        let mut buf = buffer();
        buf.load_initial("<p>keep</p>");
        let err = buf.apply_extraction(Err(Error::NoExtractableText)).unwrap_err();
        assert!(matches!(err, Error::NoExtractableText));
        assert_eq!(buf.current_html(), "<p>keep</p>");
        assert_eq!(buf.surface().write_count(), 1);
    }

    #[test]
    fn test_ticket_applied() {
        let mut buf = buffer();
        let ticket = buf.begin_import().unwrap();
        assert!(buf.is_importing());
        let outcome = buf.finish_import(ticket, extracted("done<br/><br/>")).unwrap();
        assert_eq!(outcome, ImportOutcome::Applied);
        assert_eq!(buf.current_html(), "done<br/><br/>");
        assert!(!buf.is_importing());
    }

    #[test]
    fn test_second_import_rejected() {
        let mut buf = buffer();
        let _ticket = buf.begin_import().unwrap();
        let err = buf.begin_import().unwrap_err();
        assert!(matches!(err, Error::ImportInProgress(LanguageSlot::Target)));
    }

    #[test]
    fn test_stale_import_discarded() {
        let mut buf = buffer();
        let ticket = buf.begin_import().unwrap();
        buf.on_user_edit("<p>typed meanwhile</p>");
        let outcome = buf.finish_import(ticket, extracted("late")).unwrap();
        assert_eq!(outcome, ImportOutcome::DiscardedStale);
        assert_eq!(buf.current_html(), "<p>typed meanwhile</p>");
        assert!(!buf.is_importing());
    }

    #[test]
    fn test_failed_import_clears_busy_flag() {
        let mut buf = buffer();
        buf.load_initial("<p>keep</p>");
        let ticket = buf.begin_import().unwrap();
        assert!(buf.finish_import(ticket, Err(Error::NoExtractableText)).is_err());
        assert!(!buf.is_importing());
        assert_eq!(buf.current_html(), "<p>keep</p>");
        assert!(buf.begin_import().is_ok());
    }
}
