//! Source and target buffers of one content item.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::buffer::{EditorBuffer, ImportOutcome, ImportTicket};
use super::surface::RichTextSurface;
use crate::error::Result;
use crate::extractors::{DocumentTextExtractor, ExtractedDocument};

/// Which of the two language buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSlot {
    /// Source-language variant
    Source,
    /// Target-language variant
    Target,
}

impl fmt::Display for LanguageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSlot::Source => write!(f, "source"),
            LanguageSlot::Target => write!(f, "target"),
        }
    }
}

/// Both variants of a content item, as sent to the content API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualLanguageContent {
    /// Source-language HTML
    pub source_html: String,
    /// Target-language HTML
    pub target_html: String,
}

/// Two independent editor buffers.
///
/// Every operation addresses exactly one buffer; nothing written to one
/// slot is visible in the other.
#[derive(Debug)]
pub struct DualLanguageEditor<S> {
    source: EditorBuffer<S>,
    target: EditorBuffer<S>,
}

impl<S: RichTextSurface> DualLanguageEditor<S> {
    /// Bind the two surfaces.
    pub fn new(source: S, target: S) -> Self {
        Self {
            source: EditorBuffer::new(LanguageSlot::Source, source),
            target: EditorBuffer::new(LanguageSlot::Target, target),
        }
    }

    /// Buffer for `slot`.
    pub fn buffer(&self, slot: LanguageSlot) -> &EditorBuffer<S> {
        match slot {
            LanguageSlot::Source => &self.source,
            LanguageSlot::Target => &self.target,
        }
    }

    /// Mutable buffer for `slot`.
    pub fn buffer_mut(&mut self, slot: LanguageSlot) -> &mut EditorBuffer<S> {
        match slot {
            LanguageSlot::Source => &mut self.source,
            LanguageSlot::Target => &mut self.target,
        }
    }

    /// Load both buffers from fetched content.
    pub fn load_initial(&mut self, content: &DualLanguageContent) {
        self.source.load_initial(&content.source_html);
        self.target.load_initial(&content.target_html);
    }

    /// Current content of both buffers.
    pub fn snapshot(&self) -> DualLanguageContent {
        DualLanguageContent {
            source_html: self.source.current_html().to_string(),
            target_html: self.target.current_html().to_string(),
        }
    }

    /// Start an import into `slot`.
    pub fn begin_import(&mut self, slot: LanguageSlot) -> Result<ImportTicket> {
        self.buffer_mut(slot).begin_import()
    }

    /// Complete an import; the ticket selects the buffer.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        result: Result<ExtractedDocument>,
    ) -> Result<ImportOutcome> {
        self.buffer_mut(ticket.slot()).finish_import(ticket, result)
    }

    /// Extract `bytes` and import the result into `slot`.
    pub fn import(
        &mut self,
        slot: LanguageSlot,
        extractor: &DocumentTextExtractor,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<ImportOutcome> {
        let ticket = self.begin_import(slot)?;
        let result = extractor.extract(bytes, mime_type);
        if let Err(e) = &result {
            log::warn!("Import into {} buffer failed: {}", slot, e);
        }
        self.finish_import(ticket, result)
    }
}
