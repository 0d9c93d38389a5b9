//! Error types for document import and buffer synchronization.
//!
//! Every failure of an import is one of the variants below. Callers at the
//! UI boundary turn them into [`Notification`](crate::editor::Notification)s;
//! none of them leave partial content in an editor buffer.

use crate::editor::LanguageSlot;
use crate::extractors::DocumentFormat;

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed underlying cause of a parse failure.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types that can occur while importing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The MIME type is not one of the supported document kinds.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document parsed but contained no usable text.
    #[error("No extractable text found in document")]
    NoExtractableText,

    /// The binary could not be parsed.
    #[error("Failed to parse {format} document: {source}")]
    DocumentParse {
        /// Format the bytes were parsed as
        format: DocumentFormat,
        /// Underlying cause, kept for diagnostics
        #[source]
        source: BoxedCause,
    },

    /// An import into this buffer is already running.
    #[error("An import into the {0} buffer is already in progress")]
    ImportInProgress(LanguageSlot),

    /// Invalid configuration value or configuration document.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot or report could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::DocumentParse`] from any error type.
    pub fn parse<E>(format: DocumentFormat, cause: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        Error::DocumentParse {
            format,
            source: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unsupported_format_error() {
        let err = Error::UnsupportedFormat("image/png".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Unsupported document format"));
        assert!(msg.contains("image/png"));
    }

    #[test]
    fn test_document_parse_keeps_cause() {
        let err = Error::parse(DocumentFormat::Pdf, "trailer not found");
        let msg = format!("{}", err);
        assert!(msg.contains("PDF"));
        assert!(msg.contains("trailer not found"));
        let cause = err.source().expect("cause retained");
        assert_eq!(cause.to_string(), "trailer not found");
    }

    #[test]
    fn test_import_in_progress_names_slot() {
        let err = Error::ImportInProgress(LanguageSlot::Target);
        assert!(format!("{}", err).contains("target"));
    }

    #[test]
    fn test_serialize_error_is_not_a_config_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Serialize(_)));
        let msg = format!("{}", err);
        assert!(msg.starts_with("Failed to serialize output"));
        assert!(!msg.contains("configuration"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
