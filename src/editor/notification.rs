//! User-facing messages for failed imports.

use serde::Serialize;

use super::dual::LanguageSlot;
use crate::error::Error;

/// How prominently to show a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The user can fix it (another file, wait for the running import)
    Warning,
    /// The document or the system failed
    Error,
}

/// Language of the editor UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiLanguage {
    /// English
    #[default]
    English,
    /// Arabic
    Arabic,
}

/// A message for the notification area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Severity
    pub severity: Severity,
    /// Localized text
    pub message: String,
}

impl Notification {
    /// Translate an error for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use bilingual_import::editor::{Notification, Severity, UiLanguage};
    /// use bilingual_import::Error;
    ///
    /// let note = Notification::from_error(&Error::NoExtractableText, UiLanguage::English);
    /// assert_eq!(note.severity, Severity::Warning);
    /// ```
    pub fn from_error(error: &Error, language: UiLanguage) -> Self {
        let severity = match error {
            Error::UnsupportedFormat(_) | Error::NoExtractableText | Error::ImportInProgress(_) => {
                Severity::Warning
            },
            _ => Severity::Error,
        };
        Self {
            severity,
            message: message(error, language),
        }
    }
}

fn message(error: &Error, language: UiLanguage) -> String {
    match (error, language) {
        (Error::UnsupportedFormat(_), UiLanguage::English) => {
            "Only PDF and Word (.docx) files can be imported.".to_string()
        },
        (Error::UnsupportedFormat(_), UiLanguage::Arabic) => {
            "يمكن استيراد ملفات PDF و Word (.docx) فقط.".to_string()
        },
        (Error::NoExtractableText, UiLanguage::English) => {
            "No text could be found in this document.".to_string()
        },
        (Error::NoExtractableText, UiLanguage::Arabic) => {
            "لم يتم العثور على نص في هذا المستند.".to_string()
        },
        (Error::DocumentParse { format, .. }, UiLanguage::English) => {
            format!("The {} file could not be read. It may be damaged or protected.", format)
        },
        (Error::DocumentParse { format, .. }, UiLanguage::Arabic) => {
            format!("تعذرت قراءة ملف {}. قد يكون تالفًا أو محميًا.", format)
        },
        (Error::ImportInProgress(slot), UiLanguage::English) => {
            format!("An import into the {} text is already running.", slot)
        },
        (Error::ImportInProgress(slot), UiLanguage::Arabic) => {
            let which = match slot {
                LanguageSlot::Source => "النص المصدر",
                LanguageSlot::Target => "النص الهدف",
            };
            format!("يوجد استيراد جارٍ بالفعل إلى {}.", which)
        },
        (_, UiLanguage::English) => "The import failed. Please try again.".to_string(),
        (_, UiLanguage::Arabic) => "فشل الاستيراد. يرجى المحاولة مرة أخرى.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::DocumentFormat;

    #[test]
    fn test_severity_mapping() {
        let warn = [
            Error::UnsupportedFormat("image/png".to_string()),
            Error::NoExtractableText,
            Error::ImportInProgress(LanguageSlot::Source),
        ];
        for err in &warn {
            assert_eq!(Notification::from_error(err, UiLanguage::English).severity, Severity::Warning);
        }

        let parse = Error::parse(DocumentFormat::Docx, "bad zip");
        assert_eq!(Notification::from_error(&parse, UiLanguage::Arabic).severity, Severity::Error);
        let config = Error::Config("line_break".to_string());
        assert_eq!(Notification::from_error(&config, UiLanguage::English).severity, Severity::Error);
    }

    #[test]
    fn test_messages_localized() {
        let err = Error::parse(DocumentFormat::Pdf, "xref");
        let en = Notification::from_error(&err, UiLanguage::English);
        let ar = Notification::from_error(&err, UiLanguage::Arabic);
        assert!(en.message.contains("PDF"));
        assert!(ar.message.contains("PDF"));
        assert_ne!(en.message, ar.message);

        let busy = Notification::from_error(&Error::ImportInProgress(LanguageSlot::Target), UiLanguage::English);
        assert!(busy.message.contains("target"));
    }
}
