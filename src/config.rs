//! Configuration for document import.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default vertical tolerance (in PDF user-space units) for line clustering.
///
/// Absorbs baseline jitter within one printed line. Not derived from font
/// metrics.
pub const DEFAULT_LINE_TOLERANCE: f32 = 8.0;

/// Default line break marker written after every assembled line.
pub const DEFAULT_LINE_BREAK: &str = "<br/>";

/// Import configuration.
///
/// Every field has a default; a JSON document only needs to name the
/// fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Maximum distance between a run's `y` and a line's representative `y`.
    pub line_tolerance: f32,

    /// Marker appended after each assembled line.
    pub line_break: String,

    /// Separator placed between runs of the same line.
    pub run_separator: String,

    /// Append an extra line break after each page.
    pub page_break: bool,

    /// Escape HTML special characters in extracted run text.
    pub escape_html: bool,

    /// TJ adjustment (thousandths of text space) below which a space is
    /// inserted into the current run.
    pub tj_space_threshold: f32,

    /// Maximum nesting of form XObjects followed while reading a page.
    pub max_xobject_depth: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            line_break: DEFAULT_LINE_BREAK.to_string(),
            run_separator: " ".to_string(),
            page_break: true,
            escape_html: true,
            tj_space_threshold: -120.0,
            max_xobject_depth: 8,
        }
    }

    /// Set the line clustering tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the line break marker.
    pub fn with_line_break(mut self, marker: impl Into<String>) -> Self {
        self.line_break = marker.into();
        self
    }

    /// Set the separator between runs of one line.
    pub fn with_run_separator(mut self, separator: impl Into<String>) -> Self {
        self.run_separator = separator.into();
        self
    }

    /// Enable or disable the extra line break between pages.
    pub fn with_page_break(mut self, enable: bool) -> Self {
        self.page_break = enable;
        self
    }

    /// Enable or disable HTML escaping of run text.
    pub fn with_escape_html(mut self, enable: bool) -> Self {
        self.escape_html = enable;
        self
    }

    /// Set the TJ space insertion threshold.
    pub fn with_tj_space_threshold(mut self, threshold: f32) -> Self {
        self.tj_space_threshold = threshold;
        self
    }

    /// Set how deep nested form XObjects are followed.
    pub fn with_max_xobject_depth(mut self, depth: u32) -> Self {
        self.max_xobject_depth = depth;
        self
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded import configuration from {}", path.as_ref().display());
        Self::from_json(&json)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.line_tolerance.is_finite() || self.line_tolerance < 0.0 {
            return Err(Error::Config(format!(
                "line_tolerance must be a finite, non-negative number (got {})",
                self.line_tolerance
            )));
        }
        if self.line_break.is_empty() {
            return Err(Error::Config("line_break must not be empty".to_string()));
        }
        if !self.tj_space_threshold.is_finite() {
            return Err(Error::Config("tj_space_threshold must be finite".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.line_tolerance, 8.0);
        assert_eq!(config.line_break, "<br/>");
        assert_eq!(config.run_separator, " ");
        assert!(config.page_break);
        assert!(config.escape_html);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ImportConfig::new()
            .with_line_tolerance(3.5)
            .with_line_break("\n")
            .with_page_break(false)
            .with_max_xobject_depth(2);
        assert_eq!(config.line_tolerance, 3.5);
        assert_eq!(config.line_break, "\n");
        assert!(!config.page_break);
        assert_eq!(config.max_xobject_depth, 2);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ImportConfig::from_json(r#"{"line_tolerance": 4.0}"#).unwrap();
        assert_eq!(config.line_tolerance, 4.0);
        assert_eq!(config.line_break, DEFAULT_LINE_BREAK);
    }

    #[test]
    fn test_from_json_rejects_negative_tolerance() {
        let err = ImportConfig::from_json(r#"{"line_tolerance": -1.0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = ImportConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"line_break": "\n", "page_break": false}}"#).unwrap();
        let config = ImportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.line_break, "\n");
        assert!(!config.page_break);
        assert_eq!(config.line_tolerance, DEFAULT_LINE_TOLERANCE);
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImportConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_empty_line_break_invalid() {
        let config = ImportConfig::new().with_line_break("");
        assert!(config.validate().is_err());
    }
}
