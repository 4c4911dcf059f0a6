//! Markup version detection
//!
//! The document's markup version is classified by scanning the serialized
//! markup for version-identifying tokens, case-insensitively and in priority
//! order: the HTML5 doctype first, then the older DTD markers.

use std::fmt;

/// Markup version of an analyzed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupVersion {
    Html5,
    Html401,
    Xhtml10,
    Xhtml11,
    Unknown,
}

impl MarkupVersion {
    /// Classifies a document from its raw markup
    ///
    /// Tokens are checked in priority order against the lowercased markup;
    /// the first match wins.
    pub fn detect(markup: &str) -> Self {
        let markup = markup.to_lowercase();

        if markup.contains("<!doctype html>") {
            return Self::Html5;
        }
        if markup.contains("html 4.01") {
            return Self::Html401;
        }
        if markup.contains("xhtml 1.0") {
            return Self::Xhtml10;
        }
        if markup.contains("xhtml 1.1") {
            return Self::Xhtml11;
        }

        Self::Unknown
    }

    /// Returns the version label used in result records
    pub fn label(&self) -> &'static str {
        match self {
            Self::Html5 => "HTML5",
            Self::Html401 => "HTML 4.01",
            Self::Xhtml10 => "XHTML 1.0",
            Self::Xhtml11 => "XHTML 1.1",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a version from its label
    ///
    /// Returns None if the string doesn't match any known label.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "HTML5" => Some(Self::Html5),
            "HTML 4.01" => Some(Self::Html401),
            "XHTML 1.0" => Some(Self::Xhtml10),
            "XHTML 1.1" => Some(Self::Xhtml11),
            "Unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for MarkupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
