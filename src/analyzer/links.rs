//! Hyperlink resolution and classification
//!
//! Hrefs found on a page are resolved to absolute URLs against the page's
//! own URL and classified as internal or external by comparing hosts.

use serde::{Deserialize, Serialize};
use url::Url;

/// Whether a link points at the analyzed page's own host or elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkScope {
    Internal,
    External,
}

impl LinkScope {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// A hyperlink resolved to absolute form, ready for verification
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    pub url: Url,
    pub scope: LinkScope,
}

/// Resolves an href to an absolute URL against the page's base URL
///
/// Relative references are made absolute using the document's own URL as
/// base. Returns None for empty hrefs and hrefs that fail to resolve.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    base_url.join(href).ok()
}

/// Classifies a resolved link relative to the page's origin
///
/// A link is internal when its host matches the base URL's host, external
/// otherwise. Host-less URLs (e.g. mailto:) never match an HTTP base and
/// classify as external.
pub fn classify_link(link: &Url, base_url: &Url) -> LinkScope {
    if link.host_str() == base_url.host_str() {
        LinkScope::Internal
    } else {
        LinkScope::External
    }
}
