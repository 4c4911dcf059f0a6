//! HTML parser for extracting page facts
//!
//! This module parses fetched HTML to extract:
//! - The page title
//! - Login-form presence (a form containing a password input)
//! - Every hyperlink with a non-empty reference, resolved and classified

use crate::analyzer::links::{classify_link, resolve_link, LinkScope, ResolvedLink};
use crate::analyzer::markup::MarkupVersion;
use scraper::{Html, Selector};
use url::Url;

/// Structural facts extracted from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The first `<title>` element's trimmed text; empty if absent
    pub title: String,

    /// Markup version classified from the raw document
    pub html_version: MarkupVersion,

    /// Whether the page carries a login form
    pub login_form: bool,

    /// All resolved hyperlinks, in document order
    pub links: Vec<ResolvedLink>,

    /// Count of links whose host matches the page's host
    pub internal_links: u32,

    /// Count of links pointing elsewhere
    pub external_links: u32,
}

/// Parses HTML content and extracts the page facts
///
/// # Link Enumeration Rules
///
/// Every `<a>` element with a non-empty `href` is enumerated. Relative
/// references are made absolute against `base_url` (the document's own URL);
/// hrefs that fail to resolve are skipped. Each resolved link is classified
/// internal when its host matches the base URL's host, external otherwise,
/// and the per-class counts track the classification.
///
/// # Arguments
///
/// * `html` - The raw HTML content
/// * `base_url` - The document's own URL, used for resolution and
///   classification
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let html_version = MarkupVersion::detect(html);
    let login_form = detect_login_form(&document);

    let links = extract_links(&document, base_url);
    let internal_links = links
        .iter()
        .filter(|l| l.scope == LinkScope::Internal)
        .count() as u32;
    let external_links = links.len() as u32 - internal_links;

    ParsedPage {
        title,
        html_version,
        login_form,
        links,
        internal_links,
        external_links,
    }
}

/// Extracts the first title element's trimmed text, or empty string
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Detects a login form: any form containing a password-type input
fn detect_login_form(document: &Html) -> bool {
    let (Ok(form_selector), Ok(password_selector)) = (
        Selector::parse("form"),
        Selector::parse(r#"input[type="password"]"#),
    ) else {
        return false;
    };

    document
        .select(&form_selector)
        .any(|form| form.select(&password_selector).next().is_some())
}

/// Enumerates hyperlinks with a non-empty href, resolved and classified
fn extract_links(document: &Html, base_url: &Url) -> Vec<ResolvedLink> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_link(href, base_url) {
            Some(url) => {
                let scope = classify_link(&url, base_url);
                links.push(ResolvedLink { url, scope });
            }
            None => {
                if !href.trim().is_empty() {
                    tracing::debug!("Skipping unresolvable href '{}'", href);
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, "Test Page");
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, "Test Page");
    }

    #[test]
    fn test_missing_title_is_empty_string() {
        let html = r#"<html><head></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, "");
    }

    #[test]
    fn test_first_title_wins() {
        let html =
            r#"<html><head><title>First</title><title>Second</title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, "First");
    }

    #[test]
    fn test_login_form_detected() {
        let html = r#"
            <html><body>
            <form action="/login">
                <input type="text" name="user" />
                <input type="password" name="pass" />
            </form>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.login_form);
    }

    #[test]
    fn test_form_without_password_not_login() {
        let html = r#"
            <html><body>
            <form action="/search">
                <input type="text" name="q" />
            </form>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert!(!parsed.login_form);
    }

    #[test]
    fn test_password_input_outside_form_not_login() {
        let html = r#"<html><body><input type="password" name="pass" /></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert!(!parsed.login_form);
    }

    #[test]
    fn test_no_form_no_login() {
        let html = r#"<html><body><p>Nothing here</p></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert!(!parsed.login_form);
    }

    #[test]
    fn test_internal_and_external_counts() {
        let html = r#"
            <html><body>
                <a href="/about">About</a>
                <a href="contact">Contact</a>
                <a href="https://example.com/deep/path">Deep</a>
                <a href="https://other.com/">Other</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.internal_links, 3);
        assert_eq!(parsed.external_links, 1);
        assert_eq!(parsed.links.len(), 4);
    }

    #[test]
    fn test_counts_cover_all_nonempty_hrefs() {
        let html = r#"
            <html><body>
                <a href="/one">One</a>
                <a href="">Empty</a>
                <a>No href</a>
                <a href="https://two.example/">Two</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.internal_links + parsed.external_links, 2);
    }

    #[test]
    fn test_relative_link_resolved_against_page_url() {
        let html = r#"<html><body><a href="sibling">Sibling</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.links[0].url.as_str(), "https://example.com/sibling");
        assert_eq!(parsed.links[0].scope, LinkScope::Internal);
    }

    #[test]
    fn test_hostless_link_counts_as_external() {
        let html = r#"<html><body><a href="mailto:hi@example.com">Mail</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.external_links, 1);
        assert_eq!(parsed.internal_links, 0);
    }

    #[test]
    fn test_markup_version_from_document() {
        let html = "<!DOCTYPE html><html><head><title>T</title></head><body></body></html>";
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.html_version, MarkupVersion::Html5);
    }
}
