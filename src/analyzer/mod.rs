//! Page analysis module
//!
//! This module contains the analysis half of the pipeline:
//! - HTTP fetching of the page under analysis
//! - HTML parsing: title, markup version, login-form detection
//! - Hyperlink resolution and internal/external classification
//! - Fan-out of link verification and assembly of the final report

mod fetcher;
mod links;
mod markup;
mod parser;

pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use links::{classify_link, resolve_link, LinkScope, ResolvedLink};
pub use markup::MarkupVersion;
pub use parser::{parse_page, ParsedPage};

use crate::config::VerifierConfig;
use crate::verifier::{verify_links, BrokenLink};
use crate::PagelensError;
use reqwest::Client;
use url::Url;

/// The complete result of one page analysis
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// The page title; empty string if the document has none
    pub title: String,

    /// Classified markup version
    pub html_version: MarkupVersion,

    /// Count of links on the page's own host
    pub internal_links: u32,

    /// Count of links pointing elsewhere
    pub external_links: u32,

    /// Broken-link findings accumulated during verification
    pub broken_links: Vec<BrokenLink>,

    /// Whether the page carries a login form
    pub login_form: bool,
}

/// Analyzes the page at `url`
///
/// Parses the URL, fetches the page once, extracts its structural facts, and
/// hands every resolved hyperlink to the verification pool. The call returns
/// only after all probes have completed, so the report's broken-link set is
/// final.
///
/// # Errors
///
/// A malformed URL, a network failure, and a non-success status on the
/// primary fetch are errors; individual link failures are not, they become
/// findings in the report.
pub async fn analyze(
    client: &Client,
    url: &str,
    verifier_config: &VerifierConfig,
) -> Result<AnalysisReport, PagelensError> {
    let base_url = Url::parse(url).map_err(|source| PagelensError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let body = match fetch_page(client, &base_url).await {
        FetchOutcome::Success { status_code, body } => {
            tracing::debug!(
                "Fetched {} (HTTP {}, {} bytes)",
                base_url,
                status_code,
                body.len()
            );
            body
        }
        FetchOutcome::HttpStatus { status_code } => {
            return Err(PagelensError::HttpStatus {
                url: base_url.to_string(),
                status: status_code,
            });
        }
        FetchOutcome::Network { error } => {
            return Err(PagelensError::Fetch {
                url: base_url.to_string(),
                message: error,
            });
        }
    };

    let parsed = parse_page(&body, &base_url);
    tracing::info!(
        "Analyzed {}: {} internal, {} external links",
        base_url,
        parsed.internal_links,
        parsed.external_links
    );

    let broken_links = verify_links(client, parsed.links, verifier_config).await;

    Ok(AnalysisReport {
        title: parsed.title,
        html_version: parsed.html_version,
        internal_links: parsed.internal_links,
        external_links: parsed.external_links,
        broken_links,
        login_form: parsed.login_form,
    })
}
