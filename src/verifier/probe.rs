//! Single-link reachability probe

use crate::analyzer::{LinkScope, ResolvedLink};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A recorded broken-link observation
///
/// Serializes in the result record's wire shape:
/// `{"url": ..., "statusCode": ..., "type": "internal" | "external"}`.
/// A status code of 0 marks a network-level failure rather than an HTTP
/// error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,

    #[serde(rename = "statusCode")]
    pub status_code: u16,

    #[serde(rename = "type")]
    pub scope: LinkScope,
}

/// Probes one link and reports a finding if it is broken
///
/// The fetch carries its own timeout and is abandoned on expiry. A finding
/// is produced when the fetch fails outright (timeout, DNS failure,
/// connection refused: status code 0) or succeeds with a status >= 400.
/// A response below 400 produces no finding.
pub async fn probe_link(
    client: &Client,
    link: ResolvedLink,
    timeout: Duration,
) -> Option<BrokenLink> {
    match client.get(link.url.clone()).timeout(timeout).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if status >= 400 {
                tracing::debug!("Broken link {} (HTTP {})", link.url, status);
                Some(BrokenLink {
                    url: link.url.to_string(),
                    status_code: status,
                    scope: link.scope,
                })
            } else {
                None
            }
        }
        Err(e) => {
            tracing::debug!("Broken link {} ({})", link.url, e);
            Some(BrokenLink {
                url: link.url.to_string(),
                status_code: 0,
                scope: link.scope,
            })
        }
    }
}
