//! Bounded concurrent verification pool
//!
//! One probe task is spawned per discovered link, but the number of probes
//! in flight at once is capped by a semaphore so a link-heavy page cannot
//! burst an unbounded number of outbound connections. The JoinSet doubles as
//! the completion barrier: the pool returns only after every spawned probe
//! has finished, so the caller can finalize the job without guessing at
//! probe durations.

use crate::analyzer::ResolvedLink;
use crate::config::VerifierConfig;
use crate::verifier::probe::{probe_link, BrokenLink};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Probes every link concurrently and converges the findings
///
/// Each probe keeps its result local; findings are merged sequentially as
/// the join barrier drains, so no shared mutable collection exists while
/// probes are in flight. Findings arrive in completion order, which is
/// deliberately unspecified.
pub async fn verify_links(
    client: &Client,
    links: Vec<ResolvedLink>,
    config: &VerifierConfig,
) -> Vec<BrokenLink> {
    let timeout = Duration::from_secs(config.probe_timeout_secs);
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_probes));
    let mut probes = JoinSet::new();

    let total = links.len();
    for link in links {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        probes.spawn(async move {
            // The semaphore is never closed, so acquisition only fails if
            // the pool itself is gone.
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("verification semaphore closed");
            probe_link(&client, link, timeout).await
        });
    }

    let mut findings = Vec::new();
    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok(Some(finding)) => findings.push(finding),
            Ok(None) => {}
            Err(e) => tracing::warn!("Link probe task failed: {}", e),
        }
    }

    tracing::debug!(
        "Verified {} links, {} broken",
        total,
        findings.len()
    );
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::LinkScope;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn link(url: &str, scope: LinkScope) -> ResolvedLink {
        ResolvedLink {
            url: Url::parse(url).unwrap(),
            scope,
        }
    }

    fn pool_config(max: usize) -> VerifierConfig {
        VerifierConfig {
            probe_timeout_secs: 5,
            max_concurrent_probes: max,
        }
    }

    #[tokio::test]
    async fn test_empty_link_list() {
        let findings = verify_links(&Client::new(), Vec::new(), &pool_config(4)).await;
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn test_mixed_links_converge_to_findings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let links = vec![
            link(&format!("{}/ok", server.uri()), LinkScope::Internal),
            link(&format!("{}/missing", server.uri()), LinkScope::Internal),
            link(&format!("{}/broken", server.uri()), LinkScope::External),
        ];

        let findings = verify_links(&Client::new(), links, &pool_config(4)).await;
        assert_eq!(findings.len(), 2);

        let codes: Vec<u16> = findings.iter().map(|f| f.status_code).collect();
        assert!(codes.contains(&404));
        assert!(codes.contains(&500));
    }

    #[tokio::test]
    async fn test_all_probes_complete_with_small_pool() {
        // More links than permits: every probe must still run to completion
        // before the pool returns.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let links: Vec<ResolvedLink> = (0..10)
            .map(|i| link(&format!("{}/page{}", server.uri(), i), LinkScope::Internal))
            .collect();

        let findings = verify_links(&Client::new(), links, &pool_config(2)).await;
        assert_eq!(findings.len(), 10);
    }

    #[tokio::test]
    async fn test_network_failure_yields_zero_status() {
        let links = vec![link("http://127.0.0.1:1/", LinkScope::External)];
        let findings = verify_links(&Client::new(), links, &pool_config(4)).await;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].status_code, 0);
    }
}
