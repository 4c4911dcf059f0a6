//! HTTP fetcher for the primary page
//!
//! This module builds the shared HTTP client and fetches the page under
//! analysis, classifying the outcome so the pipeline can decide between
//! continuing and failing the job.

use crate::config::FetchConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching the page under analysis
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page body
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network-level failure (timeout, DNS, connection refused) or an
    /// unreadable body
    Network {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by the page fetch and all link probes
///
/// The client follows redirects (reqwest's default policy) and carries the
/// configured User-Agent and timeouts. Link probes tighten the timeout per
/// request; the client-wide timeout applies to the primary fetch.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the page under analysis
///
/// Any non-success status and any network-level failure is terminal for the
/// job; only a readable 2xx body lets analysis proceed.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return FetchOutcome::HttpStatus {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::Network {
                    error: format!("Failed to read body: {}", e),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                e.to_string()
            };
            FetchOutcome::Network { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        build_http_client(&FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let outcome = fetch_page(&test_client(), &url).await;
        match outcome {
            FetchOutcome::Success { status_code, body } => {
                assert_eq!(status_code, 200);
                assert_eq!(body, "<html></html>");
            }
            other => panic!("Expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let outcome = fetch_page(&test_client(), &url).await;
        match outcome {
            FetchOutcome::HttpStatus { status_code } => assert_eq!(status_code, 503),
            other => panic!("Expected HTTP status outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        // Port 1 on loopback is not listening; connection is refused.
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let outcome = fetch_page(&test_client(), &url).await;
        assert!(matches!(outcome, FetchOutcome::Network { .. }));
    }
}
