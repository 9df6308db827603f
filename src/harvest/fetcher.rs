//! HTTP fetching for the harvest pipeline
//!
//! One shared `reqwest::Client` serves both the sequential results-page
//! fetches and the concurrent link fetches. Link fetches are spawned as
//! independent tasks gated by a semaphore, so network I/O starts at
//! submission time and the worker ceiling bounds how many requests execute
//! at once.

use crate::config::UserAgentConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use url::Url;

/// A handle to a link fetch that is already underway
pub type InFlightFetch = JoinHandle<FetchOutcome>;

/// How a link fetch ended
#[derive(Debug)]
pub enum FetchOutcome {
    /// The fetch produced a response (any status)
    Response(FetchedResponse),

    /// The transport failed while validating the peer's certificate.
    /// Always discarded silently downstream, never reported.
    CertificateError { url: String, detail: String },

    /// Any other transport failure
    TransportError { url: String, source: reqwest::Error },
}

/// A fully read HTTP response
#[derive(Debug)]
pub struct FetchedResponse {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value, empty when absent
    pub content_type: String,

    /// Response body
    pub body: String,
}

/// Builds the HTTP client shared across the walk
///
/// Redirects are followed (the drainer filters on final URLs), responses
/// are decompressed, and the User-Agent identifies the harvester.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues link fetches as independent in-flight tasks
pub struct LinkFetcher {
    client: Client,
    workers: Arc<Semaphore>,
}

impl LinkFetcher {
    /// Creates a fetcher with a fixed worker ceiling
    pub fn new(client: Client, worker_count: usize) -> Self {
        Self {
            client,
            workers: Arc::new(Semaphore::new(worker_count)),
        }
    }

    /// Submits a fetch and returns its in-flight handle
    ///
    /// The request starts as soon as a worker permit is available,
    /// regardless of when the handle is consumed.
    pub fn dispatch(&self, url: Url) -> InFlightFetch {
        let client = self.client.clone();
        let workers = Arc::clone(&self.workers);

        tokio::spawn(async move {
            // The semaphore is never closed, so acquisition cannot fail.
            let _permit = workers.acquire_owned().await.ok();
            fetch(&client, url).await
        })
    }
}

/// Performs a single GET and classifies the outcome
async fn fetch(client: &Client, url: Url) -> FetchOutcome {
    let request_url = url.to_string();
    tracing::debug!("Fetching link: {}", request_url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(error) => return classify_failure(request_url, error),
    };

    let status = response.status().as_u16();
    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => FetchOutcome::Response(FetchedResponse {
            final_url,
            status,
            content_type,
            body,
        }),
        Err(error) => classify_failure(request_url, error),
    }
}

/// Separates certificate failures from every other transport failure
fn classify_failure(url: String, error: reqwest::Error) -> FetchOutcome {
    if is_certificate_error(&error) {
        FetchOutcome::CertificateError {
            url,
            detail: error.to_string(),
        }
    } else {
        FetchOutcome::TransportError { url, source: error }
    }
}

/// Checks the error source chain for a certificate validation failure
///
/// reqwest has no direct predicate for this, so the chain's messages are
/// inspected the way the TLS stack reports them.
fn is_certificate_error(error: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);

    while let Some(current) = source {
        let message = current.to_string().to_lowercase();
        if message.contains("certificate") {
            return true;
        }
        source = current.source();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            name: "TestHarvester".to_string(),
            version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_header_format() {
        let config = create_test_config();
        assert_eq!(
            config.header_value(),
            "TestHarvester/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[tokio::test]
    async fn test_connection_failure_is_not_certificate_error() {
        // Nothing listens on this port; the failure is a plain transport
        // error and must not be classified as a certificate failure.
        let client = Client::new();
        let error = client
            .get("http://127.0.0.1:1/unreachable")
            .send()
            .await
            .unwrap_err();
        assert!(!is_certificate_error(&error));
    }

    #[tokio::test]
    async fn test_dispatch_reports_transport_error() {
        let config = create_test_config();
        let fetcher = LinkFetcher::new(build_http_client(&config).unwrap(), 2);

        let url = Url::parse("http://127.0.0.1:1/unreachable").unwrap();
        let outcome = fetcher.dispatch(url).await.unwrap();

        assert!(matches!(outcome, FetchOutcome::TransportError { .. }));
    }
}
