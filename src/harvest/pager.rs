//! Pagination over the platform's search feed
//!
//! The walk is lazy, strictly sequential, and non-restartable: one cursor
//! identifies the next results page, fetching page N+1 never begins before
//! page N's extraction completes, and any results-page failure is fatal.
//! The feed itself has no natural end; the caller stops consuming.

use crate::extract::{extract_results_page, ResultsPage};
use crate::TidingsError;
use reqwest::Client;
use url::Url;

/// Prefix every next-page locator must carry
pub const SEARCH_PATH_PREFIX: &str = "/search?q=";

/// The initial search query, built from configured keywords
#[derive(Debug, Clone)]
pub struct SearchQuery {
    keywords: Vec<String>,
}

impl SearchQuery {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Renders the query as the relative locator of the first results page
    ///
    /// Keywords are combined disjunctively: `/search?q=(a OR b OR c)`.
    pub fn initial_path(&self) -> String {
        format!("{}({})", SEARCH_PATH_PREFIX, self.keywords.join(" OR "))
    }
}

/// Identifies the next results page to fetch
///
/// Immutable; replaced wholesale on every successful page fetch and never
/// persisted.
#[derive(Debug, Clone)]
pub struct SearchCursor {
    url: Url,
}

impl SearchCursor {
    /// Builds a cursor from a relative locator found on a results page
    ///
    /// A locator that does not start with `/search?q=` indicates an
    /// upstream format change and is fatal.
    pub fn from_relative_path(base: &Url, path: &str) -> Result<Self, TidingsError> {
        if !path.starts_with(SEARCH_PATH_PREFIX) {
            return Err(TidingsError::InvalidLocator {
                locator: path.to_string(),
            });
        }

        let url = base.join(path)?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Walks the results feed one cursor at a time
pub struct PageWalker {
    client: Client,
    base: Url,
    cursor: SearchCursor,
}

impl PageWalker {
    /// Creates a walker positioned at the query's first results page
    pub fn new(client: Client, base: Url, query: &SearchQuery) -> Result<Self, TidingsError> {
        let cursor = SearchCursor::from_relative_path(&base, &query.initial_path())?;

        Ok(Self {
            client,
            base,
            cursor,
        })
    }

    /// Fetches the current results page and advances the cursor
    ///
    /// The next-page locator is extracted before the page's links are
    /// surfaced, so a page without one terminates the walk with nothing
    /// dispatched from it. Every failure here propagates to the caller and
    /// ends the sequence.
    pub async fn next_page(&mut self) -> Result<ResultsPage, TidingsError> {
        let page_url = self.cursor.url().clone();
        tracing::debug!("Fetching results page: {}", page_url);

        let response = self
            .client
            .get(page_url.clone())
            .send()
            .await
            .map_err(|source| TidingsError::PageFetch {
                url: page_url.to_string(),
                source,
            })?;

        let body = response
            .text()
            .await
            .map_err(|source| TidingsError::PageFetch {
                url: page_url.to_string(),
                source,
            })?;

        let page = extract_results_page(&body, &page_url)?;

        self.cursor = SearchCursor::from_relative_path(&self.base, &page.next_page_path)?;

        tracing::debug!(
            "Results page {} carried {} external links",
            page_url,
            page.outbound_links.len()
        );

        Ok(page)
    }
}
