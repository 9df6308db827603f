//! Harvest pipeline: pagination, dispatch, drain, assembly
//!
//! This module contains the harvesting core, including:
//! - Sequential pagination over the platform's search feed
//! - Concurrent link fetching behind a bounded queue
//! - Draining completed fetches in completion order
//! - Assembly of validated article records

mod article;
mod dispatcher;
mod drainer;
mod fetcher;
mod pager;

pub use article::{ArticleAssembler, ArticleRecord, Tags, PAGE_NOT_FOUND_TITLE};
pub use dispatcher::QueueItem;
pub use drainer::ArticleStream;
pub use fetcher::{build_http_client, FetchOutcome, FetchedResponse, InFlightFetch, LinkFetcher};
pub use pager::{PageWalker, SearchCursor, SearchQuery, SEARCH_PATH_PREFIX};

use crate::config::Config;
use crate::Result;
use tokio::sync::mpsc;
use url::Url;

/// Starts a walk and returns its article stream
///
/// Builds the shared HTTP client, spawns the producer task (pagination
/// walker plus fetch dispatcher), and hands the consumer end of the
/// bounded queue to the returned stream. The client lives as long as the
/// walk; its connection pool is shared by the results-page fetches and all
/// link fetches.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
///
/// ```no_run
/// use tidings::config::load_config;
/// use std::path::Path;
///
/// # async fn example() -> tidings::Result<()> {
/// let config = load_config(Path::new("config.toml"))?;
/// let mut stream = tidings::harvest(config)?;
///
/// while let Some(article) = stream.next().await {
///     println!("{}", article?.title);
/// }
/// # Ok(())
/// # }
/// ```
pub fn harvest(config: Config) -> Result<ArticleStream> {
    let client = build_http_client(&config.user_agent)?;

    let base = Url::parse(&config.platform.base_url)?;
    let query = SearchQuery::new(config.search.keywords.clone());
    let walker = PageWalker::new(client.clone(), base, &query)?;
    let fetcher = LinkFetcher::new(client, config.fetch.fetch_workers);

    let (queue_tx, queue_rx) = mpsc::channel(config.fetch.queue_capacity);
    dispatcher::spawn(walker, fetcher, queue_tx);

    Ok(ArticleStream::new(
        queue_rx,
        ArticleAssembler::new(),
        config.platform.domain.clone(),
    ))
}
