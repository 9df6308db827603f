//! The producer side of the harvest pipeline
//!
//! One task walks the feed and keeps the bounded queue of in-flight
//! fetches fed. Pushing into a full queue suspends this task, which is the
//! walk's only backpressure mechanism: the walker cannot race ahead while
//! the consumer is behind.

use crate::harvest::fetcher::{InFlightFetch, LinkFetcher};
use crate::harvest::pager::PageWalker;
use crate::TidingsError;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// What travels through the bounded queue
#[derive(Debug)]
pub enum QueueItem {
    /// A link fetch already underway
    Fetch(InFlightFetch),

    /// A fatal walker error; always the final item before the queue closes
    Fault(TidingsError),
}

/// Spawns the producer task
pub fn spawn(walker: PageWalker, fetcher: LinkFetcher, queue: Sender<QueueItem>) -> JoinHandle<()> {
    tokio::spawn(run(walker, fetcher, queue))
}

/// Walks the feed, dispatching a fetch per discovered link
///
/// Every external link on every page is submitted and enqueued exactly
/// once, in the order it appeared in the document. Page N+1 is not
/// discovered until page N's links have all been enqueued. A fatal walker
/// error is forwarded to the consumer as a terminal `Fault`, after which
/// the queue closes.
pub async fn run(mut walker: PageWalker, fetcher: LinkFetcher, queue: Sender<QueueItem>) {
    loop {
        let page = match walker.next_page().await {
            Ok(page) => page,
            Err(error) => {
                tracing::debug!("Walk ended: {}", error);
                let _ = queue.send(QueueItem::Fault(error)).await;
                return;
            }
        };

        for link in page.outbound_links {
            let handle = fetcher.dispatch(link);

            if queue.send(QueueItem::Fetch(handle)).await.is_err() {
                tracing::debug!("Consumer dropped the queue, stopping the walk");
                return;
            }
        }
    }
}
