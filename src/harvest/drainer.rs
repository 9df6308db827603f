//! The consumer side: draining completed fetches into article records
//!
//! Each iteration takes everything currently sitting in the bounded queue
//! without blocking; only when that yields nothing does it perform a
//! single blocking pop, so the loop always makes progress and never
//! busy-spins. The collected batch is then resolved in completion order,
//! which means a late-submitted fetch can be yielded before an
//! earlier-submitted one that is still pending. The non-FIFO yield order
//! is accepted behavior.

use crate::harvest::article::{ArticleAssembler, ArticleRecord};
use crate::harvest::dispatcher::QueueItem;
use crate::harvest::fetcher::{FetchOutcome, InFlightFetch};
use crate::link::{extract_host, is_platform_host};
use crate::{Result, TidingsError};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::Receiver;

/// The lazy sequence of article records produced by a walk
///
/// Pull-based: `next` blocks until a record, the terminal error, or the
/// end of the sequence is available. Once a fatal error has been yielded
/// the stream is finished. Dropping the stream stops the walk, but fetches
/// already submitted run to completion unobserved; there is no
/// cancellation.
pub struct ArticleStream {
    queue: Receiver<QueueItem>,
    in_flight: FuturesUnordered<InFlightFetch>,
    assembler: ArticleAssembler,
    platform_domain: String,
    fault: Option<TidingsError>,
    finished: bool,
}

impl ArticleStream {
    pub(crate) fn new(
        queue: Receiver<QueueItem>,
        assembler: ArticleAssembler,
        platform_domain: String,
    ) -> Self {
        Self {
            queue,
            in_flight: FuturesUnordered::new(),
            assembler,
            platform_domain,
            fault: None,
            finished: false,
        }
    }

    /// Returns the next article record
    ///
    /// `None` means the sequence is over: the walk ended and every
    /// outstanding fetch has been drained. A fatal error is yielded as the
    /// final element, after the records of fetches that were already in
    /// flight.
    pub async fn next(&mut self) -> Option<Result<ArticleRecord>> {
        loop {
            if self.finished {
                return None;
            }

            // Resolve the current batch, first-completed first.
            while let Some(joined) = self.in_flight.next().await {
                let outcome = match joined {
                    Ok(outcome) => outcome,
                    Err(error) => return self.fatal(error.into()),
                };

                match outcome {
                    FetchOutcome::CertificateError { url, detail } => {
                        tracing::debug!("Skipping {} after certificate failure: {}", url, detail);
                    }

                    FetchOutcome::TransportError { url, source } => {
                        return self.fatal(TidingsError::LinkFetch { url, source });
                    }

                    FetchOutcome::Response(response) => {
                        // Only keep links that led away from the platform.
                        let final_host = extract_host(&response.final_url).unwrap_or_default();
                        if is_platform_host(&final_host, &self.platform_domain) {
                            tracing::debug!(
                                "Discarding self-redirect to {}",
                                response.final_url
                            );
                            continue;
                        }

                        match self.assembler.assemble(&response) {
                            Some(record) => return Some(Ok(record)),
                            None => tracing::debug!(
                                "Rejected non-article response from {}",
                                response.final_url
                            ),
                        }
                    }
                }
            }

            if !self.refill().await {
                self.finished = true;
                return self.fault.take().map(Err);
            }
        }
    }

    /// Collects the next batch of in-flight handles from the queue
    ///
    /// Drains everything currently available without blocking; if that
    /// yields nothing and the queue is still open, performs exactly one
    /// blocking pop. Returns false when nothing is left to wait for.
    async fn refill(&mut self) -> bool {
        let mut closed = false;

        loop {
            match self.queue.try_recv() {
                Ok(item) => self.accept(item),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    closed = true;
                    break;
                }
            }
        }

        if self.in_flight.is_empty() && !closed {
            match self.queue.recv().await {
                Some(item) => self.accept(item),
                None => closed = true,
            }
        }

        !self.in_flight.is_empty()
    }

    fn accept(&mut self, item: QueueItem) {
        match item {
            QueueItem::Fetch(handle) => self.in_flight.push(handle),
            QueueItem::Fault(error) => self.fault = Some(error),
        }
    }

    fn fatal(&mut self, error: TidingsError) -> Option<Result<ArticleRecord>> {
        self.finished = true;
        Some(Err(error))
    }
}
