//! Article assembly and the emitted record
//!
//! The assembler turns a successful HTTP response into a validated
//! `ArticleRecord`, or rejects it. Rejection is not an error: most fetched
//! pages are not news articles, and the loop just moves on.

use crate::extract::{extract_article, parse_datetime};
use crate::harvest::fetcher::FetchedResponse;
use crate::link::{resolve_all, ResolvedLink};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Title some outlets serve on dead article URLs; treated as no title
pub const PAGE_NOT_FOUND_TITLE: &str = "Page Not Found";

/// Tag metadata attached to an article
#[derive(Debug, Clone, Serialize)]
pub struct Tags {
    pub tags: Vec<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Vec<String>,
}

impl Tags {
    /// Builds a tag set, dropping empty entries
    pub fn new(
        tags: Vec<String>,
        meta_description: Option<String>,
        meta_keywords: Vec<String>,
    ) -> Self {
        Self {
            tags: tags.into_iter().filter(|t| !t.is_empty()).collect(),
            meta_description: meta_description.filter(|d| !d.is_empty()),
            meta_keywords: meta_keywords.into_iter().filter(|k| !k.is_empty()).collect(),
        }
    }
}

/// A validated news article, immutable once built
///
/// Only constructed when title, authors, publish timestamp, and body text
/// are all present and non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    /// Final URL of the page the article was extracted from
    pub source_url: String,

    pub title: String,
    pub authors: Vec<String>,
    pub publish_timestamp: DateTime<Utc>,
    pub body_text: String,
    pub tags: Tags,

    /// Resolved links found inside the article document. Informational;
    /// never re-dispatched for fetching.
    pub outbound_links: Vec<ResolvedLink>,
}

/// Builds article records from fetched responses
#[derive(Debug, Default)]
pub struct ArticleAssembler;

impl ArticleAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Assembles a record, or rejects the response
    ///
    /// Checks, in order, each a rejection if unmet: the response must be
    /// HTML; the title must exist and not be the not-found sentinel; the
    /// author list must be non-empty; a publish timestamp must resolve,
    /// preferring the page's `article:published_time` metadata over the
    /// heuristic date; the body text must be non-empty.
    pub fn assemble(&self, response: &FetchedResponse) -> Option<ArticleRecord> {
        if !response.content_type.starts_with("text/html") {
            return None;
        }

        let content = extract_article(&response.body);

        let title = match content.title {
            Some(title) if title != PAGE_NOT_FOUND_TITLE => title,
            _ => return None,
        };

        if content.authors.is_empty() {
            return None;
        }

        let publish_timestamp = content
            .published_time_meta
            .as_deref()
            .and_then(parse_datetime)
            .or(content.publish_date)?;

        if content.body_text.is_empty() {
            return None;
        }

        let outbound_links = resolve_all(
            content.hrefs.iter().map(String::as_str),
            &response.final_url,
        );

        Some(ArticleRecord {
            source_url: response.final_url.to_string(),
            title,
            authors: content.authors,
            publish_timestamp,
            body_text: content.body_text,
            tags: Tags::new(content.tags, content.meta_description, content.meta_keywords),
            outbound_links,
        })
    }
}
