//! HTML extraction for results pages and article pages
//!
//! Two extractors live here: one scrapes a search-results page for its
//! next-page locator and outbound links, the other pulls article content
//! (title, authors, dates, body, tags) out of a fetched page.

mod article;
mod page;

pub use article::{extract_article, parse_datetime, ExtractedContent};
pub use page::{extract_results_page, ResultsPage};
