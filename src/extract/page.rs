//! Search-results page scraping
//!
//! A results page carries two things the walk needs: the locator of the
//! next results page (the href inside the "show more" button) and the raw
//! outbound links found in the result entries. Internal `/`-prefixed hrefs
//! are filtered out here, so downstream dispatch only ever sees external
//! links.

use crate::TidingsError;
use scraper::{Html, Selector};
use url::Url;

/// What a results page contributes to the walk
#[derive(Debug, Clone)]
pub struct ResultsPage {
    /// Relative locator of the next results page
    pub next_page_path: String,

    /// External links found in the page's result entries
    pub outbound_links: Vec<Url>,
}

/// Extracts the next-page locator and the external outbound links from a
/// fetched results page
///
/// The locator is extracted first; a page without one ends the walk with
/// `MissingNextPage` before any of its links are considered.
pub fn extract_results_page(html: &str, page_url: &Url) -> Result<ResultsPage, TidingsError> {
    let document = Html::parse_document(html);

    let next_page_path = extract_next_page_path(&document).ok_or_else(|| {
        TidingsError::MissingNextPage {
            url: page_url.to_string(),
        }
    })?;

    let outbound_links = extract_outbound_links(&document);

    Ok(ResultsPage {
        next_page_path,
        outbound_links,
    })
}

/// Finds the href inside the "show more" pagination button
fn extract_next_page_path(document: &Html) -> Option<String> {
    let selector = Selector::parse("div.w-button-more a[href]").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(|href| href.to_string())
}

/// Collects the external links from the page's result entries
///
/// Hrefs starting with `/` point back into the platform and are skipped.
/// The rest must parse as absolute http(s) URLs; anything else is excluded
/// with a debug log.
fn extract_outbound_links(document: &Html) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("table.tweet a[href]") {
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            // Only fetch external links
            if href.starts_with('/') {
                continue;
            }

            match Url::parse(href) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                    links.push(url);
                }
                Ok(url) => {
                    tracing::debug!("Skipping non-http(s) result link: {}", url);
                }
                Err(e) => {
                    tracing::debug!("Skipping unparseable result link {}: {}", href, e);
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://mobile.twitter.com/search?q=(news)").unwrap()
    }

    const RESULTS_PAGE: &str = r#"
        <html><body>
        <table class="tweet">
            <td><a href="https://t.co/abc">link text</a></td>
            <td><a href="/someuser/status/1">permalink</a></td>
        </table>
        <table class="tweet">
            <td><a href="https://t.co/def">another</a></td>
        </table>
        <div class="w-button-more">
            <a href="/search?q=(news)&next=2">Load older Tweets</a>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_extracts_next_page_locator() {
        let page = extract_results_page(RESULTS_PAGE, &page_url()).unwrap();
        assert_eq!(page.next_page_path, "/search?q=(news)&next=2");
    }

    #[test]
    fn test_extracts_external_links_only() {
        let page = extract_results_page(RESULTS_PAGE, &page_url()).unwrap();
        let links: Vec<String> = page.outbound_links.iter().map(|u| u.to_string()).collect();
        assert_eq!(links, vec!["https://t.co/abc", "https://t.co/def"]);
    }

    #[test]
    fn test_missing_next_button_is_fatal() {
        let html = r#"<html><body>
            <table class="tweet"><td><a href="https://t.co/abc">x</a></td></table>
        </body></html>"#;

        let result = extract_results_page(html, &page_url());
        assert!(matches!(
            result,
            Err(TidingsError::MissingNextPage { .. })
        ));
    }

    #[test]
    fn test_links_outside_result_entries_ignored() {
        let html = r#"<html><body>
            <a href="https://elsewhere.com/x">nav link</a>
            <div class="w-button-more"><a href="/search?q=(a)&next=2">more</a></div>
        </body></html>"#;

        let page = extract_results_page(html, &page_url()).unwrap();
        assert!(page.outbound_links.is_empty());
    }

    #[test]
    fn test_unparseable_and_non_http_links_skipped() {
        let html = r#"<html><body>
            <table class="tweet">
                <td><a href="https://t.co/ok">good</a></td>
                <td><a href="mailto:tips@example.com">mail</a></td>
                <td><a href="::not a url::">bad</a></td>
            </table>
            <div class="w-button-more"><a href="/search?q=(a)&next=2">more</a></div>
        </body></html>"#;

        let page = extract_results_page(html, &page_url()).unwrap();
        assert_eq!(page.outbound_links.len(), 1);
        assert_eq!(page.outbound_links[0].as_str(), "https://t.co/ok");
    }

    #[test]
    fn test_empty_page_reports_missing_locator() {
        let result = extract_results_page("<html><body></body></html>", &page_url());
        assert!(result.is_err());
    }
}
