//! Article content extraction
//!
//! Given the HTML of a fetched page, pulls out the candidate title, author
//! list, publish dates, body text, and metadata tags. Every field is
//! independently optional here; deciding whether the page amounts to a
//! publishable article is the assembler's job.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{ElementRef, Html, Selector};

/// Content extracted from a single HTML document
#[derive(Debug, Clone, Default)]
pub struct ExtractedContent {
    /// Candidate title, best source first: og:title, <title>, first <h1>
    pub title: Option<String>,

    /// Author names, deduplicated, in document order
    pub authors: Vec<String>,

    /// Raw `article:published_time` metadata value, when present. More
    /// specific than the heuristic date and preferred over it downstream.
    pub published_time_meta: Option<String>,

    /// Heuristic publish date from `time[datetime]` or `meta[name=date]`
    pub publish_date: Option<DateTime<Utc>>,

    /// Paragraph text, blank-line separated
    pub body_text: String,

    pub meta_description: Option<String>,
    pub meta_keywords: Vec<String>,

    /// `article:tag` metadata values
    pub tags: Vec<String>,

    /// Every `a[href]` and `link[href]` value, for sub-link resolution
    pub hrefs: Vec<String>,
}

/// Extracts article content from an HTML document
pub fn extract_article(html: &str) -> ExtractedContent {
    let document = Html::parse_document(html);

    ExtractedContent {
        title: extract_title(&document),
        authors: extract_authors(&document),
        published_time_meta: meta_content(&document, "meta[property='article:published_time']"),
        publish_date: extract_heuristic_date(&document),
        body_text: extract_body_text(&document),
        meta_description: meta_content(&document, "meta[name='description']"),
        meta_keywords: meta_content(&document, "meta[name='keywords']")
            .map(|raw| split_list(&raw))
            .unwrap_or_default(),
        tags: meta_contents(&document, "meta[property='article:tag']"),
        hrefs: extract_hrefs(&document),
    }
}

/// Extracts the page title, preferring og:title over <title> over <h1>
fn extract_title(document: &Html) -> Option<String> {
    if let Some(title) = meta_content(document, "meta[property='og:title']") {
        return Some(title);
    }

    for selector in ["title", "h1"] {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(text) = document.select(&sel).next().map(element_text) {
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }

    None
}

/// Collects author names from metadata and byline elements
fn extract_authors(document: &Html) -> Vec<String> {
    let mut authors = Vec::new();

    if let Some(raw) = meta_content(document, "meta[name='author']") {
        authors.extend(split_list(&raw));
    }

    for raw in meta_contents(document, "meta[property='article:author']") {
        authors.push(raw);
    }

    if let Ok(sel) = Selector::parse("a[rel='author'], .byline, .author") {
        for element in document.select(&sel) {
            let text = element_text(element);
            if !text.is_empty() {
                authors.push(text);
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    authors.retain(|a| seen.insert(a.clone()));
    authors
}

/// Finds a heuristic publish date when no explicit metadata timestamp exists
fn extract_heuristic_date(document: &Html) -> Option<DateTime<Utc>> {
    if let Ok(sel) = Selector::parse("time[datetime]") {
        for element in document.select(&sel) {
            if let Some(parsed) = element
                .value()
                .attr("datetime")
                .and_then(parse_datetime)
            {
                return Some(parsed);
            }
        }
    }

    meta_content(document, "meta[name='date']")
        .as_deref()
        .and_then(parse_datetime)
}

/// Joins paragraph text, preferring paragraphs inside <article>
fn extract_body_text(document: &Html) -> String {
    for selector in ["article p", "p"] {
        if let Ok(sel) = Selector::parse(selector) {
            let paragraphs: Vec<String> = document
                .select(&sel)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect();

            if !paragraphs.is_empty() {
                return paragraphs.join("\n\n");
            }
        }
    }

    String::new()
}

/// Collects every href in the document
fn extract_hrefs(document: &Html) -> Vec<String> {
    let mut hrefs = Vec::new();

    if let Ok(sel) = Selector::parse("a[href], link[href]") {
        for element in document.select(&sel) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

/// Parses a timestamp from the formats news pages actually use
///
/// Tries RFC 3339, RFC 2822, then a handful of common date layouts. A
/// bare date resolves to midnight UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// Gets the content attribute of the first element matching a meta selector
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;

    document
        .select(&sel)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Gets the content attributes of all elements matching a meta selector
fn meta_contents(document: &Html, selector: &str) -> Vec<String> {
    let Ok(sel) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&sel)
        .filter_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .collect()
}

/// Splits a comma-separated metadata value, dropping empty entries
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
