//! Tidings: a social-feed news harvester
//!
//! This crate walks a social platform's paginated search feed, fetches the
//! outbound links found on each results page with a bounded amount of
//! in-flight work, and emits structured article records for pages that look
//! like genuine news content.

pub mod config;
pub mod extract;
pub mod harvest;
pub mod link;

use thiserror::Error;

/// Main error type for Tidings operations
#[derive(Debug, Error)]
pub enum TidingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch results page {url}: {source}")]
    PageFetch { url: String, source: reqwest::Error },

    #[error("No next-page locator on results page {url}")]
    MissingNextPage { url: String },

    #[error("Malformed next-page locator: {locator}")]
    InvalidLocator { locator: String },

    #[error("Link fetch failed for {url}: {source}")]
    LinkFetch { url: String, source: reqwest::Error },

    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors from constructing resolved links
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("URL component must not be empty: {0}")]
    EmptyComponent(&'static str),

    #[error("Resolved path must start with '/': {0}")]
    RelativePath(String),
}

/// Result type alias for Tidings operations
pub type Result<T> = std::result::Result<T, TidingsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{harvest, ArticleRecord, ArticleStream};
pub use link::{is_platform_host, resolve, CandidateLink, ResolvedLink};
