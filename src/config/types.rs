use serde::Deserialize;

/// Main configuration structure for Tidings
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    pub platform: PlatformConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Search query configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Keywords combined disjunctively into the initial query
    pub keywords: Vec<String>,
}

/// Platform configuration: where the search feed lives and which domain
/// counts as the platform's own when filtering self-redirects
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the platform's plaintext search frontend
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// The platform's own domain (final URLs under it are discarded)
    pub domain: String,
}

/// Fetch pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Capacity of the bounded queue of in-flight fetches
    #[serde(rename = "queue-capacity", default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Ceiling on concurrently executing link fetches
    #[serde(rename = "fetch-workers", default = "default_fetch_workers")]
    pub fetch_workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            fetch_workers: default_fetch_workers(),
        }
    }
}

fn default_queue_capacity() -> usize {
    50
}

fn default_fetch_workers() -> usize {
    10
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the harvester
    pub name: String,

    /// Version of the harvester
    pub version: String,

    /// URL with information about the harvester
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for harvester-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.name, self.version, self.contact_url, self.contact_email
        )
    }
}
