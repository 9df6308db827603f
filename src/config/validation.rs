use crate::config::types::{Config, FetchConfig, PlatformConfig, SearchConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_platform_config(&config.platform)?;
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates the search query configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.keywords.is_empty() {
        return Err(ConfigError::Validation(
            "search must list at least one keyword".to_string(),
        ));
    }

    for keyword in &config.keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search keywords cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the platform configuration
fn validate_platform_config(config: &PlatformConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be http or https, got '{}'",
            base.scheme()
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url must have a host".to_string(),
        ));
    }

    if config.domain.is_empty() {
        return Err(ConfigError::Validation(
            "platform domain cannot be empty".to_string(),
        ));
    }

    // The domain is a bare host name, not a URL or a pattern
    if config.domain.contains('/') || config.domain.contains("://") {
        return Err(ConfigError::Validation(format!(
            "platform domain must be a bare host name, got '{}'",
            config.domain
        )));
    }

    Ok(())
}

/// Validates the fetch pipeline configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.queue_capacity < 1 || config.queue_capacity > 1000 {
        return Err(ConfigError::Validation(format!(
            "queue-capacity must be between 1 and 1000, got {}",
            config.queue_capacity
        )));
    }

    if config.fetch_workers < 1 || config.fetch_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "fetch-workers must be between 1 and 100, got {}",
            config.fetch_workers
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Performs basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();

    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid contact-email: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "contact-email domain must contain a dot: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            search: SearchConfig {
                keywords: vec!["coronavirus".to_string(), "covid-19".to_string()],
            },
            platform: PlatformConfig {
                base_url: "https://mobile.twitter.com".to_string(),
                domain: "twitter.com".to_string(),
            },
            fetch: FetchConfig {
                queue_capacity: 50,
                fetch_workers: 10,
            },
            user_agent: UserAgentConfig {
                name: "TestHarvester".to_string(),
                version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let mut config = valid_config();
        config.search.keywords.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let mut config = valid_config();
        config.search.keywords.push("   ".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = valid_config();
        config.platform.base_url = "ftp://example.com".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unparseable_base_url_rejected() {
        let mut config = valid_config();
        config.platform.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_platform_domain_rejected() {
        let mut config = valid_config();
        config.platform.domain = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_url_as_platform_domain_rejected() {
        let mut config = valid_config();
        config.platform.domain = "https://twitter.com".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let mut config = valid_config();
        config.fetch.queue_capacity = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_fetch_workers_rejected() {
        let mut config = valid_config();
        config.fetch.fetch_workers = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_user_agent_name_rejected() {
        let mut config = valid_config();
        config.user_agent.name = "bad name!".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut config = valid_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_email_without_dot_rejected() {
        assert!(validate_email("user@host").is_err());
        assert!(validate_email("user@host.com").is_ok());
    }
}
