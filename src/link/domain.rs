use url::Url;

/// Extracts the lowercased host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use tidings::link::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a host belongs to the platform's own domain
///
/// Matches the domain itself and any subdomain of it, so with a platform
/// domain of `twitter.com` both `twitter.com` and `mobile.twitter.com`
/// match, while `nottwitter.com` does not.
pub fn is_platform_host(host: &str, platform_domain: &str) -> bool {
    let host = host.to_lowercase();
    let domain = platform_domain.to_lowercase();

    host == domain || host.ends_with(&format!(".{}", domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host_lowercases() {
        let url = Url::parse("https://Mobile.Twitter.COM/search").unwrap();
        assert_eq!(extract_host(&url), Some("mobile.twitter.com".to_string()));
    }

    #[test]
    fn test_exact_domain_matches() {
        assert!(is_platform_host("twitter.com", "twitter.com"));
    }

    #[test]
    fn test_subdomain_matches() {
        assert!(is_platform_host("mobile.twitter.com", "twitter.com"));
        assert!(is_platform_host("api.mobile.twitter.com", "twitter.com"));
    }

    #[test]
    fn test_suffix_without_dot_does_not_match() {
        assert!(!is_platform_host("nottwitter.com", "twitter.com"));
    }

    #[test]
    fn test_other_domain_does_not_match() {
        assert!(!is_platform_host("example.com", "twitter.com"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(is_platform_host("Mobile.Twitter.Com", "twitter.com"));
    }
}
