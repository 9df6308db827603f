//! Link resolution against a containing page
//!
//! Raw hrefs found inside a fetched document may be absolute,
//! scheme-relative, root-relative, directory-relative, or fragment-only.
//! This module splits a raw href into `(scheme, host, path)` components and
//! resolves them against the URL of the page that contained the link,
//! producing an absolute http(s) link or rejecting the candidate.
//!
//! Relative paths are joined textually against the directory of the base
//! path; `..` segments are NOT collapsed. This is a known limitation, kept
//! deliberately: the join mirrors conventional relative-URL handling, not
//! full RFC 3986 dot-segment normalization.

use crate::LinkError;
use serde::Serialize;
use url::Url;

/// The components of a raw href, before resolution
///
/// Query and fragment are dropped during parsing; only scheme, host, and
/// path take part in resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    scheme: Option<String>,
    host: Option<String>,
    path: Option<String>,
}

impl CandidateLink {
    /// Parses a raw href into its components
    ///
    /// Returns `None` when scheme, host, and path are all empty, which is
    /// what a same-page fragment link such as `#section` parses to.
    pub fn parse(raw: &str) -> Option<Self> {
        let (scheme, host, path) = split_components(raw);

        if scheme.is_none() && host.is_none() && path.is_none() {
            return None;
        }

        Some(Self { scheme, host, path })
    }

    /// Resolves this candidate against the URL of the containing page
    ///
    /// Resolution rules:
    /// - A missing scheme is inherited from the base, except that a link
    ///   which supplied a host without a scheme (protocol-relative,
    ///   `//host/x`) defaults to `https`.
    /// - Anything that does not resolve to `http` or `https` is rejected
    ///   (`mailto:`, `javascript:`, and friends).
    /// - A supplied host is authoritative; its path defaults to `/`.
    /// - Without a host, the base's host is inherited. No path means the
    ///   link points back at the containing document and is rejected. A
    ///   `/`-prefixed path is taken verbatim; anything else is joined
    ///   against the directory of the base path.
    pub fn resolve_from(&self, base: &Url) -> Option<ResolvedLink> {
        let scheme = match &self.scheme {
            Some(scheme) => scheme.clone(),
            None if self.host.is_some() => "https".to_string(),
            None => base.scheme().to_string(),
        };

        if scheme != "http" && scheme != "https" {
            return None;
        }

        let (host, path) = match &self.host {
            Some(host) => {
                let path = self.path.clone().unwrap_or_else(|| "/".to_string());
                (host.clone(), path)
            }
            None => {
                let host = base.host_str()?.to_string();

                // No host and no path: a fragment link back to the page
                let raw_path = self.path.as_deref()?;

                let path = if raw_path.starts_with('/') {
                    raw_path.to_string()
                } else {
                    join_directory(base.path(), raw_path)
                };

                (host, path)
            }
        };

        ResolvedLink::new(scheme, host, path).ok()
    }
}

/// An absolute http(s) link in `{scheme, host, path}` form
///
/// All three fields are non-empty and the path starts with `/`; the
/// constructor enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedLink {
    scheme: String,
    host: String,
    path: String,
}

impl ResolvedLink {
    /// Constructs a resolved link, validating its invariants
    pub fn new(scheme: String, host: String, path: String) -> Result<Self, LinkError> {
        if scheme.is_empty() {
            return Err(LinkError::EmptyComponent("scheme"));
        }
        if host.is_empty() {
            return Err(LinkError::EmptyComponent("host"));
        }
        if path.is_empty() {
            return Err(LinkError::EmptyComponent("path"));
        }
        if !path.starts_with('/') {
            return Err(LinkError::RelativePath(path));
        }

        Ok(Self { scheme, host, path })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Renders the link back into URL form
    pub fn to_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.path)
    }
}

/// Resolves a raw href against the URL of the page that contained it
///
/// Returns `None` for fragment-only links, non-http(s) schemes, and links
/// that resolve back to the containing document.
pub fn resolve(raw: &str, base: &Url) -> Option<ResolvedLink> {
    CandidateLink::parse(raw)?.resolve_from(base)
}

/// Resolves every href in `hrefs` against `base`, dropping rejects and
/// duplicates while preserving first-seen order
pub fn resolve_all<'a, I>(hrefs: I, base: &Url) -> Vec<ResolvedLink>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        if let Some(link) = resolve(href, base) {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }

    links
}

/// Splits a raw href into `(scheme, host, path)`, dropping query and
/// fragment
fn split_components(raw: &str) -> (Option<String>, Option<String>, Option<String>) {
    let raw = raw.split('#').next().unwrap_or("");
    let raw = raw.split('?').next().unwrap_or("");

    // Protocol-relative: //host/path
    if let Some(rest) = raw.strip_prefix("//") {
        let (host, path) = split_authority(rest);
        return (None, host, path);
    }

    if let Some((candidate, rest)) = raw.split_once(':') {
        if is_scheme(candidate) {
            let scheme = Some(candidate.to_ascii_lowercase());

            if let Some(rest) = rest.strip_prefix("//") {
                let (host, path) = split_authority(rest);
                return (scheme, host, path);
            }

            // Scheme without authority, e.g. mailto:someone@example.com;
            // the remainder is an opaque path
            return (scheme, None, non_empty(rest));
        }
    }

    (None, None, non_empty(raw))
}

/// Splits the part after `//` into host and path
fn split_authority(rest: &str) -> (Option<String>, Option<String>) {
    match rest.find('/') {
        Some(idx) => (non_empty(&rest[..idx]), non_empty(&rest[idx..])),
        None => (non_empty(rest), None),
    }
}

/// Checks whether a string is a plausible URL scheme
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Joins a relative path against the directory of the base path
///
/// The last segment of the base path is dropped and the relative path is
/// appended textually. `..` segments survive the join uncollapsed.
fn join_directory(base_path: &str, relative: &str) -> String {
    let trimmed = base_path.trim_start_matches('/');
    let dir = match trimmed.rfind('/') {
        Some(idx) => &trimmed[..idx],
        None => "",
    };

    if dir.is_empty() {
        format!("/{}", relative)
    } else {
        format!("/{}/{}", dir, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn parts(link: &ResolvedLink) -> (&str, &str, &str) {
        (link.scheme(), link.host(), link.path())
    }

    #[test]
    fn test_absolute_link_passes_through() {
        let link = resolve("https://other.com/story/1", &base("https://h/p/q")).unwrap();
        assert_eq!(parts(&link), ("https", "other.com", "/story/1"));
    }

    #[test]
    fn test_absolute_http_link_keeps_scheme() {
        let link = resolve("http://other.com/story", &base("https://h/p")).unwrap();
        assert_eq!(link.scheme(), "http");
    }

    #[test]
    fn test_absolute_link_without_path_gets_root() {
        let link = resolve("https://other.com", &base("https://h/p/q")).unwrap();
        assert_eq!(parts(&link), ("https", "other.com", "/"));
    }

    #[test]
    fn test_fragment_only_link_rejected() {
        assert!(resolve("#section", &base("https://h/p/q")).is_none());
        assert!(resolve("#", &base("https://h/")).is_none());
    }

    #[test]
    fn test_empty_href_rejected() {
        assert!(resolve("", &base("https://h/p/q")).is_none());
    }

    #[test]
    fn test_query_only_href_rejected() {
        assert!(resolve("?page=2", &base("https://h/p/q")).is_none());
    }

    #[test]
    fn test_root_relative_link() {
        let link = resolve("/a/b", &base("https://h/p/q")).unwrap();
        assert_eq!(parts(&link), ("https", "h", "/a/b"));
    }

    #[test]
    fn test_bare_path_joins_base_directory() {
        let link = resolve("c", &base("https://h/p/q")).unwrap();
        assert_eq!(parts(&link), ("https", "h", "/p/c"));
    }

    #[test]
    fn test_bare_path_against_root_base() {
        let link = resolve("c", &base("https://h/q")).unwrap();
        assert_eq!(parts(&link), ("https", "h", "/c"));
    }

    #[test]
    fn test_bare_path_against_trailing_slash_base() {
        let link = resolve("c", &base("https://h/p/q/")).unwrap();
        assert_eq!(parts(&link), ("https", "h", "/p/q/c"));
    }

    #[test]
    fn test_dot_dot_segments_not_collapsed() {
        // Documented limitation: the join is textual
        let link = resolve("../x", &base("https://h/p/q")).unwrap();
        assert_eq!(link.path(), "/p/../x");
    }

    #[test]
    fn test_relative_link_inherits_base_scheme() {
        let link = resolve("/a", &base("http://h/p")).unwrap();
        assert_eq!(link.scheme(), "http");
    }

    #[test]
    fn test_protocol_relative_link_defaults_to_https() {
        let link = resolve("//h2/x", &base("http://h/p/q")).unwrap();
        assert_eq!(parts(&link), ("https", "h2", "/x"));
    }

    #[test]
    fn test_protocol_relative_link_without_path() {
        let link = resolve("//h2", &base("https://h/")).unwrap();
        assert_eq!(parts(&link), ("https", "h2", "/"));
    }

    #[test]
    fn test_mailto_rejected() {
        assert!(resolve("mailto:a@b", &base("https://h/p")).is_none());
    }

    #[test]
    fn test_javascript_rejected() {
        assert!(resolve("javascript:void(0)", &base("https://h/p")).is_none());
    }

    #[test]
    fn test_ftp_rejected() {
        assert!(resolve("ftp://files.example.com/x", &base("https://h/p")).is_none());
    }

    #[test]
    fn test_scheme_is_lowercased() {
        let link = resolve("HTTPS://other.com/x", &base("https://h/p")).unwrap();
        assert_eq!(link.scheme(), "https");
    }

    #[test]
    fn test_query_and_fragment_dropped() {
        let link = resolve("https://other.com/x?utm=1#top", &base("https://h/p")).unwrap();
        assert_eq!(link.path(), "/x");
    }

    #[test]
    fn test_relative_path_with_colon_segment() {
        // "a/b:c" is a path, not a scheme
        let link = resolve("a/b:c", &base("https://h/p/q")).unwrap();
        assert_eq!(link.path(), "/p/a/b:c");
    }

    #[test]
    fn test_scheme_only_href_rejected() {
        // "http://" carries neither host nor path
        assert!(resolve("http://", &base("https://h/p")).is_none());
    }

    #[test]
    fn test_to_url_round_trip() {
        let link = resolve("https://other.com/story/1", &base("https://h/")).unwrap();
        assert_eq!(link.to_url(), "https://other.com/story/1");
    }

    #[test]
    fn test_constructor_rejects_empty_components() {
        assert!(ResolvedLink::new(String::new(), "h".into(), "/p".into()).is_err());
        assert!(ResolvedLink::new("https".into(), String::new(), "/p".into()).is_err());
        assert!(ResolvedLink::new("https".into(), "h".into(), String::new()).is_err());
    }

    #[test]
    fn test_constructor_rejects_relative_path() {
        let result = ResolvedLink::new("https".into(), "h".into(), "p".into());
        assert!(matches!(result, Err(LinkError::RelativePath(_))));
    }

    #[test]
    fn test_resolve_all_drops_rejects_and_duplicates() {
        let hrefs = [
            "https://a.com/x",
            "#top",
            "mailto:a@b",
            "https://a.com/x",
            "/local",
        ];
        let links = resolve_all(hrefs.iter().copied(), &base("https://h/p/q"));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].to_url(), "https://a.com/x");
        assert_eq!(links[1].to_url(), "https://h/local");
    }
}
