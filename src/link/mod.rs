//! URL handling module for Tidings
//!
//! This module resolves raw hrefs found inside fetched documents into
//! absolute `{scheme, host, path}` links and provides host helpers used by
//! the self-redirect filter.

mod domain;
mod resolve;

pub use domain::{extract_host, is_platform_host};
pub use resolve::{resolve, resolve_all, CandidateLink, ResolvedLink};
