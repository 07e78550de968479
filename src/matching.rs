//! Segment-based path matching.
//!
//! # Design
//!
//! - Split paths by '/' into segments, ignoring empty ones
//! - Match literal segments exactly
//! - Extract `:param` segments into [`RouteParams`]
//! - A pattern matches only when every segment of the path is consumed
//! - The empty pattern `""` and `"/"` are the same route: the root

use crate::params::{decode_path_segment, RouteParams};
use crate::trace_log;
use std::borrow::Cow;

/// Normalize a path: one leading slash, no trailing slash, no empty segments.
///
/// The empty path normalizes to `"/"`. Already-normalized input is returned
/// borrowed.
///
/// ```
/// use guard_navigator::normalize_path;
///
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("product/42/"), "/product/42");
/// assert_eq!(normalize_path("//home"), "/home");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let is_normalized = path.starts_with('/')
        && (path == "/" || !path.ends_with('/'))
        && !path.contains("//");
    if is_normalized {
        return Cow::Borrowed(path);
    }

    let segments = split_path(path);
    if segments.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", segments.join("/")))
    }
}

/// Split a navigation target into its path and query string.
///
/// Anything after `#` is dropped.
///
/// ```
/// use guard_navigator::matching::split_target;
///
/// assert_eq!(split_target("/product/42?tab=reviews#top"), ("/product/42", Some("tab=reviews")));
/// assert_eq!(split_target("/home"), ("/home", None));
/// ```
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    let without_fragment = target.split_once('#').map_or(target, |(head, _)| head);
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    }
}

/// Match `path` against a route `pattern`, extracting parameters.
///
/// Returns `None` unless the pattern consumes the whole path.
///
/// ```
/// use guard_navigator::matching::match_path;
///
/// let params = match_path("/product/42", "/product/:id").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// assert!(match_path("/product/42/reviews", "/product/:id").is_none());
/// assert!(match_path("/", "").is_some());
/// ```
pub fn match_path(path: &str, pattern: &str) -> Option<RouteParams> {
    let path_segments = split_path(path);
    let pattern_segments = split_path(pattern);

    if path_segments.len() != pattern_segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (pattern_seg, path_seg) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = extract_param_name(pattern_seg) {
            params.insert(name, decode_path_segment(path_seg));
        } else if pattern_seg != path_seg {
            return None;
        }
    }

    trace_log!("'{}' matched pattern '{}' with {}", path, pattern, params);
    Some(params)
}

/// Split a path into segments, filtering empty segments.
///
/// ```
/// use guard_navigator::matching::split_path;
///
/// assert_eq!(split_path("/users/123/"), vec!["users", "123"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Extract the parameter name from a `:name` segment.
pub fn extract_param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':').filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/users/123"), vec!["users", "123"]);
        assert_eq!(split_path(""), Vec::<&str>::new());
        assert_eq!(split_path("users"), vec!["users"]);
    }

    #[test]
    fn test_extract_param_name() {
        assert_eq!(extract_param_name(":id"), Some("id"));
        assert_eq!(extract_param_name("users"), None);
        assert_eq!(extract_param_name(":"), None);
    }

    #[test]
    fn test_normalize_borrows_when_clean() {
        assert!(matches!(normalize_path("/about"), Cow::Borrowed(_)));
        assert!(matches!(normalize_path("about"), Cow::Owned(_)));
    }

    #[test]
    fn test_literal_mismatch() {
        assert!(match_path("/about", "/home").is_none());
        assert!(match_path("/", "/home").is_none());
        assert!(match_path("/home", "").is_none());
    }

    #[test]
    fn test_param_does_not_match_empty_segment() {
        assert!(match_path("/product", "/product/:id").is_none());
        assert!(match_path("/product/", "/product/:id").is_none());
    }

    #[test]
    fn test_split_target_fragment_only() {
        assert_eq!(split_target("/form#notes"), ("/form", None));
        assert_eq!(split_target("?a=1"), ("", Some("a=1")));
    }
}
