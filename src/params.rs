//! Route and query parameters handed to an activated view.
//!
//! - [`RouteParams`] holds values captured by `:name` segments of a route
//!   pattern (`/product/:id` matched against `/product/42` gives `id = "42"`).
//! - [`QueryParams`] holds the `?key=value&...` suffix of a navigation target.
//!
//! Values are stored as strings. Nothing here validates their format: a view
//! that wants a number asks for one with `get_as` and decides what to do
//! with `None`.
//!
//! ```
//! use guard_navigator::{QueryParams, RouteParams};
//!
//! let params = RouteParams::from_path("/product/42", "/product/:id");
//! assert_eq!(params.get("id"), Some("42"));
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//!
//! let query = QueryParams::from_query_string("tab=reviews&page=2");
//! assert_eq!(query.get("tab"), Some("reviews"));
//! ```

use crate::matching::match_path;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Parameters captured from dynamic path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by name.
    ///
    /// An absent parameter is `None`; callers treat it as an empty value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter and parse it as `T`.
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Extract parameters from `path` according to `pattern`.
    ///
    /// Shorthand for [`match_path`](crate::matching::match_path) that returns
    /// empty params when the path does not match.
    ///
    /// ```
    /// use guard_navigator::RouteParams;
    ///
    /// let params = RouteParams::from_path("/users/7/posts/9", "/users/:user/posts/:post");
    /// assert_eq!(params.get("user"), Some("7"));
    /// assert_eq!(params.get("post"), Some("9"));
    ///
    /// assert!(RouteParams::from_path("/products/9", "/users/:user").is_empty());
    /// ```
    pub fn from_path(path: &str, pattern: &str) -> RouteParams {
        match_path(path, pattern).unwrap_or_default()
    }
}

impl fmt::Display for RouteParams {
    /// Formats as `{id=42, tab=reviews}` with keys sorted, for log output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sorted: BTreeMap<&String, &String> = self.params.iter().collect();
        f.write_str("{")?;
        for (i, (key, value)) in sorted.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

/// Parameters parsed from the query string of a navigation target.
///
/// Only the first value of a repeated key is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` pairs separated by `&`. A leading `?` is ignored.
    ///
    /// A key without `=` gets an empty value.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = HashMap::new();
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params
                .entry(decode_query_component(key))
                .or_insert_with(|| decode_query_component(value));
        }
        Self { params }
    }

    /// Get a query value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a query value parsed as `T`.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Percent-decode a path segment. `+` is a literal character here.
///
/// Malformed escapes are kept verbatim; invalid UTF-8 is replaced.
pub(crate) fn decode_path_segment(s: &str) -> String {
    percent_decode(s, false)
}

/// Percent-decode a form-encoded query key or value. `+` decodes to a space.
pub(crate) fn decode_query_component(s: &str) -> String {
    percent_decode(s, true)
}

fn percent_decode(s: &str, plus_as_space: bool) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push((hex_value(bytes[i + 1]) << 4) | hex_value(bytes[i + 2]));
                i += 3;
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
