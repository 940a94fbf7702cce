//! Query parameters of a link
//!
//! A query key may repeat, so values are kept as an ordered list per key.
//! Lookups read the first value unless stated otherwise.

use std::collections::HashMap;

/// Ordered multi-map of decoded query parameters (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Decode a raw query string (without the leading `?`).
    ///
    /// Empty values are kept, so `insecure=` is still a present key.
    pub fn parse(query: &str) -> Self {
        let mut params = QueryParams::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()).into_owned() {
            params.values.entry(key).or_default().push(value);
        }
        params
    }

    /// All values of `key` in link order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value of `key`, empty or not.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// First value of `key` if it is non-empty after trimming.
    pub fn first_non_empty(&self, key: &str) -> Option<&str> {
        self.first(key).filter(|v| !v.trim().is_empty())
    }

    /// First non-empty value among `keys`, tried in order.
    pub fn first_non_empty_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.first_non_empty(key))
    }

    /// First value of the first key in `keys` that is present at all.
    pub fn first_present_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.first(key))
    }

    /// Whether `key` appears in the query.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the query had no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Case-insensitive truthiness: `1`, `true`, `yes`, `on`.
pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Split on commas, trim each entry, drop the empty ones.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
