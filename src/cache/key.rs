//! Cache Key Module
//!
//! Deterministic key construction for cached read operations.
//!
//! A key is built from a namespace (the logical cache domain), an operation
//! identifier, and every request parameter that affects the result.
//! Parameters are kept sorted by name, so the order in which a caller adds
//! them never changes the key, and separator characters inside values are
//! escaped so distinct parameter combinations can never collide.

use std::collections::BTreeMap;
use std::fmt::Display;

// == Key Builder ==
/// Builds a cache key of the form `namespace:operation?a=1&b=2`.
///
/// Callers must add every parameter their result depends on, substituting
/// defaults *before* building so that an omitted parameter and its default
/// produce the same key.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    namespace: String,
    operation: String,
    params: BTreeMap<String, String>,
}

impl KeyBuilder {
    // == Constructor ==
    /// Starts a key for `operation` within `namespace`.
    pub fn new(namespace: &str, operation: &str) -> Self {
        Self {
            namespace: namespace.trim().to_string(),
            operation: operation.trim().to_string(),
            params: BTreeMap::new(),
        }
    }

    // == Param ==
    /// Adds a case-sensitive parameter (identifiers, numbers).
    ///
    /// The value is trimmed and escaped but its case is preserved, so two
    /// user ids differing only in case stay distinct.
    pub fn param(mut self, name: &str, value: impl Display) -> Self {
        let value = value.to_string();
        self.params
            .insert(escape(name.trim()), escape(value.trim()));
        self
    }

    // == Case-Insensitive Param ==
    /// Adds a parameter the data source matches case-insensitively
    /// (category names, search terms): the value is lowercased so
    /// `Fruits` and `fruits` share one entry.
    pub fn param_ci(self, name: &str, value: impl Display) -> Self {
        let value = value.to_string().to_lowercase();
        self.param(name, value)
    }

    // == Build ==
    /// Renders the final key string.
    pub fn build(self) -> String {
        let mut key = format!("{}:{}", self.namespace, self.operation);
        let mut first = true;
        for (name, value) in &self.params {
            key.push(if first { '?' } else { '&' });
            key.push_str(name);
            key.push('=');
            key.push_str(value);
            first = false;
        }
        key
    }
}

/// Escapes the characters the key format itself uses, so parameter values
/// containing them cannot forge extra key dimensions.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3d"),
            '?' => out.push_str("%3f"),
            ':' => out.push_str("%3a"),
            _ => out.push(c),
        }
    }
    out
}
