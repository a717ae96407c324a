//! Query-string assembly for option records.
//!
//! Option records declare their encoding explicitly by pushing each field
//! under a fixed key, so the wire form of every option is visible at the call
//! site instead of being derived at runtime.

use std::fmt::Display;

/// Ordered list of query pairs built from an option record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a pair that is always encoded.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Append a pair only when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Number of collected pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render the pairs as an `application/x-www-form-urlencoded` string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("filter", Option::<String>::None);
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn pairs_keep_insertion_order() {
        let mut params = QueryParams::new();
        params.push("expanded", true);
        params.push_opt("offset", Some(50u32));
        params.push_opt("limit", Some(25u32));

        assert_eq!(params.len(), 3);
        assert_eq!(params.to_query_string(), "expanded=true&offset=50&limit=25");
    }

    #[test]
    fn values_are_form_encoded() {
        let mut params = QueryParams::new();
        params.push("filter", "nameOrValue:10.0.0.1/32");
        assert_eq!(
            params.to_query_string(),
            "filter=nameOrValue%3A10.0.0.1%2F32"
        );
    }
}
