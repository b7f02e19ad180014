//! Active filter selections.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters that are never facet keys.
pub const RESERVED_PARAMS: &[&str] = &["page", "cursor"];

/// The facet values a shopper has selected, per facet key.
///
/// Selection order is irrelevant; only membership matters. A key mapped to an
/// empty set places no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters(BTreeMap<String, BTreeSet<String>>);

impl ActiveFilters {
    /// Create an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build filters from decoded query-string pairs.
    ///
    /// Every parameter except `page` and `cursor` is a facet key whose value is
    /// a comma-separated list. Blank entries are dropped. Repeated parameters
    /// for one key are unioned.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::new();
        for (key, value) in pairs {
            let key = key.as_ref().trim();
            if key.is_empty() || RESERVED_PARAMS.iter().any(|reserved| *reserved == key) {
                continue;
            }
            filters.select(key, value.as_ref().split(','));
        }
        filters
    }

    /// Add values to the selection for `key`.
    ///
    /// The key is registered even when every value is blank, which leaves it
    /// unconstrained.
    pub fn select<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.0.entry(key.to_owned()).or_default();
        entry.extend(
            values
                .into_iter()
                .map(|v| v.as_ref().trim().to_owned())
                .filter(|v| !v.is_empty()),
        );
    }

    /// Builder form of [`Self::select`].
    #[must_use]
    pub fn with<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.select(key, values);
        self
    }

    /// Selected values for `key`, if the key is present.
    #[must_use]
    pub fn selected(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.0.get(key)
    }

    /// Keys with a non-empty selection, in key order.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(key, values)| (key.as_str(), values))
    }

    /// Whether no key constrains the result.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.constraints().next().is_none()
    }

    /// Canonical serialization used as the result cache key.
    ///
    /// Keys and values are sorted and unconstrained keys are omitted, so any
    /// two filter sets that select the same products map to the same key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let object: serde_json::Map<String, Value> = self
            .constraints()
            .map(|(key, values)| {
                (
                    key.to_owned(),
                    Value::Array(values.iter().cloned().map(Value::String).collect()),
                )
            })
            .collect();
        Value::Object(object).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_pairs_skips_reserved() {
        let filters = ActiveFilters::from_query_pairs([
            ("page", "2"),
            ("cursor", "abc"),
            ("vendor", "SKF,FAG"),
        ]);

        assert!(filters.selected("page").is_none());
        assert!(filters.selected("cursor").is_none());
        let vendors: Vec<_> = filters
            .selected("vendor")
            .map(|v| v.iter().cloned().collect())
            .unwrap_or_default();
        assert_eq!(vendors, vec!["FAG".to_string(), "SKF".to_string()]);
    }

    #[test]
    fn test_blank_entries_leave_key_unconstrained() {
        let filters = ActiveFilters::from_query_pairs([("seal", " , ,")]);
        assert!(filters.selected("seal").is_some_and(BTreeSet::is_empty));
        assert!(filters.is_unconstrained());
    }

    #[test]
    fn test_repeated_params_are_unioned() {
        let filters = ActiveFilters::from_query_pairs([("bredd", "10"), ("bredd", "12,10")]);
        assert_eq!(filters.selected("bredd").map(BTreeSet::len), Some(2));
    }

    #[test]
    fn test_cache_key_is_order_independent() {
        let a = ActiveFilters::new()
            .with("vendor", ["SKF", "FAG"])
            .with("bredd", ["10"]);
        let b = ActiveFilters::new()
            .with("bredd", ["10"])
            .with("vendor", ["FAG", "SKF"])
            .with("seal", Vec::<String>::new());

        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), r#"{"bredd":["10"],"vendor":["FAG","SKF"]}"#);
    }

    #[test]
    fn test_empty_cache_key() {
        assert_eq!(ActiveFilters::new().cache_key(), "{}");
    }
}
