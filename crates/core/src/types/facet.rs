//! Facet keys, display labels, and value ordering.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Facet key to its ordered, deduplicated values.
pub type FacetMap = BTreeMap<String, Vec<String>>;

/// Well-known facet keys.
pub mod keys {
    pub const INNER_DIAMETER: &str = "innerdiameter";
    pub const OUTER_DIAMETER: &str = "ytterdiameter";
    pub const WIDTH: &str = "bredd";
    pub const VENDOR: &str = "vendor";
    pub const PRODUCT_TYPE: &str = "productType";
    pub const MATERIAL: &str = "material";
    pub const SEAL: &str = "seal";
    pub const CAGE: &str = "cage";
    pub const PRECISION: &str = "precision";
    pub const APPLICATION: &str = "application";
}

/// Known keys with their display labels, in presentation order.
const KNOWN_FACETS: &[(&str, &str)] = &[
    (keys::PRODUCT_TYPE, "Produkttyp"),
    (keys::VENDOR, "Tillverkare"),
    (keys::INNER_DIAMETER, "Innerdiameter (mm)"),
    (keys::OUTER_DIAMETER, "Ytterdiameter (mm)"),
    (keys::WIDTH, "Bredd (mm)"),
    (keys::MATERIAL, "Material"),
    (keys::SEAL, "Tätning"),
    (keys::CAGE, "Bur"),
    (keys::PRECISION, "Precisionsklass"),
    (keys::APPLICATION, "Användningsområde"),
];

/// Facets whose values are measurements and sort numerically.
const DIMENSIONAL_KEYS: &[&str] = &[keys::INNER_DIAMETER, keys::OUTER_DIAMETER, keys::WIDTH];

/// Display label for a facet key, falling back to the key itself.
#[must_use]
pub fn facet_label(key: &str) -> &str {
    KNOWN_FACETS
        .iter()
        .find(|(known, _)| *known == key)
        .map_or(key, |(_, label)| *label)
}

/// Whether a facet key holds numeric measurements.
#[must_use]
pub fn is_dimensional(key: &str) -> bool {
    DIMENSIONAL_KEYS.iter().any(|dimensional| *dimensional == key)
}

/// Canonical form of a facet value, shared by extraction and matching.
///
/// Values are trimmed. Measurements written with a decimal comma are
/// rewritten with a point (`"2,5"` -> `"2.5"`), since selections travel as
/// comma-joined query parameters. `None` for blank values and for other
/// values containing a comma, which could never be selected.
#[must_use]
pub fn normalize_facet_value<'a>(key: &str, value: &'a str) -> Option<Cow<'a, str>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if !value.contains(',') {
        return Some(Cow::Borrowed(value));
    }
    is_dimensional(key).then(|| Cow::Owned(value.replace(',', ".")))
}

/// Position of a key in presentation order; unknown keys sort last.
fn presentation_rank(key: &str) -> usize {
    KNOWN_FACETS
        .iter()
        .position(|(known, _)| *known == key)
        .unwrap_or(KNOWN_FACETS.len())
}

/// Parse the leading number of a value, e.g. `"12.5 mm"` -> `12.5`.
///
/// A decimal comma is accepted (`"2,5"` -> `2.5`).
fn leading_number(value: &str) -> Option<f64> {
    let normalized = value.trim().replace(',', ".");
    let end = normalized
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(normalized.len(), |(i, _)| i);

    // Shrink until the prefix parses ("1.2.3" -> "1.2").
    let mut candidate = normalized.get(..end)?;
    while !candidate.is_empty() {
        if let Ok(n) = candidate.parse::<f64>()
            && n.is_finite()
        {
            return Some(n);
        }
        candidate = candidate.get(..candidate.len() - 1)?;
    }
    None
}

/// Compare two values of a dimensional facet.
///
/// Numbers come first in ascending order; values without a leading number
/// follow, ordered lexicographically. Equal numbers fall back to the string
/// ordering so the result is total.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort facet values in place using the rule for `key`.
pub fn sort_facet_values(key: &str, values: &mut [String]) {
    if is_dimensional(key) {
        values.sort_by(|a, b| compare_numeric(a, b));
    } else {
        values.sort();
    }
}

/// Turn a value set into the sorted sequence for `key`.
#[must_use]
pub fn sorted_values(key: &str, values: BTreeSet<String>) -> Vec<String> {
    let mut values: Vec<String> = values.into_iter().collect();
    sort_facet_values(key, &mut values);
    values
}

/// A facet ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetGroup {
    /// Facet key as used in query strings.
    pub key: String,
    /// Human readable label.
    pub label: String,
    /// Available values, sorted.
    pub values: Vec<String>,
    /// Values currently selected by the shopper.
    pub selected: Vec<String>,
}

/// Order facet keys for presentation: known keys first, then the rest
/// alphabetically.
pub fn presentation_order<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut ordered: Vec<&str> = keys.into_iter().collect();
    ordered.sort_by(|a, b| {
        presentation_rank(a)
            .cmp(&presentation_rank(b))
            .then_with(|| a.cmp(b))
    });
    ordered
}
