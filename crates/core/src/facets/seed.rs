//! Static facet catalog used before live product data is available.

use crate::types::facet::{FacetMap, keys, sort_facet_values};

/// Handle of the collection that gets the full seeded catalog by default.
pub const DEFAULT_FLAGSHIP_COLLECTION: &str = "alla-lager";

const INNER_DIAMETERS: &[&str] = &[
    "3", "4", "5", "6", "7", "8", "9", "10", "12", "15", "17", "20", "25", "30", "35", "40", "45",
    "50", "55", "60", "65", "70", "75", "80", "90", "100",
];

const OUTER_DIAMETERS: &[&str] = &[
    "10", "13", "16", "19", "22", "24", "26", "28", "30", "32", "35", "37", "40", "42", "47", "52",
    "55", "62", "68", "72", "80", "85", "90", "100", "110", "120", "130", "140", "150", "160",
    "180",
];

const WIDTHS: &[&str] = &[
    "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17", "18", "19",
    "20", "21", "22", "23", "25", "27", "30", "33", "35", "40",
];

const VENDORS: &[&str] = &[
    "FAG", "INA", "Koyo", "NSK", "NTN", "Nachi", "SKF", "SNR", "Timken", "ZKL",
];

const PRODUCT_TYPES: &[&str] = &[
    "Axialkullager",
    "Cylindriska rullager",
    "Glidlager",
    "Koniska rullager",
    "Lagerhus",
    "Nållager",
    "Sfäriska rullager",
    "Spårkullager",
    "Vinkelkontaktkullager",
];

const MATERIALS: &[&str] = &["Hybrid", "Keramik", "Kromstål", "Rostfritt stål"];

const SEALS: &[&str] = &["2RS", "2Z", "RS", "Z", "ZZ", "Öppen"];

const CAGES: &[&str] = &["Mässing", "Polyamid", "Stål"];

const PRECISION_CLASSES: &[&str] = &["ABEC-1", "ABEC-3", "ABEC-5", "P0", "P4", "P5", "P6"];

const APPLICATIONS: &[&str] = &[
    "Elmotorer",
    "Fordon",
    "Industri",
    "Jordbruk",
    "Pumpar",
    "Skateboard",
    "Trädgårdsmaskiner",
];

/// Seeds facet controls so they render before any upstream call resolves.
///
/// The flagship collection gets every facet; all other collections get the
/// reduced `vendor`/`productType`/`material` subset.
#[derive(Debug, Clone)]
pub struct SeedCatalog {
    flagship: String,
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_FLAGSHIP_COLLECTION)
    }
}

impl SeedCatalog {
    /// Create a seed catalog with the given flagship collection handle.
    #[must_use]
    pub fn new(flagship: impl Into<String>) -> Self {
        Self {
            flagship: flagship.into(),
        }
    }

    /// Seed facets for a collection.
    #[must_use]
    pub fn facets_for(&self, collection_handle: &str) -> FacetMap {
        if collection_handle == self.flagship {
            full_catalog()
        } else {
            reduced_catalog()
        }
    }
}

/// Seed facets for a collection using the default flagship handle.
#[must_use]
pub fn seed_facets(collection_handle: &str) -> FacetMap {
    SeedCatalog::default().facets_for(collection_handle)
}

fn reduced_catalog() -> FacetMap {
    let mut facets = FacetMap::new();
    insert(&mut facets, keys::VENDOR, VENDORS);
    insert(&mut facets, keys::PRODUCT_TYPE, PRODUCT_TYPES);
    insert(&mut facets, keys::MATERIAL, MATERIALS);
    facets
}

fn full_catalog() -> FacetMap {
    let mut facets = reduced_catalog();
    insert(&mut facets, keys::INNER_DIAMETER, INNER_DIAMETERS);
    insert(&mut facets, keys::OUTER_DIAMETER, OUTER_DIAMETERS);
    insert(&mut facets, keys::WIDTH, WIDTHS);
    insert(&mut facets, keys::SEAL, SEALS);
    insert(&mut facets, keys::CAGE, CAGES);
    insert(&mut facets, keys::PRECISION, PRECISION_CLASSES);
    insert(&mut facets, keys::APPLICATION, APPLICATIONS);
    facets
}

fn insert(facets: &mut FacetMap, key: &str, values: &[&str]) {
    let mut values: Vec<String> = values.iter().map(|v| (*v).to_owned()).collect();
    sort_facet_values(key, &mut values);
    facets.insert(key.to_owned(), values);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_flagship_gets_reduced_set() {
        let facets = seed_facets("spårkullager");
        let keys: Vec<&str> = facets.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["material", "productType", "vendor"]);
    }

    #[test]
    fn test_flagship_gets_full_catalog() {
        let facets = seed_facets(DEFAULT_FLAGSHIP_COLLECTION);
        for key in [
            keys::INNER_DIAMETER,
            keys::OUTER_DIAMETER,
            keys::WIDTH,
            keys::VENDOR,
            keys::PRODUCT_TYPE,
            keys::MATERIAL,
            keys::SEAL,
            keys::CAGE,
            keys::PRECISION,
            keys::APPLICATION,
        ] {
            assert!(facets.contains_key(key), "missing seeded facet {key}");
        }
    }

    #[test]
    fn test_seeded_dimensions_are_numerically_sorted() {
        let facets = seed_facets(DEFAULT_FLAGSHIP_COLLECTION);
        let widths = facets.get(keys::WIDTH).cloned().unwrap_or_default();
        assert_eq!(widths.first().map(String::as_str), Some("3"));
        assert_eq!(widths.last().map(String::as_str), Some("40"));
    }

    #[test]
    fn test_custom_flagship() {
        let catalog = SeedCatalog::new("kampanj");
        assert!(catalog.facets_for("kampanj").contains_key(keys::SEAL));
        assert!(!catalog.facets_for(DEFAULT_FLAGSHIP_COLLECTION).contains_key(keys::SEAL));
    }
}
