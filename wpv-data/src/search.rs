//! Free-text well search.

use crate::catalog::WellCatalog;
use wpv_core::WellId;

/// Case-insensitive substring search over well display names.
///
/// Lowercased names are computed once; each query is a linear scan in
/// catalog order, so results are deterministic.
#[derive(Debug, Clone)]
pub struct SearchIndex<'a> {
    catalog: &'a WellCatalog,
    lowered: Vec<String>,
}

impl<'a> SearchIndex<'a> {
    pub fn new(catalog: &'a WellCatalog) -> Self {
        let lowered = catalog.all().iter().map(|w| w.name.to_lowercase()).collect();
        Self { catalog, lowered }
    }

    /// Ids of wells whose name contains `text`, ignoring case and
    /// surrounding whitespace. An empty query matches every well.
    pub fn query(&self, text: &str) -> Vec<WellId> {
        let needle = text.trim().to_lowercase();
        self.catalog
            .all()
            .iter()
            .zip(&self.lowered)
            .filter(|(_, name)| name.contains(&needle))
            .map(|(w, _)| w.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn query_is_case_insensitive_substring() {
        let catalog = sample_catalog();
        let index = SearchIndex::new(&catalog);
        // "WELL-12" and "Well-1" match, "WELL-2" does not
        assert_eq!(index.query("well-1"), vec!["W12:UI", "W1:HS"]);
    }

    #[test]
    fn empty_query_returns_all_in_catalog_order() {
        let catalog = sample_catalog();
        let index = SearchIndex::new(&catalog);
        assert_eq!(index.query(""), vec!["P1:PL", "W12:UI", "W1:HS", "W2:UI"]);
        assert_eq!(index.query("   "), index.query(""));
    }

    #[test]
    fn query_ignores_surrounding_whitespace() {
        let catalog = sample_catalog();
        let index = SearchIndex::new(&catalog);
        assert_eq!(index.query("  well-2 "), vec!["W2:UI"]);
    }

    #[test]
    fn query_without_matches_is_empty() {
        let catalog = sample_catalog();
        let index = SearchIndex::new(&catalog);
        assert!(index.query("SACHA").is_empty());
    }
}
