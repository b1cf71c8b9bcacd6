use crate::domain::{AddressQuery, GeoType, QueryKey};
use crate::store::HistoryItem;

/// The active lookup: which addresses to show, at which granularity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressStore {
    addresses: Vec<String>,
    geo_type: GeoType,
    flush_cache: bool,
}

impl AddressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole selection at once.
    pub fn submit(&mut self, addresses: Vec<String>, geo_type: GeoType, flush_cache: bool) {
        self.addresses = addresses;
        self.geo_type = geo_type;
        self.flush_cache = flush_cache;
    }

    /// Re-populates from a history entry. History never forces a refresh.
    pub fn apply_history(&mut self, item: &HistoryItem) {
        self.submit(vec![item.address.clone()], item.geo_type, false);
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub const fn geo_type(&self) -> GeoType {
        self.geo_type
    }

    pub const fn flush_cache(&self) -> bool {
        self.flush_cache
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn queries(&self) -> Vec<AddressQuery> {
        self.addresses
            .iter()
            .map(|address| AddressQuery::new(address.clone(), self.geo_type, self.flush_cache))
            .collect()
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        self.queries().iter().map(AddressQuery::key).collect()
    }
}

/// Splits form input on `;` or newlines, dropping blank entries.
pub fn parse_addresses(input: &str) -> Vec<String> {
    input
        .split([';', '\n'])
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_and_trims() {
        assert_eq!(
            parse_addresses(" 1 Market St ;; 2 Main St\n\n3 Elm Ave; "),
            vec!["1 Market St", "2 Main St", "3 Elm Ave"]
        );
        assert!(parse_addresses("  ;  ").is_empty());
    }

    #[test]
    fn submit_replaces_everything() {
        let mut store = AddressStore::new();
        store.submit(vec!["A".into(), "B".into()], GeoType::Zip, true);
        store.submit(vec!["C".into()], GeoType::County, false);

        assert_eq!(store.addresses(), ["C".to_string()]);
        assert_eq!(store.geo_type(), GeoType::County);
        assert!(!store.flush_cache());
    }

    #[test]
    fn queries_keep_address_order() {
        let mut store = AddressStore::new();
        store.submit(vec!["B".into(), "A".into()], GeoType::Tract, true);

        let keys = store.keys();
        assert_eq!(keys[0], QueryKey::new("B", GeoType::Tract, true));
        assert_eq!(keys[1], QueryKey::new("A", GeoType::Tract, true));
    }

    #[test]
    fn history_selection_clears_flush() {
        let mut store = AddressStore::new();
        store.submit(vec!["X".into()], GeoType::Tract, true);
        let item = HistoryItem::new("123 Main", GeoType::Zip, 2.5);

        store.apply_history(&item);

        assert_eq!(store.queries(), vec![AddressQuery::new("123 Main", GeoType::Zip, false)]);
    }
}
