use crate::domain::GeoType;
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;

/// A completed lookup. Identity is address plus granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    pub id: String,
    pub address: String,
    pub geo_type: GeoType,
    pub duration_seconds: f64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryItem {
    pub fn new(address: impl Into<String>, geo_type: GeoType, duration_seconds: f64) -> Self {
        Self::at(address, geo_type, duration_seconds, Utc::now())
    }

    pub fn at(
        address: impl Into<String>,
        geo_type: GeoType,
        duration_seconds: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let address = address.into();
        Self {
            id: Self::id_for(&address, geo_type),
            address,
            geo_type,
            duration_seconds,
            timestamp,
        }
    }

    pub fn id_for(address: &str, geo_type: GeoType) -> String {
        format!("{address}-{geo_type}")
    }
}

/// Most-recent-first list of lookups with at most one entry per id.
#[derive(Debug, Default)]
pub struct HistoryStore {
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted items, assumed newest first.
    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        let mut store = Self::new();
        for item in items.into_iter().rev() {
            store.insert(item);
        }
        store
    }

    pub fn record(&mut self, address: &str, geo_type: GeoType, duration_seconds: f64) -> HistoryItem {
        let item = HistoryItem::new(address, geo_type, duration_seconds);
        self.insert(item.clone());
        item
    }

    /// Drops any entry with the same id and puts `item` at the front.
    pub fn insert(&mut self, item: HistoryItem) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item);
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Entries whose address fuzzily matches `pattern`, still newest first.
    pub fn search(&self, pattern: &str) -> Vec<&HistoryItem> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return self.items.iter().collect();
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        self.items
            .iter()
            .filter(|item| {
                matcher.fuzzy_match(&item.address, pattern).is_some()
                    || matcher.fuzzy_match(item.geo_type.as_str(), pattern).is_some()
            })
            .collect()
    }
}
