//! The state shared by the interactive and headless front ends.

use crate::api::JobGrowthSource;
use crate::compare::ComparisonGrid;
use crate::display::{summarize, EntitySummary};
use crate::domain::{GeoType, QueryKey};
use crate::query::{FetchEvent, QueryCache, QueryDispatcher, QueryState};
use crate::store::{AddressStore, HistoryItem, HistoryStore};
use tracing::debug;

#[derive(Debug, Default)]
pub struct Session {
    pub addresses: AddressStore,
    pub history: HistoryStore,
    pub cache: QueryCache,
}

impl Session {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        self.addresses.keys()
    }

    /// Replaces the selection and fetches every address not already cached.
    /// Returns how many requests were issued.
    pub fn submit<S: JobGrowthSource>(
        &mut self,
        dispatcher: &QueryDispatcher<S>,
        addresses: Vec<String>,
        geo_type: GeoType,
        flush_cache: bool,
    ) -> usize {
        self.addresses.submit(addresses, geo_type, flush_cache);
        self.fetch_all(dispatcher)
    }

    /// Loads a history entry back into the selection, without forcing a refresh.
    pub fn select_history<S: JobGrowthSource>(
        &mut self,
        dispatcher: &QueryDispatcher<S>,
        id: &str,
    ) -> Option<HistoryItem> {
        let item = self.history.items().iter().find(|item| item.id == id)?.clone();
        self.addresses.apply_history(&item);
        self.fetch_all(dispatcher);
        Some(item)
    }

    /// Re-fetches the current selection with `flush_cache` set.
    pub fn refresh<S: JobGrowthSource>(&mut self, dispatcher: &QueryDispatcher<S>) -> usize {
        let addresses = self.addresses.addresses().to_vec();
        self.addresses
            .submit(addresses, self.addresses.geo_type(), true);
        self.keys()
            .iter()
            .filter(|key| dispatcher.refetch(&mut self.cache, key, true))
            .count()
    }

    fn fetch_all<S: JobGrowthSource>(&mut self, dispatcher: &QueryDispatcher<S>) -> usize {
        self.keys()
            .iter()
            .filter(|key| dispatcher.dispatch(&mut self.cache, key, true))
            .count()
    }

    /// Applies a settled fetch. Returns the history entry it produced, if any.
    pub fn apply(&mut self, event: FetchEvent) -> Option<HistoryItem> {
        let succeeded = event.outcome.is_ok();
        self.cache.settle(&event.key, event.outcome);

        if !(succeeded && event.record_history) {
            return None;
        }
        debug!(address = %event.key.address, "recording history");
        Some(self.history.record(
            &event.key.address,
            event.key.geo_type,
            event.elapsed.as_secs_f64(),
        ))
    }

    pub fn grid(&self) -> ComparisonGrid {
        ComparisonGrid::from_cache(&self.keys(), &self.cache)
    }

    pub fn state(&self, index: usize) -> Option<&QueryState> {
        self.keys()
            .get(index)
            .map(|key| self.cache.state(key))
    }

    pub fn summary(&self, index: usize) -> Option<EntitySummary> {
        let key = self.keys().into_iter().nth(index)?;
        let result = self.cache.data(&key)?;
        Some(summarize(&key.address, key.geo_type, result))
    }

    pub fn is_settled(&self) -> bool {
        self.cache.is_settled(&self.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AddressQuery;
    use crate::error::ApiError;
    use crate::models::{GeoPoint, JobGrowthResult};
    use serde_json::json;
    use std::time::Duration;

    struct StaticSource;

    impl JobGrowthSource for StaticSource {
        async fn fetch(&self, query: &AddressQuery) -> Result<JobGrowthResult, ApiError> {
            if query.address.contains("fail") {
                return Err(ApiError::Transport("connection refused".to_string()));
            }
            Ok(JobGrowthResult {
                geo: GeoPoint {
                    lat: 40.0,
                    lon: -75.0,
                    zip: None,
                    state_fips: None,
                    county_fips: None,
                    tract_code: None,
                },
                county_context: Some(json!({ "total_jobs": 1000, "source": query.address })),
                granular_data: None,
                cre_summary: None,
                notes: Vec::new(),
            })
        }
    }

    async fn drain(
        session: &mut Session,
        events: &mut tokio::sync::mpsc::UnboundedReceiver<FetchEvent>,
        count: usize,
    ) {
        for _ in 0..count {
            if let Some(event) = events.recv().await {
                session.apply(event);
            }
        }
    }

    #[tokio::test]
    async fn submit_fetches_and_records_history() {
        let (dispatcher, mut events) = QueryDispatcher::new(StaticSource);
        let mut session = Session::default();

        let issued = session.submit(
            &dispatcher,
            vec!["1 Main".into(), "fail here".into(), "3 Elm".into()],
            GeoType::Tract,
            false,
        );
        assert_eq!(issued, 3);
        assert!(!session.is_settled());

        drain(&mut session, &mut events, 3).await;

        assert!(session.is_settled());
        assert_eq!(session.history.len(), 2, "failed fetches are not recorded");
        assert!(matches!(session.state(1), Some(QueryState::Error(_))));
        assert!(session.summary(0).is_some());
        assert!(session.summary(1).is_none());

        let grid = session.grid();
        assert_eq!(grid.rows[0].cells[0].text(), "1,000");
        assert_eq!(grid.rows[0].cells[1].text(), "Network error: connection refused");
    }

    #[tokio::test]
    async fn resubmitting_cached_addresses_issues_nothing() {
        let (dispatcher, mut events) = QueryDispatcher::new(StaticSource);
        let mut session = Session::default();

        session.submit(&dispatcher, vec!["1 Main".into()], GeoType::Zip, false);
        drain(&mut session, &mut events, 1).await;

        assert_eq!(
            session.submit(&dispatcher, vec!["1 Main".into()], GeoType::Zip, false),
            0
        );
    }

    #[tokio::test]
    async fn refresh_back_fills_the_plain_key() {
        let (dispatcher, mut events) = QueryDispatcher::new(StaticSource);
        let mut session = Session::default();
        session.submit(&dispatcher, vec!["1 Main".into()], GeoType::County, false);
        drain(&mut session, &mut events, 1).await;

        assert_eq!(session.refresh(&dispatcher), 1);
        assert!(session.addresses.flush_cache());
        drain(&mut session, &mut events, 1).await;

        let plain = QueryKey::new("1 Main", GeoType::County, false);
        let forced = QueryKey::new("1 Main", GeoType::County, true);
        assert_eq!(session.cache.data(&plain), session.cache.data(&forced));
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test]
    async fn history_selection_reuses_cache() {
        let (dispatcher, mut events) = QueryDispatcher::new(StaticSource);
        let mut session = Session::default();
        session.submit(&dispatcher, vec!["1 Main".into()], GeoType::Tract, false);
        drain(&mut session, &mut events, 1).await;
        session.submit(&dispatcher, vec!["3 Elm".into()], GeoType::Tract, true);
        drain(&mut session, &mut events, 1).await;

        let item = session.select_history(&dispatcher, "1 Main-tract");

        assert_eq!(item.map(|item| item.address), Some("1 Main".to_string()));
        assert!(!session.addresses.flush_cache());
        assert!(session.is_settled(), "cached key needs no fetch");
        assert!(session.select_history(&dispatcher, "9 Oak-zip").is_none());
    }

    #[test]
    fn apply_skips_history_when_not_requested() {
        let mut session = Session::default();
        let key = QueryKey::new("1 Main", GeoType::Tract, false);
        let event = FetchEvent {
            key: key.clone(),
            outcome: Err(ApiError::Transport("down".to_string())),
            elapsed: Duration::from_millis(300),
            record_history: false,
        };

        assert!(session.apply(event).is_none());
        assert!(session.history.is_empty());
        assert!(matches!(session.cache.state(&key), QueryState::Error(_)));
    }
}
