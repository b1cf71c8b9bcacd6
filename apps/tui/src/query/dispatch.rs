use crate::api::JobGrowthSource;
use crate::domain::QueryKey;
use crate::error::ApiError;
use crate::models::JobGrowthResult;
use crate::query::QueryCache;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// A settled fetch, published back to the event loop.
#[derive(Debug)]
pub struct FetchEvent {
    pub key: QueryKey,
    pub outcome: Result<JobGrowthResult, ApiError>,
    pub elapsed: Duration,
    pub record_history: bool,
}

/// Spawns one task per issued fetch. Fetches never wait on each other and are
/// never cancelled; a superseded one simply settles later.
#[derive(Debug)]
pub struct QueryDispatcher<S> {
    source: Arc<S>,
    sender: UnboundedSender<FetchEvent>,
}

impl<S: JobGrowthSource> QueryDispatcher<S> {
    pub fn new(source: S) -> (Self, UnboundedReceiver<FetchEvent>) {
        let (sender, receiver) = unbounded_channel();
        (
            Self {
                source: Arc::new(source),
                sender,
            },
            receiver,
        )
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Issues a fetch unless `cache` already has the key loaded or in flight.
    pub fn dispatch(&self, cache: &mut QueryCache, key: &QueryKey, record_history: bool) -> bool {
        if !cache.begin(key) {
            debug!(address = %key.address, geo_type = %key.geo_type, "serving from cache");
            return false;
        }
        self.spawn(key.clone(), record_history);
        true
    }

    /// Issues a fetch even when data is cached.
    pub fn refetch(&self, cache: &mut QueryCache, key: &QueryKey, record_history: bool) -> bool {
        if !cache.restart(key) {
            return false;
        }
        self.spawn(key.clone(), record_history);
        true
    }

    fn spawn(&self, key: QueryKey, record_history: bool) {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let query = key.to_query();
            let started = Instant::now();
            let outcome = source.fetch(&query).await;
            let elapsed = started.elapsed();

            match &outcome {
                Ok(_) => info!(
                    address = %key.address,
                    geo_type = %key.geo_type,
                    flush = key.flush_cache,
                    seconds = elapsed.as_secs_f64(),
                    "job growth fetched"
                ),
                Err(error) => warn!(address = %key.address, %error, "job growth fetch failed"),
            }

            let event = FetchEvent {
                key,
                outcome,
                elapsed,
                record_history,
            };
            if sender.send(event).is_err() {
                debug!("fetch settled after the event loop shut down");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressQuery, GeoType};
    use crate::models::GeoPoint;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl JobGrowthSource for CountingSource {
        async fn fetch(&self, query: &AddressQuery) -> Result<JobGrowthResult, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.address == "bad" {
                return Err(ApiError::Http {
                    status: 404,
                    detail: Some("Address not found".to_string()),
                });
            }
            Ok(JobGrowthResult {
                geo: GeoPoint {
                    lat: 1.0,
                    lon: 2.0,
                    zip: None,
                    state_fips: None,
                    county_fips: None,
                    tract_code: None,
                },
                county_context: None,
                granular_data: None,
                cre_summary: None,
                notes: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn dispatch_publishes_settled_events() -> Result<(), Box<dyn std::error::Error>> {
        let (dispatcher, mut events) = QueryDispatcher::new(CountingSource::default());
        let mut cache = QueryCache::new();
        let good = QueryKey::new("good", GeoType::Tract, false);
        let bad = QueryKey::new("bad", GeoType::Tract, false);

        assert!(dispatcher.dispatch(&mut cache, &good, true));
        assert!(dispatcher.dispatch(&mut cache, &bad, true));
        assert!(!dispatcher.dispatch(&mut cache, &good, true), "already in flight");

        for _ in 0..2 {
            let event = events.recv().await.ok_or("channel closed")?;
            assert!(event.record_history);
            cache.settle(&event.key, event.outcome);
        }

        assert!(cache.data(&good).is_some());
        assert!(matches!(cache.state(&bad), crate::query::QueryState::Error(_)));
        assert_eq!(dispatcher.source().calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn refetch_bypasses_cached_data() -> Result<(), Box<dyn std::error::Error>> {
        let (dispatcher, mut events) = QueryDispatcher::new(CountingSource::default());
        let mut cache = QueryCache::new();
        let key = QueryKey::new("good", GeoType::Zip, true);

        assert!(dispatcher.dispatch(&mut cache, &key, false));
        let event = events.recv().await.ok_or("channel closed")?;
        cache.settle(&event.key, event.outcome);

        assert!(!dispatcher.dispatch(&mut cache, &key, false));
        assert!(dispatcher.refetch(&mut cache, &key, false));
        let event = events.recv().await.ok_or("channel closed")?;
        cache.settle(&event.key, event.outcome);

        assert_eq!(dispatcher.source().calls.load(Ordering::SeqCst), 2);
        Ok(())
    }
}
