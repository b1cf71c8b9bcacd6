use crate::domain::QueryKey;
use crate::error::ApiError;
use crate::models::JobGrowthResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle of one cached query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Loading,
    Success(Arc<JobGrowthResult>),
    Error(ApiError),
}

impl QueryState {
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Idle | Self::Loading)
    }

    pub const fn data(&self) -> Option<&Arc<JobGrowthResult>> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }
}

static IDLE: QueryState = QueryState::Idle;

/// Results keyed by (address, geo_type, flush_cache). Only the event loop mutates it.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, QueryState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: &QueryKey) -> &QueryState {
        self.entries.get(key).unwrap_or(&IDLE)
    }

    pub fn data(&self, key: &QueryKey) -> Option<&Arc<JobGrowthResult>> {
        self.state(key).data()
    }

    /// Marks `key` as loading. Returns false when the key already holds data
    /// or a fetch is in flight, i.e. when no request should be issued.
    pub fn begin(&mut self, key: &QueryKey) -> bool {
        match self.entries.get(key) {
            Some(QueryState::Loading | QueryState::Success(_)) => false,
            _ => {
                self.entries.insert(key.clone(), QueryState::Loading);
                true
            }
        }
    }

    /// Like [`begin`](Self::begin) but discards cached data. Still refuses while in flight.
    pub fn restart(&mut self, key: &QueryKey) -> bool {
        if matches!(self.entries.get(key), Some(QueryState::Loading)) {
            return false;
        }
        self.invalidate(key);
        self.begin(key)
    }

    /// Stores a fetch outcome; the last one to settle wins. A successful forced
    /// refresh is also written under the equivalent non-forced key.
    pub fn settle(&mut self, key: &QueryKey, outcome: Result<JobGrowthResult, ApiError>) {
        match outcome {
            Ok(result) => {
                let shared = Arc::new(result);
                if key.flush_cache {
                    debug!(address = %key.address, geo_type = %key.geo_type, "back-filling non-forced cache entry");
                    self.entries
                        .insert(key.without_flush(), QueryState::Success(Arc::clone(&shared)));
                }
                self.entries
                    .insert(key.clone(), QueryState::Success(shared));
            }
            Err(error) => {
                self.entries.insert(key.clone(), QueryState::Error(error));
            }
        }
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }

    pub fn is_settled<'a>(&self, keys: impl IntoIterator<Item = &'a QueryKey>) -> bool {
        keys.into_iter().all(|key| !self.state(key).is_pending())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
