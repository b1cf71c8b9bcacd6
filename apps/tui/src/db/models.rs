use crate::domain::GeoType;
use crate::store::HistoryItem;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A row of the `search_history` table
#[derive(Debug, Clone, FromRow)]
pub struct HistoryRecord {
    pub id: String,
    pub address: String,
    pub geo_type: GeoType,
    pub duration_seconds: f64,
    pub timestamp: String,
}

impl HistoryRecord {
    /// Rows with an unreadable timestamp are skipped by the caller.
    pub fn into_item(self) -> Option<HistoryItem> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()?
            .with_timezone(&Utc);
        Some(HistoryItem {
            id: self.id,
            address: self.address,
            geo_type: self.geo_type,
            duration_seconds: self.duration_seconds,
            timestamp,
        })
    }
}
