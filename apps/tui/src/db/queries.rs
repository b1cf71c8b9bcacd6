use crate::db::models::HistoryRecord;
use crate::store::HistoryItem;
use sqlx::{query, query_as, SqlitePool};
use tracing::warn;

/// Loads history entries, newest first
pub async fn load_history(pool: &SqlitePool) -> Result<Vec<HistoryItem>, sqlx::Error> {
    let records = query_as::<_, HistoryRecord>(
        "SELECT id, address, geo_type, duration_seconds, timestamp \
         FROM search_history ORDER BY timestamp DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            let item = record.into_item();
            if item.is_none() {
                warn!(%id, "skipping history row with invalid timestamp");
            }
            item
        })
        .collect())
}

/// Inserts an entry, replacing any row with the same id
pub async fn upsert_history(pool: &SqlitePool, item: &HistoryItem) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO search_history (id, address, geo_type, duration_seconds, timestamp) \
         VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET \
            duration_seconds = excluded.duration_seconds, \
            timestamp = excluded.timestamp",
    )
    .bind(&item.id)
    .bind(&item.address)
    .bind(item.geo_type)
    .bind(item.duration_seconds)
    .bind(item.timestamp.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn clear_history(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = query("DELETE FROM search_history").execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::setup_database;
    use crate::domain::GeoType;
    use chrono::{Duration, TimeZone, Utc};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> Result<SqlitePool, sqlx::Error> {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        setup_database(&pool).await?;
        Ok(pool)
    }

    #[tokio::test]
    async fn test_history_round_trip_newest_first() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .ok_or("invalid timestamp")?;

        upsert_history(&pool, &HistoryItem::at("1 Main", GeoType::Tract, 2.1, start)).await?;
        upsert_history(
            &pool,
            &HistoryItem::at("9 Elm", GeoType::Zip, 0.7, start + Duration::minutes(1)),
        )
        .await?;

        let items = load_history(&pool).await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].address, "9 Elm");
        assert_eq!(items[0].geo_type, GeoType::Zip);
        assert_eq!(items[1].timestamp, start);

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_id() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .ok_or("invalid timestamp")?;

        upsert_history(&pool, &HistoryItem::at("123 Main", GeoType::Tract, 2.1, start)).await?;
        upsert_history(&pool, &HistoryItem::at("9 Elm", GeoType::Tract, 1.0, start + Duration::minutes(1))).await?;
        upsert_history(
            &pool,
            &HistoryItem::at("123 Main", GeoType::Tract, 1.4, start + Duration::minutes(2)),
        )
        .await?;

        let items = load_history(&pool).await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "123 Main-tract");
        assert!((items[0].duration_seconds - 1.4).abs() < f64::EPSILON);

        assert_eq!(clear_history(&pool).await?, 2);
        assert!(load_history(&pool).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_timestamp_rows_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;
        query(
            "INSERT INTO search_history (id, address, geo_type, duration_seconds, timestamp) \
             VALUES ('x-tract', 'x', 'tract', 1.0, 'yesterday')",
        )
        .execute(&pool)
        .await?;

        assert!(load_history(&pool).await?.is_empty());
        Ok(())
    }
}
