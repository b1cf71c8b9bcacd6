use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tracing::{debug, info};

/// Creates the history table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS search_history (
            id TEXT PRIMARY KEY,
            address TEXT NOT NULL,
            geo_type TEXT NOT NULL,
            duration_seconds REAL NOT NULL,
            timestamp TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    query("CREATE INDEX IF NOT EXISTS idx_search_history_timestamp ON search_history (timestamp)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Opens (creating if needed) the history database at `database_url`
pub async fn create_history_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!(%database_url, "creating history database");
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;
    debug!(%database_url, "history database ready");

    Ok(pool)
}
