pub mod migrations;
pub mod models;
pub mod queries;

pub use migrations::{create_history_pool, setup_database};
pub use queries::{clear_history, load_history, upsert_history};
