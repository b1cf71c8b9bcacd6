// Domain logic shared by the terminal UI, headless mode and tests
pub mod api;
pub mod compare;
pub mod config;
pub mod db;
pub mod display;
pub mod domain;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
pub mod session;
pub mod store;

pub use domain::{AddressQuery, GeoType, QueryKey};
pub use error::{ApiError, ConfigError};
pub use models::JobGrowthResult;
