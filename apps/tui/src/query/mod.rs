//! Client-side query cache and the task dispatcher that feeds it.

mod cache;
mod dispatch;

pub use cache::{QueryCache, QueryState};
pub use dispatch::{FetchEvent, QueryDispatcher};
