mod address;
mod history;

pub use address::{parse_addresses, AddressStore};
pub use history::{HistoryItem, HistoryStore};
