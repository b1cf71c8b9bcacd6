pub mod compare;
pub mod explore;
pub mod history;
pub mod search;
