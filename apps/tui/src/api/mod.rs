mod client;

pub use client::{JobGrowthClient, JobGrowthSource};
