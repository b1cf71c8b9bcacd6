//! Attribute-by-address comparison.
//!
//! Each column is one address's merged record (county context overlaid by
//! granular data); each row resolves a dotted path in every column and
//! formats it. The grid is rebuilt from the query cache on every frame, so
//! columns fill in as their fetches settle.

mod format;
mod grid;
mod merge;

pub use format::{format_value, group_thousands, trim_number, Format, SectorBadge, NOT_AVAILABLE};
pub use grid::{
    build_grid, Attribute, ColumnHeader, ColumnStatus, ComparisonGrid, GridCell, GridRow,
    COMPARISON_ATTRIBUTES,
};
pub use merge::{merge_records, merged_record, resolve_path};
