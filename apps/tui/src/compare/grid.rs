use crate::compare::format::{format_value, Format, SectorBadge, NOT_AVAILABLE};
use crate::compare::merge::{merged_record, resolve_path};
use crate::domain::QueryKey;
use crate::query::{QueryCache, QueryState};
use serde::Serialize;
use serde_json::Value;

/// One comparison row: a label, the dotted path it reads and how to format it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub label: &'static str,
    pub path: &'static str,
    pub format: Option<Format>,
}

impl Attribute {
    pub const fn new(label: &'static str, path: &'static str, format: Option<Format>) -> Self {
        Self {
            label,
            path,
            format,
        }
    }

    /// Sector rows render `{name, growth_percent}` as a badge.
    pub fn is_sector(&self) -> bool {
        self.label.contains("Sector")
    }

    fn cell(&self, record: &Value) -> GridCell {
        let value = resolve_path(record, self.path);
        if self.is_sector() {
            return value
                .and_then(SectorBadge::from_value)
                .map_or(GridCell::NotAvailable, GridCell::Badge);
        }
        match format_value(value, self.format) {
            text if text == NOT_AVAILABLE => GridCell::NotAvailable,
            text => GridCell::Value(text),
        }
    }
}

pub const COMPARISON_ATTRIBUTES: &[Attribute] = &[
    Attribute::new("Total Jobs", "total_jobs", Some(Format::Thousands)),
    Attribute::new("Unemployment Rate", "unemployment_rate", Some(Format::Percent)),
    Attribute::new("Labor Force", "labor_force", Some(Format::Thousands)),
    Attribute::new("1-Year Job Growth", "growth.1y", Some(Format::Percent)),
    Attribute::new("2-Year Job Growth", "growth.2y", Some(Format::Percent)),
    Attribute::new("5-Year Job Growth", "growth.5y", Some(Format::Percent)),
    Attribute::new("Top Growing Sector", "top_sectors_growing.0", None),
    Attribute::new("Second Growing Sector", "top_sectors_growing.1", None),
    Attribute::new("Avg Weekly Wage", "wage_data.current_avg_weekly_wage", Some(Format::Currency)),
    Attribute::new("Annual Wage Equivalent", "wage_data.annual_equivalent", Some(Format::Currency)),
    Attribute::new("1-Year Wage Growth", "wage_data.wage_growth.1y", Some(Format::Percent)),
    Attribute::new(
        "Median Household Income",
        "income_data.median_household_income",
        Some(Format::Currency),
    ),
    Attribute::new(
        "Labor Participation",
        "labor_participation.labor_force_participation_rate",
        Some(Format::Percent),
    ),
    Attribute::new("College Educated", "education_data.percent_college_educated", Some(Format::Percent)),
    Attribute::new("Workforce Quality", "education_data.workforce_quality_rating", None),
    Attribute::new("Resilience Score", "downturn_resilience.resilience_score", Some(Format::Decimal(1))),
    Attribute::new("Resilience Rating", "downturn_resilience.resilience_rating", None),
    Attribute::new(
        "COVID Job Loss",
        "downturn_resilience.covid_impact.job_loss_percent",
        Some(Format::Percent),
    ),
    Attribute::new("vs National (1Y)", "national_comparison.1y.difference", Some(Format::Percent)),
    Attribute::new("Data Source", "source", None),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GridCell {
    Value(String),
    Badge(SectorBadge),
    NotAvailable,
    Loading,
    Error(String),
}

impl GridCell {
    pub fn text(&self) -> &str {
        match self {
            Self::Value(text) | Self::Error(text) => text,
            Self::Badge(badge) => &badge.text,
            Self::NotAvailable => NOT_AVAILABLE,
            Self::Loading => "Loading...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ColumnStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
    pub address: String,
    pub status: ColumnStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub label: &'static str,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonGrid {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<GridRow>,
}

impl ComparisonGrid {
    /// Grid over the standard attributes for `keys`, in key order.
    pub fn from_cache(keys: &[QueryKey], cache: &QueryCache) -> Self {
        build_grid(
            keys.iter().map(|key| (key.address.as_str(), cache.state(key))),
            COMPARISON_ATTRIBUTES,
        )
    }

    pub fn is_settled(&self) -> bool {
        self.columns
            .iter()
            .all(|column| column.status != ColumnStatus::Loading)
    }
}

enum Column {
    Pending,
    Failed(String),
    Ready(Value),
}

/// Builds the grid from each column's current query state.
///
/// Columns keep caller order and rows keep `attributes` order. A failed
/// column shows its error on every row without affecting the others.
pub fn build_grid<'a, I>(columns: I, attributes: &[Attribute]) -> ComparisonGrid
where
    I: IntoIterator<Item = (&'a str, &'a QueryState)>,
{
    let (headers, sources): (Vec<_>, Vec<_>) = columns
        .into_iter()
        .map(|(address, state)| {
            let (status, source) = match state {
                QueryState::Idle | QueryState::Loading => (ColumnStatus::Loading, Column::Pending),
                QueryState::Error(error) => (
                    ColumnStatus::Failed(error.to_string()),
                    Column::Failed(error.to_string()),
                ),
                QueryState::Success(result) => (ColumnStatus::Ready, Column::Ready(merged_record(result))),
            };
            (
                ColumnHeader {
                    address: address.to_string(),
                    status,
                },
                source,
            )
        })
        .unzip();

    let rows = attributes
        .iter()
        .map(|attribute| GridRow {
            label: attribute.label,
            cells: sources
                .iter()
                .map(|source| match source {
                    Column::Pending => GridCell::Loading,
                    Column::Failed(message) => GridCell::Error(message.clone()),
                    Column::Ready(record) => attribute.cell(record),
                })
                .collect(),
        })
        .collect();

    ComparisonGrid {
        columns: headers,
        rows,
    }
}
