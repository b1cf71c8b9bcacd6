use crate::models::{DataPayload, MonthlyPoint, TrendPoint};
use chrono::Month;
use std::collections::BTreeMap;

/// Most recent years of a yearly series, split for two-colour plotting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyWindow {
    pub actual: Vec<TrendPoint>,
    pub projected: Vec<TrendPoint>,
}

impl YearlyWindow {
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty() && self.projected.is_empty()
    }
}

const WINDOW_YEARS: i32 = 5;

/// Keeps the five most recent years (first point wins per year), sorted.
///
/// The last actual point is repeated at the start of the projected series
/// when projections follow it, so the two lines join.
pub fn yearly_window(trends: &[TrendPoint]) -> YearlyWindow {
    let Some(latest) = trends.iter().map(|point| point.year).max() else {
        return YearlyWindow::default();
    };
    let earliest = latest - (WINDOW_YEARS - 1);

    let mut by_year: BTreeMap<i32, &TrendPoint> = BTreeMap::new();
    for point in trends.iter().filter(|point| point.year >= earliest) {
        by_year.entry(point.year).or_insert(point);
    }

    let window: Vec<TrendPoint> = by_year.into_values().cloned().collect();
    let (actual, mut projected): (Vec<_>, Vec<_>) =
        window.iter().cloned().partition(|point| !point.projected);

    if let Some(bridge) = actual.last() {
        let is_final = window.last().is_some_and(|last| last.year == bridge.year);
        if !is_final {
            projected.insert(0, bridge.clone());
        }
    }

    YearlyWindow { actual, projected }
}

fn month_number(name: &str) -> u32 {
    name.trim()
        .parse::<Month>()
        .map_or(u32::MAX, |month| month.number_from_month())
}

/// Monthly points in chronological order. Unrecognised month names sort last within their year.
pub fn monthly_series(points: &[MonthlyPoint]) -> Vec<MonthlyPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| (point.year, month_number(&point.month)));
    sorted
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmploymentSeries {
    Monthly(Vec<MonthlyPoint>),
    Yearly(YearlyWindow),
    Empty,
}

impl EmploymentSeries {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Monthly(_) => "Monthly Employment",
            Self::Yearly(_) => "Employment Trend",
            Self::Empty => "No trend data",
        }
    }

    /// Min and max of every plotted value.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = match self {
            Self::Monthly(points) => points.iter().map(|point| point.value).collect(),
            Self::Yearly(window) => window
                .actual
                .iter()
                .chain(&window.projected)
                .map(|point| point.value)
                .collect(),
            Self::Empty => Vec::new(),
        };
        let min = values.iter().copied().reduce(f64::min)?;
        let max = values.iter().copied().reduce(f64::max)?;
        Some((min, max))
    }
}

/// Monthly data when there is any, otherwise the yearly window.
pub fn employment_series(payload: &DataPayload) -> EmploymentSeries {
    if !payload.monthly_employment_trends.is_empty() {
        return EmploymentSeries::Monthly(monthly_series(&payload.monthly_employment_trends));
    }
    let window = yearly_window(&payload.trends);
    if window.is_empty() {
        EmploymentSeries::Empty
    } else {
        EmploymentSeries::Yearly(window)
    }
}
