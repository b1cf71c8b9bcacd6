mod chart;
mod summary;

pub use chart::{employment_series, monthly_series, yearly_window, EmploymentSeries, YearlyWindow};
pub use summary::{summarize, EntitySummary, MapView, Metric};
