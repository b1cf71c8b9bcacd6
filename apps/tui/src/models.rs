//! Wire types returned by the job-growth endpoint.
//!
//! `county_context` and `granular_data` are kept as raw JSON on
//! [`JobGrowthResult`] because the comparison grid walks them by path; the
//! typed [`DataPayload`] view is parsed on demand for the single-entity display.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_fips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county_fips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tract_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobGrowthResult {
    pub geo: GeoPoint,
    #[serde(default)]
    pub county_context: Option<Value>,
    #[serde(default)]
    pub granular_data: Option<Value>,
    #[serde(default)]
    pub cre_summary: Option<CreSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<String>,
}

/// Which layer of a result the primary metrics were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLevel {
    Granular,
    County,
}

impl PayloadLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Granular => "Granular",
            Self::County => "County",
        }
    }
}

impl JobGrowthResult {
    pub fn county(&self) -> Option<DataPayload> {
        self.county_context.as_ref().and_then(DataPayload::from_value)
    }

    pub fn granular(&self) -> Option<DataPayload> {
        self.granular_data.as_ref().and_then(DataPayload::from_value)
    }

    /// Granular data when present and error-free, otherwise county context.
    pub fn primary(&self) -> Option<(PayloadLevel, DataPayload)> {
        if let Some(granular) = self.granular().filter(DataPayload::is_usable) {
            return Some((PayloadLevel::Granular, granular));
        }
        self.county()
            .filter(DataPayload::is_usable)
            .map(|county| (PayloadLevel::County, county))
    }
}

/// True when a raw record carries a non-null `error` field.
pub fn value_has_error(value: &Value) -> bool {
    value.get("error").is_some_and(|error| !error.is_null())
}

/// A sub-record that is either present or replaced by `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section<T> {
    Unavailable { error: String },
    Available(T),
}

impl<T> Section<T> {
    pub const fn available(&self) -> Option<&T> {
        match self {
            Self::Available(data) => Some(data),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Unavailable { error } => Some(error),
            Self::Available(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPayload {
    pub source: Option<String>,
    pub total_jobs: Option<i64>,
    pub unemployment_rate: Option<f64>,
    pub labor_force: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub growth: Option<Section<BTreeMap<String, Option<f64>>>>,
    #[serde(deserialize_with = "lenient")]
    pub top_sectors_growing: Vec<SectorGrowth>,
    #[serde(deserialize_with = "lenient")]
    pub trends: Vec<TrendPoint>,
    #[serde(deserialize_with = "lenient")]
    pub monthly_employment_trends: Vec<MonthlyPoint>,
    #[serde(deserialize_with = "lenient")]
    pub wage_data: Option<Section<WageData>>,
    #[serde(deserialize_with = "lenient")]
    pub income_data: Option<Section<IncomeData>>,
    #[serde(deserialize_with = "lenient")]
    pub labor_participation: Option<Section<LaborParticipation>>,
    #[serde(deserialize_with = "lenient")]
    pub education_data: Option<Section<EducationData>>,
    #[serde(deserialize_with = "lenient")]
    pub downturn_resilience: Option<Section<DownturnResilience>>,
    #[serde(deserialize_with = "lenient")]
    pub national_comparison: Option<Section<BTreeMap<String, NationalComparison>>>,
    pub error: Option<String>,
}

impl DataPayload {
    pub fn from_value(value: &Value) -> Option<Self> {
        match Self::deserialize(value) {
            Ok(payload) => Some(payload),
            Err(error) => {
                tracing::warn!(%error, "discarding malformed data payload");
                None
            }
        }
    }

    pub const fn is_usable(&self) -> bool {
        self.error.is_none()
    }

    pub fn wage(&self) -> Option<&WageData> {
        self.wage_data.as_ref().and_then(Section::available)
    }

    pub fn income(&self) -> Option<&IncomeData> {
        self.income_data.as_ref().and_then(Section::available)
    }

    pub fn participation(&self) -> Option<&LaborParticipation> {
        self.labor_participation.as_ref().and_then(Section::available)
    }

    pub fn education(&self) -> Option<&EducationData> {
        self.education_data.as_ref().and_then(Section::available)
    }

    pub fn resilience(&self) -> Option<&DownturnResilience> {
        self.downturn_resilience.as_ref().and_then(Section::available)
    }

    pub fn national(&self) -> Option<&BTreeMap<String, NationalComparison>> {
        self.national_comparison.as_ref().and_then(Section::available)
    }

    pub fn growth_for(&self, period: &str) -> Option<f64> {
        self.growth
            .as_ref()
            .and_then(Section::available)?
            .get(period)
            .copied()
            .flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorGrowth {
    pub name: String,
    #[serde(alias = "growth")]
    pub growth_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(deserialize_with = "year_from_number_or_text")]
    pub year: i32,
    pub value: f64,
    #[serde(default)]
    pub projected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    #[serde(deserialize_with = "year_from_number_or_text")]
    pub year: i32,
    pub month: String,
    pub value: f64,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WageData {
    pub current_avg_weekly_wage: Option<f64>,
    pub annual_equivalent: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub wage_growth: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeData {
    pub median_household_income: Option<f64>,
    #[serde(deserialize_with = "optional_year")]
    pub data_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaborParticipation {
    pub labor_force_participation_rate: Option<f64>,
    #[serde(deserialize_with = "optional_year")]
    pub data_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationData {
    pub percent_college_educated: Option<f64>,
    pub workforce_quality_rating: Option<String>,
    #[serde(deserialize_with = "optional_year")]
    pub data_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownturnResilience {
    pub covid_impact: Option<DownturnImpact>,
    pub great_recession_impact: Option<DownturnImpact>,
    pub resilience_score: Option<f64>,
    pub resilience_rating: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownturnImpact {
    pub job_loss_percent: Option<f64>,
}

/// Local vs. national growth for one period (`1y`, `2y`, `5y`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalComparison {
    pub local_rate: Option<f64>,
    pub national_rate: Option<f64>,
    pub difference: Option<f64>,
    pub outperforming: bool,
    pub performance_description: Option<String>,
}

/// Server-derived qualitative ratings, keyed by rating name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreSummary(pub BTreeMap<String, Value>);

impl CreSummary {
    /// `(label, rating)` pairs with humanised labels; non-scalar ratings are skipped.
    pub fn ratings(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                let rating = match value {
                    Value::String(text) => text.clone(),
                    Value::Number(number) => number.to_string(),
                    Value::Bool(flag) => flag.to_string(),
                    _ => return None,
                };
                Some((humanize_key(key), rating))
            })
            .collect()
    }
}

/// `workforce_quality` -> `Workforce Quality`
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A sub-record that is null, `{ "error": ... }` in place of a list, or
/// otherwise malformed decodes as the default instead of failing the payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match T::deserialize(value) {
        Ok(parsed) => Ok(parsed),
        Err(error) => {
            tracing::warn!(%error, "hiding unreadable sub-record");
            Ok(T::default())
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Number(i64),
    Text(String),
}

impl YearRepr {
    fn into_year<E: serde::de::Error>(self) -> Result<i32, E> {
        match self {
            Self::Number(year) => i32::try_from(year).map_err(E::custom),
            Self::Text(text) => text.trim().parse::<i32>().map_err(E::custom),
        }
    }
}

fn year_from_number_or_text<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    YearRepr::deserialize(deserializer)?.into_year()
}

fn optional_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<YearRepr>::deserialize(deserializer)?
        .map(YearRepr::into_year)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with(county: Value, granular: Option<Value>) -> JobGrowthResult {
        JobGrowthResult {
            geo: GeoPoint {
                lat: 37.77,
                lon: -122.42,
                zip: None,
                state_fips: None,
                county_fips: None,
                tract_code: None,
            },
            county_context: Some(county),
            granular_data: granular,
            cre_summary: None,
            notes: Vec::new(),
        }
    }

    #[test]
    fn section_with_error_is_unavailable() -> Result<(), serde_json::Error> {
        let payload: DataPayload = serde_json::from_value(json!({
            "total_jobs": 1200,
            "wage_data": { "error": "No wage data available" },
            "income_data": { "median_household_income": 90000, "data_year": "2022" }
        }))?;

        assert!(payload.wage().is_none());
        assert_eq!(
            payload.wage_data.as_ref().and_then(Section::error),
            Some("No wage data available")
        );
        let income = payload.income().map(|income| income.data_year);
        assert_eq!(income, Some(Some(2022)));
        Ok(())
    }

    #[test]
    fn sector_accepts_backend_growth_alias() -> Result<(), serde_json::Error> {
        let sector: SectorGrowth =
            serde_json::from_value(json!({ "name": "Healthcare", "growth": 4.2 }))?;
        assert_eq!(sector.growth_percent, Some(4.2));
        Ok(())
    }

    #[test]
    fn monthly_year_may_arrive_as_text() -> Result<(), serde_json::Error> {
        let point: MonthlyPoint = serde_json::from_value(json!({
            "year": "2023", "month": "January", "value": 500_000, "label": "Jan-23"
        }))?;
        assert_eq!(point.year, 2023);
        Ok(())
    }

    #[test]
    fn primary_prefers_usable_granular_data() {
        let result = result_with(
            json!({ "source": "BLS LAU", "total_jobs": 500_000 }),
            Some(json!({ "source": "ACS", "total_jobs": 1_000 })),
        );
        let Some((level, payload)) = result.primary() else {
            panic!("expected a primary payload");
        };
        assert_eq!(level, PayloadLevel::Granular);
        assert_eq!(payload.total_jobs, Some(1_000));
    }

    #[test]
    fn primary_falls_back_to_county_when_granular_errors() {
        let result = result_with(
            json!({ "source": "BLS LAU", "total_jobs": 500_000 }),
            Some(json!({ "error": "No Census data available", "trends": [] })),
        );
        let Some((level, payload)) = result.primary() else {
            panic!("expected a primary payload");
        };
        assert_eq!(level, PayloadLevel::County);
        assert_eq!(payload.total_jobs, Some(500_000));
    }

    #[test]
    fn errored_national_comparison_keeps_granular_primary() {
        let result = result_with(
            json!({ "total_jobs": 500_000 }),
            Some(json!({
                "total_jobs": 1_200,
                "national_comparison": { "error": "No national employment data" }
            })),
        );
        let Some((level, payload)) = result.primary() else {
            panic!("expected a primary payload");
        };
        assert_eq!(level, PayloadLevel::Granular);
        assert_eq!(payload.total_jobs, Some(1_200));
        assert!(payload.national().is_none());
        assert_eq!(
            payload.national_comparison.as_ref().and_then(Section::error),
            Some("No national employment data")
        );
    }

    #[test]
    fn errored_growth_only_hides_growth() {
        let result = result_with(
            json!({
                "total_jobs": 500_000,
                "growth": { "error": "BLS down" },
                "trends": { "error": "BLS down" },
                "top_sectors_growing": "unavailable"
            }),
            None,
        );
        let Some((level, payload)) = result.primary() else {
            panic!("expected a primary payload");
        };
        assert_eq!(level, PayloadLevel::County);
        assert_eq!(payload.total_jobs, Some(500_000));
        assert_eq!(payload.growth_for("1y"), None);
        assert!(payload.trends.is_empty());
        assert!(payload.top_sectors_growing.is_empty());
    }

    #[test]
    fn growth_periods_are_read_by_key() -> Result<(), serde_json::Error> {
        let payload: DataPayload = serde_json::from_value(json!({
            "growth": { "1y": 1.5, "5y": null }
        }))?;
        assert_eq!(payload.growth_for("1y"), Some(1.5));
        assert_eq!(payload.growth_for("5y"), None);
        assert_eq!(payload.growth_for("2y"), None);
        Ok(())
    }

    #[test]
    fn primary_is_none_when_both_layers_error() {
        let result = result_with(json!({ "error": "down" }), Some(json!({ "error": "down" })));
        assert!(result.primary().is_none());
    }

    #[test]
    fn cre_ratings_are_humanised_and_ordered() {
        let summary = CreSummary(
            [
                ("workforce_quality".to_string(), json!("High")),
                ("downturn_resilience".to_string(), json!("Moderate")),
                ("details".to_string(), json!({ "nested": true })),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(
            summary.ratings(),
            vec![
                ("Downturn Resilience".to_string(), "Moderate".to_string()),
                ("Workforce Quality".to_string(), "High".to_string()),
            ]
        );
    }

    #[test]
    fn null_notes_decode_as_empty() -> Result<(), serde_json::Error> {
        let result: JobGrowthResult = serde_json::from_value(json!({
            "geo": { "lat": 1.0, "lon": 2.0 },
            "notes": null
        }))?;
        assert!(result.notes.is_empty());
        assert!(result.primary().is_none());
        Ok(())
    }
}
