use crate::compare::{format_value, merged_record, Format, SectorBadge, NOT_AVAILABLE};
use crate::display::chart::{employment_series, EmploymentSeries};
use crate::domain::GeoType;
use crate::models::{DataPayload, GeoPoint, JobGrowthResult, PayloadLevel};
use serde_json::Value;

const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// Map preview: a circle around the geocoded point.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub lat: f64,
    pub lon: f64,
    pub radius_miles: f64,
}

impl MapView {
    pub fn new(geo: &GeoPoint, geo_type: GeoType) -> Self {
        Self {
            lat: geo.lat,
            lon: geo.lon,
            radius_miles: geo_type.map_radius_miles(),
        }
    }

    /// Radius as `(lat degrees, lon degrees)`. Longitude degrees shrink towards the poles.
    pub fn radius_degrees(&self) -> (f64, f64) {
        let lat = self.radius_miles / MILES_PER_DEGREE_LAT;
        let cos = self.lat.to_radians().cos().abs().max(0.01);
        (lat, lat / cos)
    }

    /// Canvas `(x_bounds, y_bounds)` with some margin around the circle.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let (lat, lon) = self.radius_degrees();
        let margin = 1.5;
        (
            [self.lon - lon * margin, self.lon + lon * margin],
            [self.lat - lat * margin, self.lat + lat * margin],
        )
    }

    /// Outline of the radius circle in (lon, lat) points.
    pub fn circle(&self, segments: usize) -> Vec<(f64, f64)> {
        let (lat, lon) = self.radius_degrees();
        (0..=segments)
            .map(|step| {
                #[allow(clippy::cast_precision_loss)]
                let angle = std::f64::consts::TAU * step as f64 / segments.max(1) as f64;
                (self.lon + lon * angle.cos(), self.lat + lat * angle.sin())
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Everything the explore screen shows for one address.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub address: String,
    pub geo_type: GeoType,
    pub level: Option<PayloadLevel>,
    pub source: Option<String>,
    pub metrics: Vec<Metric>,
    pub growth: Vec<Metric>,
    pub sectors: Vec<SectorBadge>,
    pub series: EmploymentSeries,
    pub details: Vec<Metric>,
    pub national: Vec<Metric>,
    pub ratings: Vec<(String, String)>,
    pub notes: Vec<String>,
    pub map: MapView,
}

fn number(value: Option<f64>, format: Format) -> String {
    let value = value.map(Value::from);
    format_value(value.as_ref(), Some(format))
}

#[allow(clippy::cast_precision_loss)]
fn count(value: Option<i64>) -> String {
    number(value.map(|count| count as f64), Format::Thousands)
}

const PERIODS: [(&str, &str); 3] = [("1y", "1-Year"), ("2y", "2-Year"), ("5y", "5-Year")];

pub fn summarize(address: &str, geo_type: GeoType, result: &JobGrowthResult) -> EntitySummary {
    let primary = result.primary();
    let level = primary.as_ref().map(|(level, _)| *level);
    let payload = primary.map(|(_, payload)| payload).unwrap_or_default();
    let merged = DataPayload::from_value(&merged_record(result)).unwrap_or_default();

    let metrics = vec![
        Metric::new("Total Jobs", count(payload.total_jobs)),
        Metric::new(
            "Unemployment Rate",
            number(payload.unemployment_rate, Format::Percent),
        ),
        Metric::new("Labor Force", count(payload.labor_force)),
    ];

    let growth = PERIODS
        .iter()
        .map(|(period, label)| {
            Metric::new(
                format!("{label} Growth"),
                number(payload.growth_for(period), Format::Percent),
            )
        })
        .collect();

    let sectors = payload
        .top_sectors_growing
        .iter()
        .filter_map(SectorBadge::from_sector)
        .collect();

    let national = PERIODS
        .iter()
        .filter_map(|(period, label)| {
            let comparison = merged.national()?.get(*period)?;
            let description = comparison
                .performance_description
                .clone()
                .unwrap_or_else(|| {
                    if comparison.outperforming {
                        "Outperforming national average".to_string()
                    } else {
                        "Below national average".to_string()
                    }
                });
            Some(Metric::new(
                format!("{label} vs National"),
                format!(
                    "{} local / {} national ({})",
                    number(comparison.local_rate, Format::Percent),
                    number(comparison.national_rate, Format::Percent),
                    description
                ),
            ))
        })
        .collect();

    EntitySummary {
        address: address.to_string(),
        geo_type,
        level,
        source: payload.source.clone(),
        metrics,
        growth,
        sectors,
        series: employment_series(&payload),
        details: details(&merged),
        national,
        ratings: result
            .cre_summary
            .as_ref()
            .map(|summary| summary.ratings())
            .unwrap_or_default(),
        notes: result.notes.clone(),
        map: MapView::new(&result.geo, geo_type),
    }
}

/// Secondary metrics. A section that failed upstream is left out entirely.
fn details(payload: &DataPayload) -> Vec<Metric> {
    let mut lines = Vec::new();

    if let Some(wage) = payload.wage() {
        lines.push(Metric::new(
            "Avg Weekly Wage",
            number(wage.current_avg_weekly_wage, Format::Currency),
        ));
        lines.push(Metric::new(
            "Annual Equivalent",
            number(wage.annual_equivalent, Format::Currency),
        ));
        if let Some(growth) = wage.wage_growth.get("1y").copied().flatten() {
            lines.push(Metric::new(
                "1-Year Wage Growth",
                number(Some(growth), Format::Percent),
            ));
        }
    }

    if let Some(income) = payload.income() {
        lines.push(Metric::new(
            with_year("Median Household Income", income.data_year),
            number(income.median_household_income, Format::Currency),
        ));
    }

    if let Some(participation) = payload.participation() {
        lines.push(Metric::new(
            with_year("Labor Participation", participation.data_year),
            number(participation.labor_force_participation_rate, Format::Percent),
        ));
    }

    if let Some(education) = payload.education() {
        lines.push(Metric::new(
            with_year("College Educated", education.data_year),
            number(education.percent_college_educated, Format::Percent),
        ));
        if let Some(rating) = &education.workforce_quality_rating {
            lines.push(Metric::new("Workforce Quality", rating.as_str()));
        }
    }

    if let Some(resilience) = payload.resilience() {
        lines.push(Metric::new(
            "Resilience",
            format!(
                "{} ({})",
                number(resilience.resilience_score, Format::Decimal(1)),
                resilience
                    .resilience_rating
                    .as_deref()
                    .unwrap_or(NOT_AVAILABLE)
            ),
        ));
        let impacts = [
            ("COVID Job Loss", resilience.covid_impact.as_ref()),
            ("Great Recession Job Loss", resilience.great_recession_impact.as_ref()),
        ];
        for (label, impact) in impacts {
            if let Some(loss) = impact.and_then(|impact| impact.job_loss_percent) {
                lines.push(Metric::new(label, number(Some(loss), Format::Percent)));
            }
        }
    }

    lines
}

fn with_year(label: &str, year: Option<i32>) -> String {
    year.map_or_else(|| label.to_string(), |year| format!("{label} ({year})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreSummary;
    use serde_json::json;

    fn geo(lat: f64) -> GeoPoint {
        GeoPoint {
            lat,
            lon: -122.4,
            zip: Some("94103".to_string()),
            state_fips: None,
            county_fips: None,
            tract_code: None,
        }
    }

    fn labels(metrics: &[Metric]) -> Vec<&str> {
        metrics.iter().map(|metric| metric.label.as_str()).collect()
    }

    #[test]
    fn radius_follows_granularity() {
        let tract = MapView::new(&geo(0.0), GeoType::Tract);
        let county = MapView::new(&geo(0.0), GeoType::County);

        let (lat, lon) = tract.radius_degrees();
        assert!((lat - 1.0 / 69.0).abs() < 1e-9);
        assert!((lon - lat).abs() < 1e-9, "equator has square degrees");
        assert!(county.radius_degrees().0 > lat * 4.9);
    }

    #[test]
    fn longitude_radius_widens_away_from_equator() {
        let view = MapView::new(&geo(60.0), GeoType::Zip);
        let (lat, lon) = view.radius_degrees();
        assert!((lon - lat * 2.0).abs() < 1e-6);

        let ([west, east], [south, north]) = view.bounds();
        assert!(west < view.lon && view.lon < east);
        assert!(south < view.lat && view.lat < north);
        assert_eq!(view.circle(8).len(), 9);
    }

    #[test]
    fn summary_uses_primary_payload_and_hides_failed_sections() {
        let result = JobGrowthResult {
            geo: geo(37.77),
            county_context: Some(json!({
                "source": "BLS LAU",
                "total_jobs": 600_000,
                "income_data": { "median_household_income": 120_000, "data_year": 2022 },
                "national_comparison": {
                    "1y": { "local_rate": 2.5, "national_rate": 1.5, "difference": 1.0, "outperforming": true }
                }
            })),
            granular_data: Some(json!({
                "source": "Census ACS",
                "total_jobs": 4_321,
                "unemployment_rate": 3.5,
                "growth": { "1y": 1.25, "2y": null },
                "top_sectors_growing": [{ "name": "Healthcare", "growth_percent": 5 }],
                "wage_data": { "error": "No wage data available" }
            })),
            cre_summary: Some(CreSummary(
                [("workforce_quality".to_string(), json!("High"))].into_iter().collect(),
            )),
            notes: vec!["Tract data is modelled".to_string()],
        };

        let summary = summarize("1 Market St", GeoType::Tract, &result);

        assert_eq!(summary.level, Some(PayloadLevel::Granular));
        assert_eq!(summary.source.as_deref(), Some("Census ACS"));
        assert_eq!(summary.metrics[0].value, "4,321");
        assert_eq!(summary.metrics[1].value, "3.5%");
        assert_eq!(summary.metrics[2].value, "N/A");
        assert_eq!(summary.growth[0].value, "1.25%");
        assert_eq!(summary.growth[1].value, "N/A");
        assert_eq!(summary.sectors[0].text, "Healthcare: 5%");
        assert_eq!(labels(&summary.details), vec!["Median Household Income (2022)"]);
        assert_eq!(summary.details[0].value, "$120,000");
        assert_eq!(
            summary.national[0].value,
            "2.5% local / 1.5% national (Outperforming national average)"
        );
        assert_eq!(summary.ratings, vec![("Workforce Quality".to_string(), "High".to_string())]);
        assert_eq!(summary.series, EmploymentSeries::Empty);
        assert!((summary.map.radius_miles - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_without_usable_payload_is_all_not_available() {
        let result = JobGrowthResult {
            geo: geo(10.0),
            county_context: Some(json!({ "error": "BLS unavailable" })),
            granular_data: None,
            cre_summary: None,
            notes: Vec::new(),
        };

        let summary = summarize("Nowhere", GeoType::County, &result);

        assert_eq!(summary.level, None);
        assert!(summary.metrics.iter().all(|metric| metric.value == NOT_AVAILABLE));
        assert!(summary.sectors.is_empty());
        assert!(summary.details.is_empty());
    }

    #[test]
    fn resilience_lists_each_downturn() {
        let payload: DataPayload = serde_json::from_value(json!({
            "downturn_resilience": {
                "resilience_score": 6.84,
                "resilience_rating": "Moderate",
                "covid_impact": { "job_loss_percent": -9.2 },
                "great_recession_impact": { "job_loss_percent": -5.0 }
            },
            "education_data": { "percent_college_educated": 41.2, "workforce_quality_rating": "High" }
        }))
        .unwrap_or_default();

        let lines = details(&payload);

        assert_eq!(
            labels(&lines),
            vec![
                "College Educated",
                "Workforce Quality",
                "Resilience",
                "COVID Job Loss",
                "Great Recession Job Loss"
            ]
        );
        assert_eq!(lines[2].value, "6.8 (Moderate)");
        assert_eq!(lines[4].value, "-5%");
    }
}
