use crate::models::{value_has_error, JobGrowthResult};
use serde_json::{Map, Value};

/// Overlays `granular` onto `county` at the top level.
///
/// County fields are the base layer and granular fields win on collision.
/// Absent or errored granular data contributes nothing; anything that is not
/// a JSON object on either side is ignored.
pub fn merge_records(county: Option<&Value>, granular: Option<&Value>) -> Value {
    let mut merged = Map::new();

    if let Some(Value::Object(base)) = county {
        merged.extend(base.iter().map(|(key, value)| (key.clone(), value.clone())));
    }

    if let Some(Value::Object(overlay)) = granular.filter(|record| !value_has_error(record)) {
        merged.extend(overlay.iter().map(|(key, value)| (key.clone(), value.clone())));
    }

    Value::Object(merged)
}

pub fn merged_record(result: &JobGrowthResult) -> Value {
    merge_records(result.county_context.as_ref(), result.granular_data.as_ref())
}

/// Walks `path` (`a.b.0.c`) through nested objects and arrays.
///
/// Numeric segments index arrays. Missing keys, out-of-range indexes, scalars
/// in the middle of the path and `null` all resolve to `None`.
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn granular_wins_and_county_only_keys_survive() {
        let county = json!({ "total_jobs": 500_000, "source": "BLS LAU", "wage_data": { "annual_equivalent": 80_000 } });
        let granular = json!({ "total_jobs": 1_200, "source": "Census ACS" });

        let merged = merge_records(Some(&county), Some(&granular));

        assert_eq!(merged["total_jobs"], json!(1_200));
        assert_eq!(merged["source"], json!("Census ACS"));
        assert_eq!(merged["wage_data"]["annual_equivalent"], json!(80_000));
    }

    #[test]
    fn errored_granular_contributes_nothing() {
        let county = json!({ "total_jobs": 500_000 });
        let granular = json!({ "error": "No Census data available", "total_jobs": 0 });

        let merged = merge_records(Some(&county), Some(&granular));

        assert_eq!(merged, county);
    }

    #[test]
    fn missing_layers_merge_to_empty_object() {
        assert_eq!(merge_records(None, None), json!({}));
        assert_eq!(merge_records(None, Some(&json!({ "a": 1 }))), json!({ "a": 1 }));
    }

    #[test]
    fn resolve_walks_objects_and_arrays() {
        let record = json!({
            "growth": { "1y": 2.5 },
            "top_sectors_growing": [{ "name": "Healthcare", "growth_percent": 5 }],
            "income_data": null
        });

        assert_eq!(resolve_path(&record, "growth.1y"), Some(&json!(2.5)));
        assert_eq!(
            resolve_path(&record, "top_sectors_growing.0.name"),
            Some(&json!("Healthcare"))
        );
        assert_eq!(resolve_path(&record, "top_sectors_growing.3"), None);
        assert_eq!(resolve_path(&record, "income_data.median_household_income"), None);
        assert_eq!(resolve_path(&record, "growth.1y.extra"), None);
        assert_eq!(resolve_path(&record, "income_data"), None);
    }

    fn flat_object() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-e]{1,2}", any::<i64>(), 0..8).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn merge_prefers_granular_on_every_key(county in flat_object(), granular in flat_object()) {
            let merged = merge_records(
                Some(&Value::Object(county.clone())),
                Some(&Value::Object(granular.clone())),
            );

            for (key, value) in &granular {
                prop_assert_eq!(&merged[key], value);
            }
            for (key, value) in county.iter().filter(|(key, _)| !granular.contains_key(*key)) {
                prop_assert_eq!(&merged[key], value);
            }
        }

        #[test]
        fn resolve_never_panics(path in "[a-z0-9.]{0,24}") {
            let record = json!({ "a": { "b": [1, { "c": null }] }, "0": "zero" });
            let _ = resolve_path(&record, &path);
        }
    }
}
