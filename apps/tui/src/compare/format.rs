use crate::models::SectorGrowth;
use serde::Serialize;
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";

/// Display rule applied to a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `$12,345`
    Currency,
    /// `4.25%`, at most two decimals
    Percent,
    /// `1,234,567`
    Thousands,
    Decimal(usize),
}

impl Format {
    fn apply(self, number: f64) -> String {
        match self {
            Self::Currency => {
                let sign = if number.round() < 0.0 { "-" } else { "" };
                format!("{sign}${}", group_thousands(number.abs()))
            }
            Self::Percent => format!("{}%", trim_number(number, 2)),
            Self::Thousands => group_thousands(number),
            Self::Decimal(places) => format!("{number:.places$}"),
        }
    }
}

/// Formats a resolved value for a grid cell.
///
/// A formatter only applies to numbers; anything else falls back to the
/// unformatted rule, where objects, arrays and missing values become `N/A`.
pub fn format_value(value: Option<&Value>, format: Option<Format>) -> String {
    match (value, format) {
        (Some(Value::Number(number)), Some(format)) => number
            .as_f64()
            .map_or_else(|| number.to_string(), |number| format.apply(number)),
        (Some(value), _) => raw_text(value),
        (None, _) => NOT_AVAILABLE.to_string(),
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => raw_number(number),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => NOT_AVAILABLE.to_string(),
    }
}

/// Whole-valued floats print without a fractional part: `85000.0` -> `85000`.
fn raw_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.is_finite() => {
            trim_number(value, 0)
        }
        _ => number.to_string(),
    }
}

/// Rounds to `max_decimals` places and strips trailing zeros: `5.0` -> `5`, `2.50` -> `2.5`.
pub fn trim_number(number: f64, max_decimals: usize) -> String {
    let fixed = format!("{number:.max_decimals$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Rounds to an integer and inserts `,` every three digits.
pub fn group_thousands(number: f64) -> String {
    let rounded = format!("{:.0}", number.round());
    let (sign, digits) = rounded
        .strip_prefix('-')
        .map_or(("", rounded.as_str()), |digits| ("-", digits));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if grouped == "0" {
        grouped
    } else {
        format!("{sign}{grouped}")
    }
}

/// A sector rendered as `"<name>: <growth>%"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorBadge {
    pub name: String,
    pub growth_percent: f64,
    pub text: String,
    pub positive: bool,
}

impl SectorBadge {
    pub fn new(name: impl Into<String>, growth_percent: f64) -> Self {
        let name = name.into();
        Self {
            text: format!("{name}: {}%", trim_number(growth_percent, 2)),
            positive: growth_percent > 0.0,
            name,
            growth_percent,
        }
    }

    /// Reads `{name, growth_percent}` (or the backend's `growth` spelling).
    /// Anything else is malformed.
    pub fn from_value(value: &Value) -> Option<Self> {
        let name = value.get("name")?.as_str()?;
        let growth = value
            .get("growth_percent")
            .or_else(|| value.get("growth"))?
            .as_f64()?;
        Some(Self::new(name, growth))
    }

    pub fn from_sector(sector: &SectorGrowth) -> Option<Self> {
        sector
            .growth_percent
            .map(|growth| Self::new(sector.name.clone(), growth))
    }
}
