//! Shared domain types.
//!
//! Payload types deserialize straight from the API's JSON. Numeric fields are
//! kept as `Metric` so a value the upstream service got wrong (a string, a
//! `null`) survives decoding and is handled by the derived-data functions
//! instead of failing the whole response.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default base URL of the job-market API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Default number of entries shown per KPI board.
pub const DEFAULT_TOP_N: usize = 8;

/// Default HTTP timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// A numeric field as received from the API.
///
/// `NotANumber` keeps the original text so formatters can echo it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Metric {
    Number(f64),
    NotANumber(String),
}

impl Metric {
    /// Coerce a JSON value.
    ///
    /// Numbers and numeric strings become `Number` when finite; everything
    /// else is `NotANumber` with its textual form (`null` reads as empty).
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Metric::Number(v),
                _ => Metric::NotANumber(n.to_string()),
            },
            Value::String(s) => Metric::parse(s),
            other => Metric::NotANumber(label_text(other)),
        }
    }

    /// Coerce free text the same way a JSON string is coerced.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Metric::Number(v),
            _ => Metric::NotANumber(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Metric::Number(v) => Some(*v),
            Metric::NotANumber(_) => None,
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::NotANumber(String::new())
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Metric::Number(value)
        } else {
            Metric::NotANumber(value.to_string())
        }
    }
}

impl From<&str> for Metric {
    fn from(value: &str) -> Self {
        Metric::parse(value)
    }
}

impl From<Value> for Metric {
    fn from(value: Value) -> Self {
        Metric::from_json(&value)
    }
}

impl From<Metric> for Value {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Number(v) => serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Metric::NotANumber(s) => Value::String(s),
        }
    }
}

/// Text form of a JSON value used for labels: strings as-is, `null` as empty,
/// anything else as its JSON text.
pub fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Serde helper: decode any JSON value into a label string.
pub fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(label_text(&value))
}

/// Ordered, distinct job titles. The first entry is the default selection.
pub type TitleList = Vec<String>;

/// One row of a ranked KPI list.
///
/// The three lists carry their metric under different keys; they all land in
/// `value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiRow {
    #[serde(default)]
    pub job_title: Value,
    #[serde(
        default,
        rename = "value",
        alias = "job_count",
        alias = "avg_salary",
        alias = "growth_pct"
    )]
    pub value: Metric,
}

impl KpiRow {
    pub fn new(job_title: impl Into<String>, value: impl Into<Metric>) -> Self {
        Self {
            job_title: Value::String(job_title.into()),
            value: value.into(),
        }
    }
}

/// Point-in-time aggregate bundle returned by `/api/kpis`.
///
/// Each list is expected pre-sorted descending by its metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    #[serde(rename = "top_jobs_openings", default)]
    pub openings_by_title: Option<Vec<KpiRow>>,
    #[serde(rename = "top_jobs_salary", default)]
    pub salary_by_title: Option<Vec<KpiRow>>,
    #[serde(rename = "salary_growth_top10", default)]
    pub growth_by_title: Option<Vec<KpiRow>>,
}

/// Observed average salary for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(default, deserialize_with = "deserialize_label")]
    pub month: String,
    #[serde(default)]
    pub avg_salary: Metric,
}

impl HistoryPoint {
    pub fn new(month: impl Into<String>, avg_salary: impl Into<Metric>) -> Self {
        Self {
            month: month.into(),
            avg_salary: avg_salary.into(),
        }
    }
}

/// Predicted salary for one period.
///
/// Bounds are only present for models that report an interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(default, deserialize_with = "deserialize_label")]
    pub month: String,
    #[serde(default)]
    pub predicted_salary: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yhat_lower: Option<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yhat_upper: Option<Metric>,
}

impl ForecastPoint {
    pub fn new(month: impl Into<String>, predicted_salary: impl Into<Metric>) -> Self {
        Self {
            month: month.into(),
            predicted_salary: predicted_salary.into(),
            yhat_lower: None,
            yhat_upper: None,
        }
    }
}

/// A forecast response: points plus the model label shared by all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
    pub model: String,
}

/// One record of the aligned history/forecast sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedPoint {
    pub month: String,
    pub avg_salary: Option<Metric>,
    pub predicted_salary: Option<Metric>,
    pub predicted_lower: Option<Metric>,
    pub predicted_upper: Option<Metric>,
}

/// `{last, min, max}` over the numeric values of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub last: f64,
    pub min: f64,
    pub max: f64,
}

/// Number of future periods requested from the forecast service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(into = "u32", try_from = "u32")]
pub enum Horizon {
    #[value(name = "3")]
    Three,
    #[default]
    #[value(name = "6")]
    Six,
    #[value(name = "12")]
    Twelve,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Three, Horizon::Six, Horizon::Twelve];

    pub fn periods(self) -> u32 {
        match self {
            Horizon::Three => 3,
            Horizon::Six => 6,
            Horizon::Twelve => 12,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Horizon::Three => Horizon::Six,
            Horizon::Six => Horizon::Twelve,
            Horizon::Twelve => Horizon::Three,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Horizon::Three => Horizon::Twelve,
            Horizon::Six => Horizon::Three,
            Horizon::Twelve => Horizon::Six,
        }
    }
}

impl From<Horizon> for u32 {
    fn from(value: Horizon) -> Self {
        value.periods()
    }
}

impl TryFrom<u32> for Horizon {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Horizon::ALL
            .into_iter()
            .find(|h| h.periods() == value)
            .ok_or_else(|| format!("unsupported horizon {value} (expected 3, 6 or 12)"))
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mo", self.periods())
    }
}

/// The two dashboard views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Kpis,
    Predict,
}

impl Page {
    pub fn toggle(self) -> Self {
        match self {
            Page::Kpis => Page::Predict,
            Page::Predict => Page::Kpis,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Page::Kpis => "KPIs",
            Page::Predict => "Predict",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Page::Kpis => "Openings, salary leaders, and salary growth insights",
            Page::Predict => "Select job title + horizon, then load history / forecast",
        }
    }
}

/// Runtime configuration as understood by the data layer and front-ends.
///
/// Derived from CLI flags, environment and `.env` (plus defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub top_n: usize,
    pub horizon: Horizon,
    /// Serve generated data instead of calling the API.
    pub demo: bool,
    pub seed: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            top_n: DEFAULT_TOP_N,
            horizon: Horizon::default(),
            demo: false,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metric_coerces_numbers_and_numeric_strings() {
        assert_eq!(Metric::from_json(&json!(3000)), Metric::Number(3000.0));
        assert_eq!(Metric::from_json(&json!(" 12.5 ")), Metric::Number(12.5));
        assert_eq!(
            Metric::from_json(&json!("bad")),
            Metric::NotANumber("bad".to_string())
        );
        assert_eq!(Metric::from_json(&json!(null)), Metric::NotANumber(String::new()));
        assert_eq!(
            Metric::from_json(&json!(true)),
            Metric::NotANumber("true".to_string())
        );
        assert_eq!(Metric::parse("NaN"), Metric::NotANumber("NaN".to_string()));
        assert_eq!(Metric::from(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn history_tolerates_odd_fields() {
        let raw = json!([
            {"month": "2024-01-01", "avg_salary": 3000},
            {"month": "2024-02-01", "avg_salary": "oops"},
            {"month": 202403},
        ]);
        let points: Vec<HistoryPoint> = serde_json::from_value(raw).unwrap();
        assert_eq!(points[0].avg_salary, Metric::Number(3000.0));
        assert_eq!(points[1].avg_salary, Metric::NotANumber("oops".to_string()));
        assert_eq!(points[2].month, "202403");
        assert_eq!(points[2].avg_salary, Metric::default());
    }

    #[test]
    fn kpi_rows_accept_each_metric_key() {
        let raw = json!({
            "top_jobs_openings": [{"job_title": "Nurse", "job_count": 120}],
            "top_jobs_salary": [{"job_title": "Surgeon", "avg_salary": 9000.5}],
            "salary_growth_top10": null
        });
        let snapshot: KpiSnapshot = serde_json::from_value(raw).unwrap();
        let openings = snapshot.openings_by_title.unwrap();
        assert_eq!(openings[0].value, Metric::Number(120.0));
        assert_eq!(snapshot.salary_by_title.unwrap()[0].value, Metric::Number(9000.5));
        assert!(snapshot.growth_by_title.is_none());
    }

    #[test]
    fn horizon_cycles_and_round_trips() {
        assert_eq!(Horizon::default().periods(), 6);
        assert_eq!(Horizon::Twelve.next(), Horizon::Three);
        assert_eq!(Horizon::Three.prev(), Horizon::Twelve);
        assert_eq!(Horizon::try_from(12).unwrap(), Horizon::Twelve);
        assert!(Horizon::try_from(5).is_err());
        assert_eq!(serde_json::to_value(Horizon::Three).unwrap(), json!(3));
    }
}
