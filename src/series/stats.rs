//! Summary statistics over a numeric field of a series.

use crate::domain::{Forecast, HistoryPoint, SummaryStats};

/// Compute `{last, min, max}` of `field` over `records`.
///
/// `field` returns `None` for values that failed numeric coercion; those are
/// skipped entirely. `last` is the final numeric value in the order given.
/// Returns `None` when no record yields a number.
pub fn summarize<T, F>(records: &[T], field: F) -> Option<SummaryStats>
where
    F: Fn(&T) -> Option<f64>,
{
    records
        .iter()
        .filter_map(field)
        .fold(None, |acc, v| {
            Some(match acc {
                None => SummaryStats { last: v, min: v, max: v },
                Some(s) => SummaryStats {
                    last: v,
                    min: s.min.min(v),
                    max: s.max.max(v),
                },
            })
        })
}

/// Stats over the observed average salary.
pub fn history_stats(history: &[HistoryPoint]) -> Option<SummaryStats> {
    summarize(history, |p| p.avg_salary.as_f64())
}

/// Stats over the predicted salary.
pub fn forecast_stats(forecast: &Forecast) -> Option<SummaryStats> {
    summarize(&forecast.points, |p| p.predicted_salary.as_f64())
}
