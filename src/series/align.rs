//! Merge a history series and a forecast series into one display sequence.
//!
//! Records are keyed by period label. Labels are formatted so that string
//! order is chronological order (`YYYY-MM` / `YYYY-MM-DD`), so the output is
//! simply the key order of a `BTreeMap`.

use std::collections::BTreeMap;

use crate::domain::{ForecastPoint, HistoryPoint, MergedPoint};

/// Align `history` and `forecast` by period label.
///
/// Pass 1 inserts every history point (a repeated label overwrites the earlier
/// one). Pass 2 sets the predicted value on existing records or creates
/// forecast-only records; observed values already present are kept.
pub fn align(history: &[HistoryPoint], forecast: &[ForecastPoint]) -> Vec<MergedPoint> {
    let mut by_period: BTreeMap<&str, MergedPoint> = BTreeMap::new();

    for h in history {
        by_period.insert(
            h.month.as_str(),
            MergedPoint {
                month: h.month.clone(),
                avg_salary: Some(h.avg_salary.clone()),
                ..MergedPoint::default()
            },
        );
    }

    for f in forecast {
        let record = by_period
            .entry(f.month.as_str())
            .or_insert_with(|| MergedPoint {
                month: f.month.clone(),
                ..MergedPoint::default()
            });
        record.predicted_salary = Some(f.predicted_salary.clone());
        record.predicted_lower = f.yhat_lower.clone();
        record.predicted_upper = f.yhat_upper.clone();
    }

    by_period.into_values().collect()
}
