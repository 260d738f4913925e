//! Read/write trend JSON files.
//!
//! A trend file is the portable form of a predict view: the fetched history and
//! forecast plus the selection they were fetched for. Derived values (merged
//! series, stats) are not stored; they are re-derived on load.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::pipeline::PredictView;
use crate::domain::{Forecast, ForecastPoint, HistoryPoint, Horizon};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub horizon: Horizon,
    pub model: String,
    pub history: Vec<HistoryPoint>,
    pub forecast: Vec<ForecastPoint>,
}

impl TrendFile {
    pub fn from_view(view: &PredictView, generated_at: DateTime<Utc>) -> Self {
        Self {
            tool: "jm".to_string(),
            generated_at,
            title: view.title.clone(),
            horizon: view.horizon,
            model: view.forecast.model.clone(),
            history: view.history.clone(),
            forecast: view.forecast.points.clone(),
        }
    }

    pub fn into_view(self) -> PredictView {
        PredictView::derive(
            self.title,
            self.horizon,
            self.history,
            Forecast {
                points: self.forecast,
                model: self.model,
            },
        )
    }
}

/// Write a trend JSON file.
pub fn write_trend_json(path: &Path, view: &PredictView) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create trend JSON '{}': {e}", path.display())))?;

    let trend = TrendFile::from_view(view, Utc::now());
    serde_json::to_writer_pretty(file, &trend)
        .map_err(|e| AppError::new(2, format!("Failed to write trend JSON: {e}")))?;

    tracing::info!(path = %path.display(), title = %view.title, "wrote trend JSON");
    Ok(())
}

/// Read a trend JSON file.
pub fn read_trend_json(path: &Path) -> Result<TrendFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open trend JSON '{}': {e}", path.display())))?;
    let trend: TrendFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid trend JSON: {e}")))?;
    Ok(trend)
}
