//! Shared derived-data logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetched payloads -> KPI boards / merged series -> summary stats
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use serde::Serialize;

use crate::data::DashboardSource;
use crate::domain::{Forecast, HistoryPoint, Horizon, MergedPoint, SummaryStats, TitleList};
use crate::error::{AppError, Resource};
use crate::report::{KpiBoards, extract_kpis};
use crate::series::{align, forecast_stats, history_stats};

/// Everything the predict page shows, derived from the latest payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictView {
    pub title: String,
    pub horizon: Horizon,
    pub history: Vec<HistoryPoint>,
    pub forecast: Forecast,
    pub merged: Vec<MergedPoint>,
    pub history_stats: Option<SummaryStats>,
    pub forecast_stats: Option<SummaryStats>,
}

impl PredictView {
    /// Rebuild every derived value from scratch.
    pub fn derive(
        title: impl Into<String>,
        horizon: Horizon,
        history: Vec<HistoryPoint>,
        forecast: Forecast,
    ) -> Self {
        let merged = align(&history, &forecast.points);
        let history_stats = history_stats(&history);
        let forecast_stats = forecast_stats(&forecast);
        Self {
            title: title.into(),
            horizon,
            history,
            forecast,
            merged,
            history_stats,
            forecast_stats,
        }
    }
}

/// Fetch the title list.
pub fn load_titles(source: &dyn DashboardSource) -> Result<TitleList, AppError> {
    source
        .fetch_titles()
        .map_err(|e| e.into_app_error(Resource::Titles))
}

/// Fetch the KPI snapshot and cut it to top-N boards.
pub fn run_kpis(source: &dyn DashboardSource, top_n: usize) -> Result<KpiBoards, AppError> {
    let snapshot = source
        .fetch_kpis()
        .map_err(|e| e.into_app_error(Resource::Kpis))?;
    Ok(extract_kpis(Some(&snapshot), top_n))
}

/// Fetch history and forecast for `title` and derive the predict view.
///
/// A failed history fetch is an error. A failed forecast is not: the view is
/// derived from the history alone and the advisory comes back next to it.
pub fn run_predict(
    source: &dyn DashboardSource,
    title: &str,
    horizon: Horizon,
) -> Result<(PredictView, Option<String>), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::new(2, "No job title selected."));
    }
    let history = source
        .fetch_history(title)
        .map_err(|e| e.into_app_error(Resource::History))?;
    let (forecast, advisory) = match source.fetch_forecast(title, horizon) {
        Ok(forecast) => (forecast, None),
        Err(err) => {
            tracing::warn!(title, error = %err, "forecast failed; showing history only");
            (Forecast::default(), Some(err.advisory(Resource::Forecast)))
        }
    };

    tracing::debug!(
        title,
        history = history.len(),
        forecast = forecast.points.len(),
        "derived predict view"
    );
    Ok((PredictView::derive(title, horizon, history, forecast), advisory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleSource;
    use crate::domain::{ForecastPoint, KpiSnapshot, Metric};
    use crate::error::FetchError;

    #[test]
    fn derive_is_pure() {
        let history = vec![
            HistoryPoint::new("2024-01", 1000.0),
            HistoryPoint::new("2024-02", "bad"),
        ];
        let forecast = Forecast {
            points: vec![ForecastPoint::new("2024-03", 1200.0)],
            model: "Linear".to_string(),
        };
        let a = PredictView::derive("Nurse", Horizon::Three, history.clone(), forecast.clone());
        let b = PredictView::derive("Nurse", Horizon::Three, history, forecast);
        assert_eq!(a, b);
        assert_eq!(a.merged.len(), 3);
        assert_eq!(a.merged[1].avg_salary, Some(Metric::NotANumber("bad".to_string())));
        assert_eq!(a.history_stats.map(|s| s.last), Some(1000.0));
        assert_eq!(a.forecast_stats.map(|s| s.max), Some(1200.0));
    }

    #[test]
    fn run_predict_against_demo_source() {
        let source = SampleSource::new(11);
        let (view, advisory) = run_predict(&source, "Nurse", Horizon::Six).unwrap();
        assert!(advisory.is_none());
        assert_eq!(view.forecast.points.len(), 6);
        assert_eq!(view.merged.len(), view.history.len() + 6);
        assert!(view.history_stats.is_some());
    }

    #[test]
    fn run_predict_surfaces_server_message() {
        let source = SampleSource::new(11);
        let err = run_predict(&source, "Astronaut", Horizon::Six).unwrap_err();
        assert_eq!(err.to_string(), "No data found for title: Astronaut");
        assert!(run_predict(&source, "  ", Horizon::Six).is_err());
    }

    /// Serves history but refuses every forecast, like a series too short to model.
    struct HistoryOnly;

    impl DashboardSource for HistoryOnly {
        fn describe(&self) -> String {
            "history only".to_string()
        }

        fn fetch_titles(&self) -> Result<TitleList, FetchError> {
            Ok(vec!["Nurse".to_string()])
        }

        fn fetch_kpis(&self) -> Result<KpiSnapshot, FetchError> {
            Ok(KpiSnapshot::default())
        }

        fn fetch_history(&self, _title: &str) -> Result<Vec<HistoryPoint>, FetchError> {
            Ok(vec![HistoryPoint::new("2024-01-01", 3000.0)])
        }

        fn fetch_forecast(&self, _title: &str, _horizon: Horizon) -> Result<Forecast, FetchError> {
            Err(FetchError::Application {
                status: 400,
                message: Some("Insufficient history (< 8 months)".to_string()),
            })
        }
    }

    #[test]
    fn forecast_failure_keeps_history() {
        let (view, advisory) = run_predict(&HistoryOnly, "Nurse", Horizon::Six).unwrap();
        assert_eq!(advisory.as_deref(), Some("Insufficient history (< 8 months)"));
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.merged.len(), 1);
        assert!(view.forecast.points.is_empty());
        assert_eq!(view.history_stats.map(|s| s.last), Some(3000.0));
        assert!(view.forecast_stats.is_none());
    }

    #[test]
    fn run_kpis_truncates() {
        let source = SampleSource::new(2);
        let boards = run_kpis(&source, 3).unwrap();
        assert_eq!(boards.openings.len(), 3);
        assert_eq!(boards.growth.len(), 3);
        assert_eq!(load_titles(&source).unwrap().len(), 12);
    }
}
