//! Data sources for the dashboard.
//!
//! - `api`: the job-market HTTP API
//! - `sample`: deterministic generated data for offline/demo runs

use std::sync::Arc;

use crate::domain::{DashboardConfig, Forecast, HistoryPoint, Horizon, KpiSnapshot, TitleList};
use crate::error::{AppError, FetchError};

pub mod api;
pub mod sample;

pub use api::ApiClient;
pub use sample::SampleSource;

/// Where fetched payloads come from.
///
/// Implementations are shared across worker threads by the TUI.
pub trait DashboardSource: Send + Sync {
    /// Short human-readable origin, used in advisories.
    fn describe(&self) -> String;

    fn fetch_titles(&self) -> Result<TitleList, FetchError>;

    fn fetch_kpis(&self) -> Result<KpiSnapshot, FetchError>;

    fn fetch_history(&self, title: &str) -> Result<Vec<HistoryPoint>, FetchError>;

    fn fetch_forecast(&self, title: &str, horizon: Horizon) -> Result<Forecast, FetchError>;
}

/// Build the source selected by `config`.
pub fn source_from_config(config: &DashboardConfig) -> Result<Arc<dyn DashboardSource>, AppError> {
    if config.demo {
        tracing::info!(seed = config.seed, "using generated demo data");
        return Ok(Arc::new(SampleSource::new(config.seed)));
    }
    let client = ApiClient::new(&config.api_url, config.timeout)?;
    tracing::info!(api_url = %client.base_url(), "using job-market API");
    Ok(Arc::new(client))
}
