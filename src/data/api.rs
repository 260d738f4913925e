//! Job-market API integration.
//!
//! Endpoints:
//! - `GET /api/titles`
//! - `GET /api/kpis`
//! - `GET /api/history?title=<t>`
//! - `GET /api/forecast?title=<t>&horizon=<3|6|12>`

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::data::DashboardSource;
use crate::domain::{Forecast, ForecastPoint, HistoryPoint, Horizon, KpiSnapshot, TitleList, label_text};
use crate::error::{AppError, FetchError};

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::new(2, "API base URL must not be empty."));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?query, "GET");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| {
                warn!(%url, error = %e, "request failed");
                FetchError::Transport(format!("request to {url} failed: {e}"))
            })?;

        let status = resp.status();
        let body = resp.text().map_err(|e| {
            warn!(%url, error = %e, "failed to read response body");
            FetchError::Transport(format!("failed to read response from {url}: {e}"))
        })?;

        let decoded = decode_response(status.as_u16(), status.is_success(), &body);
        if let Err(err) = &decoded {
            warn!(%url, status = status.as_u16(), error = %err, "unusable response");
        }
        decoded
    }
}

impl DashboardSource for ApiClient {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn fetch_titles(&self) -> Result<TitleList, FetchError> {
        let body: TitlesResponse = self.get_json("/api/titles", &[])?;
        Ok(body.titles.unwrap_or_default().iter().map(label_text).collect())
    }

    fn fetch_kpis(&self) -> Result<KpiSnapshot, FetchError> {
        self.get_json("/api/kpis", &[])
    }

    fn fetch_history(&self, title: &str) -> Result<Vec<HistoryPoint>, FetchError> {
        let body: HistoryResponse = self.get_json("/api/history", &[("title", title.to_string())])?;
        Ok(body.history.unwrap_or_default())
    }

    fn fetch_forecast(&self, title: &str, horizon: Horizon) -> Result<Forecast, FetchError> {
        let body: ForecastResponse = self.get_json(
            "/api/forecast",
            &[
                ("title", title.to_string()),
                ("horizon", horizon.periods().to_string()),
            ],
        )?;
        Ok(Forecast {
            points: body.forecast.unwrap_or_default(),
            model: body.model.as_ref().map(label_text).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TitlesResponse {
    #[serde(default)]
    titles: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Option<Vec<HistoryPoint>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    forecast: Option<Vec<ForecastPoint>>,
    #[serde(default)]
    model: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<Value>,
}

/// Turn a status + body into a payload or a classified failure.
fn decode_response<T: DeserializeOwned>(status: u16, success: bool, body: &str) -> Result<T, FetchError> {
    if !success {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error)
            .map(|v| label_text(&v))
            .filter(|m| !m.trim().is_empty());
        return Err(FetchError::Application { status, message });
    }

    serde_json::from_str(body).map_err(|e| FetchError::Transport(format!("malformed response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Metric;

    #[test]
    fn decodes_history_payload() {
        let body = r#"{"job_title":"Nurse","history":[{"month":"2024-01-01","avg_salary":3000.5}]}"#;
        let decoded: HistoryResponse = decode_response(200, true, body).unwrap();
        let history = decoded.history.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].month, "2024-01-01");
        assert_eq!(history[0].avg_salary, Metric::Number(3000.5));
    }

    #[test]
    fn decodes_forecast_with_bounds() {
        let body = r#"{"model":"Prophet","forecast":[
            {"month":"2025-01-01","predicted_salary":4100,"yhat_lower":3900,"yhat_upper":4300}
        ]}"#;
        let decoded: ForecastResponse = decode_response(200, true, body).unwrap();
        let points = decoded.forecast.unwrap();
        assert_eq!(points[0].yhat_lower, Some(Metric::Number(3900.0)));
        assert_eq!(decoded.model, Some(Value::String("Prophet".to_string())));
    }

    #[test]
    fn missing_lists_decode_as_absent() {
        let decoded: HistoryResponse = decode_response(200, true, "{}").unwrap();
        assert!(decoded.history.is_none());
        let decoded: HistoryResponse = decode_response(200, true, r#"{"history":null}"#).unwrap();
        assert!(decoded.history.is_none());
    }

    #[test]
    fn error_field_becomes_application_error() {
        let err = decode_response::<HistoryResponse>(
            404,
            false,
            r#"{"error":"No data found for title: Astronaut"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            FetchError::Application {
                status: 404,
                message: Some("No data found for title: Astronaut".to_string()),
            }
        );
    }

    #[test]
    fn non_json_error_body_has_no_message() {
        let err = decode_response::<HistoryResponse>(502, false, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err, FetchError::Application { status: 502, message: None });
    }

    #[test]
    fn malformed_success_body_is_transport_failure() {
        let err = decode_response::<TitlesResponse>(200, true, "not json").unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:5000/ ", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert!(ApiClient::new("  ", Duration::from_secs(1)).is_err());
    }
}
