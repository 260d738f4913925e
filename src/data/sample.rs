//! Generated job-market data for offline runs (`--demo`).
//!
//! Everything is derived from the seed and the title, so the same seed always
//! produces the same titles, KPIs, history and forecast.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Months, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::DashboardSource;
use crate::domain::{
    Forecast, ForecastPoint, HistoryPoint, Horizon, KpiRow, KpiSnapshot, Metric, TitleList,
};
use crate::error::FetchError;

/// Titles served in demo mode, sorted like the API sorts them.
const SAMPLE_TITLES: [&str; 12] = [
    "Accountant",
    "Backend Developer",
    "Customer Support Specialist",
    "Data Analyst",
    "Data Engineer",
    "DevOps Engineer",
    "Graphic Designer",
    "Marketing Manager",
    "Nurse",
    "Product Manager",
    "Sales Representative",
    "Senior Software Engineer II",
];

/// Months of history per title.
const HISTORY_MONTHS: u32 = 24;

/// Growth list length, matching `salary_growth_top10`.
const GROWTH_LIST_LEN: usize = 10;

/// Label of the demo forecast.
const SAMPLE_MODEL: &str = "Drift";

/// Per-title parameters of the generated series.
#[derive(Debug, Clone, Copy)]
struct TitleProfile {
    base_salary: f64,
    monthly_drift: f64,
    noise_sd: f64,
    monthly_openings: f64,
}

#[derive(Debug, Clone)]
pub struct SampleSource {
    seed: u64,
    first_month: NaiveDate,
}

impl SampleSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            first_month: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        }
    }

    fn resolve_title(&self, title: &str) -> Result<&'static str, FetchError> {
        SAMPLE_TITLES
            .iter()
            .find(|t| t.eq_ignore_ascii_case(title.trim()))
            .copied()
            .ok_or_else(|| FetchError::Application {
                status: 404,
                message: Some(format!("No data found for title: {title}")),
            })
    }

    fn rng_for(&self, title: &str, purpose: &str) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        title.hash(&mut hasher);
        purpose.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }

    fn profile(&self, title: &str) -> TitleProfile {
        let mut rng = self.rng_for(title, "profile");
        TitleProfile {
            base_salary: rng.gen_range(1_800.0..6_500.0),
            monthly_drift: rng.gen_range(-0.004..0.012),
            noise_sd: rng.gen_range(20.0..120.0),
            monthly_openings: rng.gen_range(40.0..900.0),
        }
    }

    fn month_label(&self, offset: u32) -> Option<String> {
        self.first_month
            .checked_add_months(Months::new(offset))
            .map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Raw salary values for the history of `title`.
    fn history_values(&self, title: &str) -> Result<Vec<f64>, FetchError> {
        let profile = self.profile(title);
        let normal = Normal::new(0.0, profile.noise_sd)
            .map_err(|e| FetchError::Transport(format!("noise distribution error: {e}")))?;
        let mut rng = self.rng_for(title, "history");

        Ok((0..HISTORY_MONTHS)
            .map(|t| {
                let trend = profile.base_salary * (1.0 + profile.monthly_drift).powi(t as i32);
                (trend + normal.sample(&mut rng)).max(0.0)
            })
            .collect())
    }
}

impl DashboardSource for SampleSource {
    fn describe(&self) -> String {
        format!("demo data (seed {})", self.seed)
    }

    fn fetch_titles(&self) -> Result<TitleList, FetchError> {
        Ok(SAMPLE_TITLES.iter().map(|t| t.to_string()).collect())
    }

    fn fetch_kpis(&self) -> Result<KpiSnapshot, FetchError> {
        let mut openings = Vec::with_capacity(SAMPLE_TITLES.len());
        let mut salary = Vec::with_capacity(SAMPLE_TITLES.len());
        let mut growth = Vec::with_capacity(SAMPLE_TITLES.len());

        for title in SAMPLE_TITLES {
            let profile = self.profile(title);
            let values = self.history_values(title)?;

            let count = (profile.monthly_openings * HISTORY_MONTHS as f64).round();
            let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
            openings.push((title, count));
            salary.push((title, mean));

            if let (Some(first), Some(last)) = (values.first(), values.last()) {
                if *first > 0.0 {
                    growth.push((title, (last - first) / first * 100.0));
                }
            }
        }

        Ok(KpiSnapshot {
            openings_by_title: Some(ranked_desc(openings, usize::MAX)),
            salary_by_title: Some(ranked_desc(salary, usize::MAX)),
            growth_by_title: Some(ranked_desc(growth, GROWTH_LIST_LEN)),
        })
    }

    fn fetch_history(&self, title: &str) -> Result<Vec<HistoryPoint>, FetchError> {
        let title = self.resolve_title(title)?;
        let values = self.history_values(title)?;

        Ok(values
            .into_iter()
            .enumerate()
            .filter_map(|(t, v)| {
                self.month_label(t as u32)
                    .map(|month| HistoryPoint { month, avg_salary: Metric::from(v) })
            })
            .collect())
    }

    fn fetch_forecast(&self, title: &str, horizon: Horizon) -> Result<Forecast, FetchError> {
        let title = self.resolve_title(title)?;
        let profile = self.profile(title);
        let values = self.history_values(title)?;
        let last = values.last().copied().unwrap_or(profile.base_salary);

        let points = (1..=horizon.periods())
            .filter_map(|k| {
                let month = self.month_label(HISTORY_MONTHS - 1 + k)?;
                let predicted = last * (1.0 + profile.monthly_drift).powi(k as i32);
                let spread = profile.noise_sd * (k as f64).sqrt();
                Some(ForecastPoint {
                    month,
                    predicted_salary: Metric::from(predicted),
                    yhat_lower: Some(Metric::from(predicted - 1.96 * spread)),
                    yhat_upper: Some(Metric::from(predicted + 1.96 * spread)),
                })
            })
            .collect();

        Ok(Forecast {
            points,
            model: SAMPLE_MODEL.to_string(),
        })
    }
}

/// Sort descending by value (ties by title) and keep at most `limit` rows.
fn ranked_desc(mut rows: Vec<(&str, f64)>, limit: usize) -> Vec<KpiRow> {
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    rows.into_iter()
        .take(limit)
        .map(|(title, value)| KpiRow::new(title, value))
        .collect()
}
