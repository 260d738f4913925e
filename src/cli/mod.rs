//! Command-line parsing for the job-market dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data-shaping code.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_API_URL, DEFAULT_TIMEOUT_MS, DEFAULT_TOP_N, DashboardConfig, Horizon};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "jm", version, about = "Job-market analytics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the job titles that have history.
    Titles(SourceArgs),
    /// Print the top-N openings, salary and growth boards.
    Kpis(KpiArgs),
    /// Print history + forecast stats, the merged series and a plot for one title.
    Predict(PredictArgs),
    /// Plot a previously exported trend JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same derived-data pipeline as `jm kpis` / `jm predict`,
    /// but renders results in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Where data comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Base URL of the job-market API.
    #[arg(long, env = "JM_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// HTTP timeout in milliseconds.
    #[arg(long, env = "JM_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Serve generated demo data instead of calling the API.
    #[arg(long)]
    pub demo: bool,

    /// Seed for demo data.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for the KPI boards.
#[derive(Debug, Args, Clone)]
pub struct KpiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Entries per board.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
}

/// Options for a single-title prediction report.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Job title (prompted for when omitted).
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Forecast horizon in months.
    #[arg(long, value_enum, default_value_t = Horizon::Six)]
    pub horizon: Horizon,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 18)]
    pub height: usize,

    /// Export the merged series to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export history + forecast to a trend JSON (re-plot with `jm plot`).
    #[arg(long = "export-trend")]
    pub export_trend: Option<PathBuf>,
}

/// Options for plotting a saved trend.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Trend JSON file produced by `jm predict --export-trend`.
    #[arg(long, value_name = "JSON")]
    pub trend: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 18)]
    pub height: usize,
}

/// Options for the interactive dashboard.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Entries per KPI board.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Preselect this title instead of the first one.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Initial forecast horizon in months.
    #[arg(long, value_enum, default_value_t = Horizon::Six)]
    pub horizon: Horizon,

    /// Append logs to this file (the terminal is owned by the UI).
    #[arg(long, env = "JM_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn to_config(&self, top_n: usize, horizon: Horizon) -> DashboardConfig {
        DashboardConfig {
            api_url: self.api_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            top_n,
            horizon,
            demo: self.demo,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_args_parse() {
        let cli = Cli::try_parse_from([
            "jm", "predict", "--demo", "-t", "Nurse", "--horizon", "12", "--no-plot",
        ])
        .unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.title.as_deref(), Some("Nurse"));
        assert_eq!(args.horizon, Horizon::Twelve);
        assert!(args.no_plot);

        let config = args.source.to_config(DEFAULT_TOP_N, args.horizon);
        assert!(config.demo);
        assert_eq!(config.horizon, Horizon::Twelve);
    }

    #[test]
    fn unsupported_horizon_is_rejected() {
        assert!(Cli::try_parse_from(["jm", "predict", "--horizon", "5"]).is_err());
    }

    #[test]
    fn kpis_top_defaults() {
        let cli = Cli::try_parse_from(["jm", "kpis", "--top", "7"]).unwrap();
        let Command::Kpis(args) = cli.command else {
            panic!("expected kpis");
        };
        assert_eq!(args.top, 7);
        assert_eq!(args.source.timeout_ms, DEFAULT_TIMEOUT_MS);
    }
}
