//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the dynamically typed value wrapper (`Metric`)
//! - fetched payloads (`KpiSnapshot`, `HistoryPoint`, `Forecast`)
//! - derived records (`MergedPoint`, `SummaryStats`)
//! - selection and configuration (`Horizon`, `Page`, `DashboardConfig`)

pub mod types;

pub use types::*;
