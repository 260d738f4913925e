//! Reporting utilities: KPI extraction, value formatting, and terminal tables.

use serde::Serialize;

use crate::domain::{KpiRow, KpiSnapshot, Metric, label_text};

pub mod format;
pub mod tables;

pub use format::*;
pub use tables::*;

/// One display-ready entry of a KPI board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub title: String,
    pub value: Metric,
}

/// Which ranked list a board comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiKind {
    Openings,
    Salary,
    Growth,
}

impl KpiKind {
    pub const ALL: [KpiKind; 3] = [KpiKind::Openings, KpiKind::Salary, KpiKind::Growth];

    pub fn title(self) -> &'static str {
        match self {
            KpiKind::Openings => "Top Jobs by Openings",
            KpiKind::Salary => "Top Jobs by Salary",
            KpiKind::Growth => "Salary Growth Leaders",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            KpiKind::Openings => "Most postings (aggregated monthly)",
            KpiKind::Salary => "Highest average salaries (monthly mean)",
            KpiKind::Growth => "Top % growth from first to last month",
        }
    }

    /// Detail formatting for a board value.
    pub fn fmt_value(self, value: &Metric) -> String {
        match self {
            KpiKind::Openings => fmt_compact(value),
            KpiKind::Salary => fmt_euro_money(value),
            KpiKind::Growth => fmt_percent(value, 1),
        }
    }
}

/// Top-N slices of the three KPI lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiBoards {
    pub openings: Vec<RankedEntry>,
    pub salary: Vec<RankedEntry>,
    pub growth: Vec<RankedEntry>,
}

impl KpiBoards {
    pub fn board(&self, kind: KpiKind) -> &[RankedEntry] {
        match kind {
            KpiKind::Openings => &self.openings,
            KpiKind::Salary => &self.salary,
            KpiKind::Growth => &self.growth,
        }
    }
}

/// Take the first `top_n` entries of each list.
///
/// Lists are trusted to be sorted descending upstream; order is never
/// changed here. A missing snapshot or list gives an empty board.
pub fn extract_kpis(snapshot: Option<&KpiSnapshot>, top_n: usize) -> KpiBoards {
    let Some(snapshot) = snapshot else {
        return KpiBoards::default();
    };

    KpiBoards {
        openings: take_top(snapshot.openings_by_title.as_deref(), top_n),
        salary: take_top(snapshot.salary_by_title.as_deref(), top_n),
        growth: take_top(snapshot.growth_by_title.as_deref(), top_n),
    }
}

fn take_top(rows: Option<&[KpiRow]>, top_n: usize) -> Vec<RankedEntry> {
    rows.unwrap_or_default()
        .iter()
        .take(top_n)
        .map(|row| RankedEntry {
            title: label_text(&row.job_title),
            value: row.value.clone(),
        })
        .collect()
}
