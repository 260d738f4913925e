//! Export the merged history/forecast series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::domain::{MergedPoint, Metric};
use crate::error::AppError;

const HEADER: [&str; 5] = [
    "month",
    "avg_salary",
    "predicted_salary",
    "predicted_lower",
    "predicted_upper",
];

/// Write the merged series to a CSV file.
///
/// Absent values are empty cells; non-numeric values are written as received.
pub fn write_merged_csv(path: &Path, merged: &[MergedPoint]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for m in merged {
        writer
            .write_record([
                m.month.clone(),
                cell(m.avg_salary.as_ref()),
                cell(m.predicted_salary.as_ref()),
                cell(m.predicted_lower.as_ref()),
                cell(m.predicted_upper.as_ref()),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    tracing::info!(path = %path.display(), rows = merged.len(), "wrote merged series CSV");
    Ok(())
}

/// `<dir>/jm_trend_<title-slug>_<timestamp>.csv`, creating `dir` if needed.
pub fn timestamped_export_path(dir: &Path, title: &str, now: DateTime<Local>) -> Result<PathBuf, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create export dir '{}': {e}", dir.display())))?;
    let ts = now.format("%Y%m%d_%H%M%S");
    Ok(dir.join(format!("jm_trend_{}_{ts}.csv", slug(title))))
}

fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

fn cell(value: Option<&Metric>) -> String {
    match value {
        None => String::new(),
        Some(Metric::Number(v)) => v.to_string(),
        Some(Metric::NotANumber(raw)) => raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::domain::{ForecastPoint, HistoryPoint};
    use crate::series::align;

    #[test]
    fn writes_header_and_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.csv");
        let merged = align(
            &[HistoryPoint::new("2024-01-01", 3000.0), HistoryPoint::new("2024-02-01", "n/a")],
            &[ForecastPoint::new("2024-03-01", 3100.5)],
        );

        write_merged_csv(&path, &merged).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "month,avg_salary,predicted_salary,predicted_lower,predicted_upper");
        assert_eq!(lines[1], "2024-01-01,3000,,,");
        assert_eq!(lines[2], "2024-02-01,n/a,,,");
        assert_eq!(lines[3], "2024-03-01,,3100.5,,");
    }

    #[test]
    fn export_path_is_slugged_and_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let path = timestamped_export_path(&dir.path().join("exports"), "Senior Software Engineer II", now)
            .unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "jm_trend_senior_software_engineer_ii_20250304_050607.csv"
        );
        assert_eq!(slug("  ***  "), "untitled");
    }
}
