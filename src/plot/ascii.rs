//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - history: `*` markers joined by `-`
//! - forecast: `o` markers joined by `.`
//! - a period present in both series: `#`

use crate::domain::{MergedPoint, Metric};
use crate::report::format::fmt_compact_f64;

const HISTORY_MARK: char = '*';
const FORECAST_MARK: char = 'o';
const OVERLAP_MARK: char = '#';

/// Render the merged series as a dual-line plot.
///
/// The x axis is the position in the merged sequence; non-numeric values are
/// skipped.
pub fn render_trend_plot(merged: &[MergedPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let history = numeric_points(merged, |m| m.avg_salary.as_ref());
    let forecast = numeric_points(merged, |m| m.predicted_salary.as_ref());

    let Some((y_min, y_max)) = y_range(history.iter().chain(forecast.iter())) else {
        return "Plot: no numeric data to plot.\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let x_max = merged.len().saturating_sub(1);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so markers overlay them.
    draw_series_line(&mut grid, &history, x_max, y_min, y_max, '-');
    draw_series_line(&mut grid, &forecast, x_max, y_min, y_max, '.');

    for &(i, y) in &history {
        let (col, row) = cell(i, y, x_max, y_min, y_max, width, height);
        grid[row][col] = HISTORY_MARK;
    }
    for &(i, y) in &forecast {
        let (col, row) = cell(i, y, x_max, y_min, y_max, width, height);
        grid[row][col] = if grid[row][col] == HISTORY_MARK {
            OVERLAP_MARK
        } else {
            FORECAST_MARK
        };
    }

    let first = merged.first().map(|m| m.month.as_str()).unwrap_or("");
    let last = merged.last().map(|m| m.month.as_str()).unwrap_or("");

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: periods=[{first}, {last}] | y=[{}, {}]\n",
        fmt_compact_f64(y_min),
        fmt_compact_f64(y_max),
    ));
    out.push_str(&format!(
        "Legend: {HISTORY_MARK} history  {FORECAST_MARK} forecast  {OVERLAP_MARK} both\n"
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    let gap = width.saturating_sub(first.chars().count() + last.chars().count()).max(1);
    out.push_str(format!("{first}{}{last}", " ".repeat(gap)).trim_end());
    out.push('\n');

    out
}

fn numeric_points<F>(merged: &[MergedPoint], field: F) -> Vec<(usize, f64)>
where
    F: Fn(&MergedPoint) -> Option<&Metric>,
{
    merged
        .iter()
        .enumerate()
        .filter_map(|(i, m)| field(m).and_then(Metric::as_f64).map(|y| (i, y)))
        .collect()
}

fn y_range<'a>(points: impl Iterator<Item = &'a (usize, f64)>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // Flat series: open a band around the single level.
        let pad = (min_y.abs() * 0.05).max(1.0);
        Some((min_y - pad, max_y + pad))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, x_max: usize, width: usize) -> usize {
    if x_max == 0 {
        return 0;
    }
    let u = i as f64 / x_max as f64;
    (u.clamp(0.0, 1.0) * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn cell(i: usize, y: f64, x_max: usize, y_min: f64, y_max: f64, width: usize, height: usize) -> (usize, usize) {
    (map_x(i, x_max, width), map_y(y, y_min, y_max, height))
}

fn draw_series_line(
    grid: &mut [Vec<char>],
    points: &[(usize, f64)],
    x_max: usize,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    let height = grid.len();
    let width = grid[0].len();
    for pair in points.windows(2) {
        let (x0, y0) = cell(pair[0].0, pair[0].1, x_max, y_min, y_max, width, height);
        let (x1, y1) = cell(pair[1].0, pair[1].1, x_max, y_min, y_max, width, height);
        draw_line(grid, x0, y0, x1, y1, ch);
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
