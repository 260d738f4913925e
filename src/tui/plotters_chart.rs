//! Plotters-powered salary trend chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{MergedPoint, Metric};
use crate::report::format::fmt_compact_f64;

/// Render-ready series for the trend chart.
///
/// X values are positions in the merged sequence; `labels[i]` is the period
/// shown under position `i`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrendSeries {
    pub history: Vec<(f64, f64)>,
    pub forecast: Vec<(f64, f64)>,
    pub labels: Vec<String>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl TrendSeries {
    /// Build series from the merged sequence. `None` when nothing is numeric.
    pub fn from_merged(merged: &[MergedPoint]) -> Option<Self> {
        let history = numeric(merged, |m| m.avg_salary.as_ref());
        let forecast = numeric(merged, |m| m.predicted_salary.as_ref());

        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(_, y) in history.iter().chain(forecast.iter()) {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !(y_min.is_finite() && y_max.is_finite()) {
            return None;
        }
        if y_max <= y_min {
            let pad = (y_min.abs() * 0.05).max(1.0);
            y_min -= pad;
            y_max += pad;
        }
        let pad = ((y_max - y_min) * 0.05).max(1e-12);

        let x_max = (merged.len().saturating_sub(1) as f64).max(1.0);

        Some(Self {
            history,
            forecast,
            labels: merged.iter().map(|m| m.month.clone()).collect(),
            x_bounds: [0.0, x_max],
            y_bounds: [y_min - pad, y_max + pad],
        })
    }

    fn label_at(&self, x: f64) -> String {
        let idx = x.round();
        if idx < 0.0 {
            return String::new();
        }
        self.labels
            .get(idx as usize)
            .map(|m| short_month(m))
            .unwrap_or_default()
    }
}

fn numeric<F>(merged: &[MergedPoint], field: F) -> Vec<(f64, f64)>
where
    F: Fn(&MergedPoint) -> Option<&Metric>,
{
    merged
        .iter()
        .enumerate()
        .filter_map(|(i, m)| field(m).and_then(Metric::as_f64).map(|y| (i as f64, y)))
        .collect()
}

/// `2024-03-01` -> `2024-03`; anything else is shown as received.
fn short_month(label: &str) -> String {
    match label.get(..7) {
        Some(prefix) if label.len() == 10 && label.as_bytes().get(7) == Some(&b'-') => prefix.to_string(),
        _ => label.to_string(),
    }
}

/// A lightweight, render-only chart description.
pub struct TrendChart<'a> {
    pub series: &'a TrendSeries,
}

impl<'a> Widget for TrendChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let series = self.series;
        let [x0, x1] = series.x_bounds;
        let [y0, y1] = series.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(4)
                .y_labels(5)
                .x_label_formatter(&|v| series.label_at(*v))
                .y_label_formatter(&|v| format!("€{}", fmt_compact_f64(*v)))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let history_color = RGBColor(0, 255, 255); // cyan
            let forecast_color = RGBColor(255, 200, 0); // amber

            chart.draw_series(LineSeries::new(series.history.iter().copied(), &history_color))?;
            chart.draw_series(LineSeries::new(series.forecast.iter().copied(), &forecast_color))?;

            // Circle markers render oversized through this backend; pixels read fine.
            chart.draw_series(series.history.iter().map(|&p| Pixel::new(p, history_color)))?;
            chart.draw_series(series.forecast.iter().map(|&p| Pixel::new(p, forecast_color)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ForecastPoint, HistoryPoint};
    use crate::series::align;

    #[test]
    fn series_follow_merged_positions() {
        let merged = align(
            &[
                HistoryPoint::new("2024-01-01", 3000.0),
                HistoryPoint::new("2024-02-01", "n/a"),
            ],
            &[ForecastPoint::new("2024-03-01", 3300.0)],
        );
        let series = TrendSeries::from_merged(&merged).unwrap();
        assert_eq!(series.history, vec![(0.0, 3000.0)]);
        assert_eq!(series.forecast, vec![(2.0, 3300.0)]);
        assert_eq!(series.x_bounds, [0.0, 2.0]);
        assert!(series.y_bounds[0] < 3000.0 && series.y_bounds[1] > 3300.0);
        assert_eq!(series.label_at(1.2), "2024-02");
        assert_eq!(series.label_at(7.0), "");
    }

    #[test]
    fn nothing_numeric_means_no_chart() {
        let merged = align(&[HistoryPoint::new("2024-01-01", "n/a")], &[]);
        assert!(TrendSeries::from_merged(&merged).is_none());
        assert!(TrendSeries::from_merged(&[]).is_none());
    }

    #[test]
    fn short_month_keeps_unusual_labels() {
        assert_eq!(short_month("2024-05-01"), "2024-05");
        assert_eq!(short_month("Q1 2024"), "Q1 2024");
    }
}
