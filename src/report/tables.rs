//! Formatted terminal output for the CLI front-end.
//!
//! We keep table layout in one place so the derived-data code stays free of
//! presentation concerns and output changes stay localized.

use crate::app::pipeline::PredictView;
use crate::domain::MergedPoint;
use crate::report::format::{
    PLACEHOLDER, fmt_optional_money, fmt_stat_headline, fmt_stat_range, truncate_label,
};
use crate::report::{KpiBoards, KpiKind};

/// Label width used by KPI boards.
pub const BOARD_LABEL_MAX: usize = 24;

/// Label width used for the selected-title card.
pub const CARD_TITLE_MAX: usize = 28;

/// Numbered title list.
pub fn format_titles(titles: &[String]) -> String {
    let mut out = String::new();
    if titles.is_empty() {
        out.push_str("(no titles)\n");
        return out;
    }
    for (idx, title) in titles.iter().enumerate() {
        out.push_str(&format!("{:>3}) {title}\n", idx + 1));
    }
    out
}

/// The three KPI boards, one table each.
pub fn format_kpi_boards(boards: &KpiBoards) -> String {
    let mut out = String::new();

    for (i, kind) in KpiKind::ALL.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{} ({})\n", kind.title(), kind.subtitle()));

        let rows = boards.board(kind);
        if rows.is_empty() {
            out.push_str(&format!("  {PLACEHOLDER}\n"));
            continue;
        }

        out.push_str(format!("{:>3} {:<24} {:>12}\n", "#", "job title", "value").trim_end());
        out.push('\n');
        out.push_str(format!("{:-<3} {:-<24} {:-<12}\n", "", "", "").trim_end());
        out.push('\n');

        for (rank, entry) in rows.iter().enumerate() {
            out.push_str(
                format!(
                    "{:>3} {:<24} {:>12}\n",
                    rank + 1,
                    truncate_label(&entry.title, BOARD_LABEL_MAX),
                    kind.fmt_value(&entry.value),
                )
                .trim_end(),
            );
            out.push('\n');
        }
    }

    out
}

/// The four stat cards of the predict view.
pub fn format_stat_cards(view: &PredictView) -> String {
    let mut out = String::new();

    let title = if view.title.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        truncate_label(&view.title, CARD_TITLE_MAX)
    };
    let model = if view.forecast.model.is_empty() {
        PLACEHOLDER
    } else {
        view.forecast.model.as_str()
    };

    out.push_str(&format!("Selected title            : {title} (horizon {})\n", view.horizon));
    out.push_str(
        format!(
            "History (last avg)        : {} {}\n",
            fmt_stat_headline(view.history_stats.as_ref()),
            fmt_stat_range(view.history_stats.as_ref()),
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "Forecast (last predicted) : {} {}\n",
            fmt_stat_headline(view.forecast_stats.as_ref()),
            fmt_stat_range(view.forecast_stats.as_ref()),
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("Forecast model            : {model}\n"));

    out
}

/// The merged history/forecast sequence as a table.
pub fn format_merged_table(merged: &[MergedPoint]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<12} {:>14} {:>14} {:>14} {:>14}\n",
            "period", "history", "forecast", "lower", "upper"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<14} {:-<14} {:-<14} {:-<14}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for m in merged {
        out.push_str(
            format!(
                "{:<12} {:>14} {:>14} {:>14} {:>14}\n",
                truncate_label(&m.month, 12),
                fmt_optional_money(m.avg_salary.as_ref()),
                fmt_optional_money(m.predicted_salary.as_ref()),
                fmt_optional_money(m.predicted_lower.as_ref()),
                fmt_optional_money(m.predicted_upper.as_ref()),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Forecast, ForecastPoint, Horizon, HistoryPoint, KpiRow, KpiSnapshot};
    use crate::report::extract_kpis;

    #[test]
    fn boards_render_ranks_and_formatted_values() {
        let snapshot = KpiSnapshot {
            openings_by_title: Some(vec![KpiRow::new("Senior Software Engineer II", 2500.0)]),
            salary_by_title: Some(vec![KpiRow::new("Surgeon", 91_250.0)]),
            growth_by_title: None,
        };
        let text = format_kpi_boards(&extract_kpis(Some(&snapshot), 8));

        assert!(text.contains("Top Jobs by Openings"));
        assert!(text.contains("  1 Senior Software Engineer…"));
        assert!(text.contains("2.5k"));
        assert!(text.contains("€91,250"));
        assert!(text.contains("Salary Growth Leaders"));
        assert!(text.contains(&format!("  {PLACEHOLDER}")));
    }

    #[test]
    fn stat_cards_show_placeholders_without_data() {
        let view = PredictView::derive("", Horizon::Six, Vec::new(), Forecast::default());
        let text = format_stat_cards(&view);
        assert!(text.contains("Selected title            : —"));
        assert!(text.contains("Forecast model            : —"));
    }

    #[test]
    fn merged_table_marks_absent_values() {
        let view = PredictView::derive(
            "Nurse",
            Horizon::Three,
            vec![HistoryPoint::new("2024-01-01", 3000.0)],
            Forecast {
                points: vec![ForecastPoint::new("2024-02-01", 3100.0)],
                model: "Linear".to_string(),
            },
        );
        let text = format_merged_table(&view.merged);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("2024-01-01"));
        assert!(lines[2].contains("€3,000"));
        assert!(lines[3].contains("€3,100"));
        assert!(lines[3].contains(PLACEHOLDER));

        let cards = format_stat_cards(&view);
        assert!(cards.contains("€3.0k"));
        assert!(cards.contains("Linear"));
    }

    #[test]
    fn titles_are_numbered() {
        let text = format_titles(&["Nurse".to_string(), "Chef".to_string()]);
        assert_eq!(text, "  1) Nurse\n  2) Chef\n");
    }
}
