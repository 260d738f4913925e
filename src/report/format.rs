//! Display formatters.
//!
//! Every function here is total: a value that is not a number comes back as
//! the text it arrived with, never as an error.

use crate::domain::{Metric, SummaryStats};

/// Default maximum label length before truncation.
pub const DEFAULT_LABEL_MAX: usize = 22;

/// Shown wherever a derived value is absent.
pub const PLACEHOLDER: &str = "—";

const ELLIPSIS: char = '…';

/// Compact magnitude: `1.5M`, `2.5k`, `42`.
pub fn fmt_compact(value: &Metric) -> String {
    let Metric::Number(n) = value else {
        return passthrough(value);
    };
    let n = *n;
    if n.abs() >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n.abs() >= 1_000.0 {
        format!("{:.1}k", n / 1_000.0)
    } else {
        // Half-up, so 2.5 -> 3 and -2.5 -> -2.
        format!("{}", (n + 0.5).floor() as i64)
    }
}

/// Compact magnitude for plain floats (axis ticks).
pub fn fmt_compact_f64(value: f64) -> String {
    fmt_compact(&Metric::from(value))
}

/// Integer-rounded amount with `,` thousands grouping: `1234567.8` -> `1,234,568`.
pub fn fmt_money(value: &Metric) -> String {
    let Metric::Number(n) = value else {
        return passthrough(value);
    };
    // Formatting the rounded float keeps amounts beyond the i64 range exact.
    let rounded = n.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `€` + compact magnitude.
pub fn fmt_euro_compact(value: &Metric) -> String {
    format!("€{}", fmt_compact(value))
}

/// `€` + grouped amount.
pub fn fmt_euro_money(value: &Metric) -> String {
    format!("€{}", fmt_money(value))
}

/// Percentage with a fixed number of decimals: `12.3%`.
pub fn fmt_percent(value: &Metric, decimals: usize) -> String {
    match value {
        Metric::Number(n) => format!("{n:.decimals$}%"),
        Metric::NotANumber(_) => passthrough(value),
    }
}

/// Keep `label` if it fits in `max` characters, else cut it and append `…`.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max).collect();
    out.push(ELLIPSIS);
    out
}

/// `truncate_label` with the default width.
pub fn truncate_default(label: &str) -> String {
    truncate_label(label, DEFAULT_LABEL_MAX)
}

/// `€last` or the placeholder.
pub fn fmt_stat_headline(stats: Option<&SummaryStats>) -> String {
    match stats {
        Some(s) => fmt_euro_compact(&Metric::Number(s.last)),
        None => PLACEHOLDER.to_string(),
    }
}

/// `min €x • max €y`, or empty when absent.
pub fn fmt_stat_range(stats: Option<&SummaryStats>) -> String {
    match stats {
        Some(s) => format!(
            "min {} • max {}",
            fmt_euro_compact(&Metric::Number(s.min)),
            fmt_euro_compact(&Metric::Number(s.max)),
        ),
        None => String::new(),
    }
}

/// Money cell for an optional merged value.
pub fn fmt_optional_money(value: Option<&Metric>) -> String {
    value.map(fmt_euro_money).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn passthrough(value: &Metric) -> String {
    match value {
        Metric::Number(n) => n.to_string(),
        Metric::NotANumber(raw) => raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Metric {
        Metric::Number(v)
    }

    #[test]
    fn compact_magnitudes() {
        assert_eq!(fmt_compact(&num(1_500_000.0)), "1.5M");
        assert_eq!(fmt_compact(&num(2500.0)), "2.5k");
        assert_eq!(fmt_compact(&num(42.0)), "42");
        assert_eq!(fmt_compact(&num(41.5)), "42");
        assert_eq!(fmt_compact(&num(-2_000_000.0)), "-2.0M");
        assert_eq!(fmt_compact(&num(-0.4)), "0");
        assert_eq!(fmt_compact(&Metric::NotANumber("oops".to_string())), "oops");
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(fmt_money(&num(1_234_567.8)), "1,234,568");
        assert_eq!(fmt_money(&num(999.4)), "999");
        assert_eq!(fmt_money(&num(1000.0)), "1,000");
        assert_eq!(fmt_money(&num(-45_000.0)), "-45,000");
        assert_eq!(fmt_money(&num(0.0)), "0");
        assert_eq!(fmt_money(&Metric::NotANumber("n/a".to_string())), "n/a");
    }

    #[test]
    fn money_beyond_i64_is_not_clamped() {
        assert_eq!(fmt_money(&num(1e19)), "10,000,000,000,000,000,000");
        assert_eq!(fmt_money(&num(-1e19)), "-10,000,000,000,000,000,000");
        assert_eq!(fmt_money(&num(-0.4)), "0");
        assert_eq!(fmt_euro_money(&num(3100.0)), "€3,100");
    }

    #[test]
    fn percent_uses_requested_precision() {
        assert_eq!(fmt_percent(&num(12.345), 1), "12.3%");
        assert_eq!(fmt_percent(&num(12.6), 0), "13%");
        assert_eq!(fmt_percent(&Metric::NotANumber("?".to_string()), 1), "?");
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_label("Senior Software Engineer II", 10), "Senior Sof…");
        assert_eq!(truncate_label("ok", 10), "ok");
        assert_eq!(truncate_label("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_label("Ingénieur logiciel", 4), "Ingé…");
        assert_eq!(
            truncate_default("Customer Support Specialist"),
            "Customer Support Speci…"
        );
    }

    #[test]
    fn stat_cards_degrade_to_placeholder() {
        assert_eq!(fmt_stat_headline(None), PLACEHOLDER);
        assert_eq!(fmt_stat_range(None), "");

        let stats = SummaryStats { last: 2000.0, min: 1000.0, max: 3000.0 };
        assert_eq!(fmt_stat_headline(Some(&stats)), "€2.0k");
        assert_eq!(fmt_stat_range(Some(&stats)), "min €1.0k • max €3.0k");
        assert_eq!(fmt_optional_money(None), PLACEHOLDER);
    }
}
