//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - picks the data source (API or demo data)
//! - prints boards, tables and plots
//! - writes optional exports

use std::sync::Arc;

use clap::Parser;

use crate::cli::{Command, KpiArgs, PlotArgs, PredictArgs, SourceArgs, TuiArgs};
use crate::data::{DashboardSource, source_from_config};
use crate::domain::{DEFAULT_TOP_N, DashboardConfig, Horizon};
use crate::error::AppError;
use crate::logging::{self, LogTarget};

pub mod fence;
pub mod pipeline;

/// Entry point for the `jm` binary.
pub fn run() -> Result<(), AppError> {
    // Missing `.env` is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    // We want `jm` and `jm --demo` to behave like `jm tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Titles(args) => {
            logging::init(LogTarget::Stderr)?;
            handle_titles(args)
        }
        Command::Kpis(args) => {
            logging::init(LogTarget::Stderr)?;
            handle_kpis(args)
        }
        Command::Predict(args) => {
            logging::init(LogTarget::Stderr)?;
            handle_predict(args)
        }
        Command::Plot(args) => {
            logging::init(LogTarget::Stderr)?;
            handle_plot(args)
        }
        Command::Tui(args) => {
            match &args.log_file {
                Some(path) => logging::init(LogTarget::File(path))?,
                None => logging::init(LogTarget::Off)?,
            }
            handle_tui(args)
        }
    }
}

fn connect(config: &DashboardConfig) -> Result<Arc<dyn DashboardSource>, AppError> {
    source_from_config(config)
}

fn handle_titles(args: SourceArgs) -> Result<(), AppError> {
    let config = args.to_config(DEFAULT_TOP_N, Horizon::default());
    let source = connect(&config)?;
    let titles = pipeline::load_titles(source.as_ref())?;
    print!("{}", crate::report::format_titles(&titles));
    Ok(())
}

fn handle_kpis(args: KpiArgs) -> Result<(), AppError> {
    let config = config_from_kpi_args(&args);
    let source = connect(&config)?;
    let boards = pipeline::run_kpis(source.as_ref(), config.top_n)?;
    print!("{}", crate::report::format_kpi_boards(&boards));
    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = config_from_predict_args(&args);
    let source = connect(&config)?;

    let title = match args.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => {
            let titles = pipeline::load_titles(source.as_ref())?;
            crate::cli::picker::prompt_for_title(&titles)?
        }
    };

    let (view, advisory) = pipeline::run_predict(source.as_ref(), &title, config.horizon)?;

    println!("{}", crate::report::format_stat_cards(&view));
    println!("{}", crate::report::format_merged_table(&view.merged));

    if !args.no_plot {
        println!("{}", crate::plot::render_trend_plot(&view.merged, args.width, args.height));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_merged_csv(path, &view.merged)?;
    }
    if let Some(path) = &args.export_trend {
        crate::io::trend::write_trend_json(path, &view)?;
    }

    // Partial report: history is printed above, the forecast failure goes last.
    if let Some(advisory) = advisory {
        eprintln!("{advisory}");
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let view = crate::io::trend::read_trend_json(&args.trend)?.into_view();

    println!("{}", crate::report::format_stat_cards(&view));
    println!("{}", crate::plot::render_trend_plot(&view.merged, args.width, args.height));
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let config = args.source.to_config(args.top, args.horizon);
    let source = connect(&config)?;
    crate::tui::run(source, &config, args.title.as_deref())
}

pub fn config_from_kpi_args(args: &KpiArgs) -> DashboardConfig {
    args.source.to_config(args.top, Horizon::default())
}

pub fn config_from_predict_args(args: &PredictArgs) -> DashboardConfig {
    args.source.to_config(DEFAULT_TOP_N, args.horizon)
}

/// Rewrite argv so `jm` defaults to `jm tui`.
///
/// Rules:
/// - `jm`                      -> `jm tui`
/// - `jm --demo ...`           -> `jm tui --demo ...`
/// - `jm --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "titles" | "kpis" | "predict" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_tui() {
        assert_eq!(rewrite_args(argv(&["jm"])), argv(&["jm", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["jm", "--demo", "-t", "Nurse"])),
            argv(&["jm", "tui", "--demo", "-t", "Nurse"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["jm", "kpis", "--top", "3"])), argv(&["jm", "kpis", "--top", "3"]));
        assert_eq!(rewrite_args(argv(&["jm", "--help"])), argv(&["jm", "--help"]));
    }

    #[test]
    fn predict_config_carries_horizon() {
        let cli = crate::cli::Cli::parse_from(["jm", "predict", "--horizon", "3", "--timeout-ms", "250"]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        let config = config_from_predict_args(&args);
        assert_eq!(config.horizon, Horizon::Three);
        assert_eq!(config.timeout, std::time::Duration::from_millis(250));
        assert_eq!(config.top_n, DEFAULT_TOP_N);
    }
}
