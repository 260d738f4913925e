//! `jobmarket-dash` library crate.
//!
//! The binary (`jm`) is a thin wrapper around this library so that:
//!
//! - the derived-data core is testable without spawning processes or a network
//! - the CLI report and the TUI share one implementation of the core
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod series;
pub mod tui;
