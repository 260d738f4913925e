//! Terminal plotting for the CLI front-end.

pub mod ascii;

pub use ascii::*;
