//! Time-series reconciliation.
//!
//! - aligning observed history with a model forecast (`align`)
//! - last/min/max summaries over a numeric field (`stats`)

pub mod align;
pub mod stats;

pub use align::*;
pub use stats::*;
