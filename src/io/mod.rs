//! Input/output helpers.
//!
//! - merged series CSV exports (`export`)
//! - trend JSON read/write (`trend`)

pub mod export;
pub mod trend;

pub use export::*;
pub use trend::*;
