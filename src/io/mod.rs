//! Input/output helpers.
//!
//! - raw payload loading from JSON files (`payload`)
//! - chart exports (JSON/CSV) (`export`)

pub mod export;
pub mod payload;

pub use export::*;
pub use payload::*;
