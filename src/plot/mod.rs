//! Terminal charts for the dashboard.

pub mod ascii;

pub use ascii::*;
