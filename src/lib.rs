//! `bookstore-stats` library crate.
//!
//! The binary (`bookstats`) is a thin wrapper around this library so that:
//!
//! - normalization and the chart transforms are testable without spawning processes
//! - the pipeline can be driven from any payload source (HTTP, file, canned value)

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod normalize;
pub mod plot;
pub mod report;
pub mod transform;
