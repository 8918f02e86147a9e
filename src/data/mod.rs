//! Where statistics payloads come from.
//!
//! - `client`: the fetch collaborator (`StatisticsSource`) and its HTTP implementation
//! - `cache`: a keyed query cache with a freshness window

pub mod cache;
pub mod client;

pub use cache::*;
pub use client::*;
