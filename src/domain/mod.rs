//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the raw wire payload (`RawStatistics` and its tagged leaves)
//! - the normalized record (`NormalizedStatistics`)
//! - chart-ready points (`RevenuePoint`, `OrderTrendPoint`, `StatusSlice`, `BookRankEntry`)
//! - order status codes and their display labels (`OrderStatus`, `StatusLabels`)

pub mod status;
pub mod types;

pub use status::*;
pub use types::*;
