//! Aggregations and rendered reports over inventory records.
//!
//! # Responsibility
//! - Reduce PC statuses into tallies (overall and per lab).
//! - Compute dashboard counters.
//! - Render the per-lab PC status chart as standalone SVG.

pub mod chart;
pub mod stats;
