//! Time-series primitives for standview.
//!
//! Samples arrive from the stand's time-series store as `(timestamp, value)`
//! pairs where the value may be missing. This crate holds the sample and
//! signal types plus the two cleaning passes applied before any analysis:
//!
//! - validity filtering (drop samples without a value)
//! - outlier filtering (drop values outside physical bounds)

pub mod filter;
pub mod outlier;
pub mod sample;

pub use filter::filter_valid;
pub use outlier::{Bounds, OutlierFilter};
pub use sample::{Sample, Signal};
