//! Control-period reconstruction for the stand's relay switch.
//!
//! Two relays select which of three control systems drives the stand. Their
//! histories are stored as independent time series. This crate turns those
//! two series back into "which system was in charge, and when":
//!
//! 1. [`align_and_filter`] drops null samples and pairs the relays up
//! 2. [`segment`] runs a single pass over the state pairs, opening a new
//!    period whenever the pair changes
//! 3. [`reconstruct`] chains both and degrades to an empty result on
//!    missing or mismatched data
//!
//! The resulting [`ControlPeriods`] tiles `[first sample, window_end]`, with
//! adjacent periods separated by one [`TimeStep`](sv_core::TimeStep).

pub mod align;
pub mod classify;
pub mod error;
pub mod periods;
pub mod reconstruct;
pub mod segment;

pub use align::{AlignedRelays, align_and_filter};
pub use classify::{RelayPair, classify};
pub use error::{PeriodError, PeriodResult};
pub use periods::{ControlPeriods, Interval, PeriodList};
pub use reconstruct::reconstruct;
pub use segment::segment;
