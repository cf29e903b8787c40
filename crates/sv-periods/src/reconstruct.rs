//! Relay series → control periods, degrading to "no data" on bad input.

use sv_core::{TimeStep, Timestamp};
use sv_series::Signal;

use crate::align::align_and_filter;
use crate::error::PeriodError;
use crate::periods::ControlPeriods;
use crate::segment::segment;

/// Reconstruct which control system was active over time.
///
/// `window_end` closes the final period; pass the query end or "now".
/// Mismatched or missing relay data yields [`ControlPeriods::empty`] and a
/// log line rather than an error.
pub fn reconstruct(
    relay_a: &Signal,
    relay_b: &Signal,
    window_end: Timestamp,
    step: TimeStep,
) -> ControlPeriods {
    match align_and_filter(relay_a, relay_b) {
        Ok(aligned) => segment(&aligned, window_end, step),
        Err(err @ PeriodError::LengthMismatch { .. }) => {
            tracing::warn!(%err, "relay histories cannot be paired");
            ControlPeriods::empty()
        }
        Err(PeriodError::InsufficientData) => {
            tracing::debug!("no valid relay samples in window");
            ControlPeriods::empty()
        }
    }
}
