//! Run-length segmentation of relay state pairs.

use sv_core::{SystemLabel, TimeStep, Timestamp};

use crate::align::AlignedRelays;
use crate::classify::RelayPair;
use crate::periods::ControlPeriods;

/// Split the aligned relays into periods of constant state pair.
///
/// A period opens at the first sample of each run. It closes one `step`
/// before the next run starts, or at `window_end` for the final run. Ends
/// are clamped so that no period ends before it starts.
///
/// A change between two pairs that map to the same label (relay B toggling
/// while relay A is energized) still closes one period and opens another.
pub fn segment(aligned: &AlignedRelays, window_end: Timestamp, step: TimeStep) -> ControlPeriods {
    let mut periods = ControlPeriods::empty();
    let mut previous: Option<RelayPair> = None;
    let mut open: Option<(SystemLabel, Timestamp)> = None;

    for (timestamp, pair) in aligned.iter() {
        if previous != Some(pair) {
            if let Some((label, start)) = open.take() {
                let end = timestamp
                    .checked_sub_signed(step.delta())
                    .unwrap_or(start)
                    .max(start);
                periods.push(label, start, end);
            }
            open = Some((pair.label(), timestamp));
        }
        previous = Some(pair);
    }

    if let Some((label, start)) = open {
        periods.push(label, start, window_end.max(start));
    }

    periods
}
