//! Validity filtering.

use crate::sample::Signal;

/// Keep only the samples that carry a value, preserving order.
///
/// Never fails; an all-null signal filters down to an empty one.
pub fn filter_valid(signal: &Signal) -> Signal {
    signal.iter().copied().filter(|s| s.is_valid()).collect()
}
