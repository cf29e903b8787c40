//! Filtering and pairing of the two relay series.

use sv_core::Timestamp;
use sv_series::{Signal, filter_valid};

use crate::classify::RelayPair;
use crate::error::{PeriodError, PeriodResult};

/// Relay states paired index-by-index with a shared timestamp column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedRelays {
    timestamps: Vec<Timestamp>,
    pairs: Vec<RelayPair>,
}

impl AlignedRelays {
    /// Build from parallel columns, which must all have the same length.
    pub fn new(timestamps: Vec<Timestamp>, relay_a: &[bool], relay_b: &[bool]) -> PeriodResult<Self> {
        if relay_a.len() != relay_b.len() {
            return Err(PeriodError::LengthMismatch {
                a: relay_a.len(),
                b: relay_b.len(),
            });
        }
        if timestamps.len() != relay_a.len() {
            return Err(PeriodError::LengthMismatch {
                a: timestamps.len(),
                b: relay_a.len(),
            });
        }
        let pairs = relay_a
            .iter()
            .zip(relay_b)
            .map(|(&a, &b)| RelayPair::new(a, b))
            .collect();
        Ok(Self { timestamps, pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn pairs(&self) -> &[RelayPair] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, RelayPair)> + '_ {
        self.timestamps.iter().copied().zip(self.pairs.iter().copied())
    }
}

/// Filter both relays for validity and pair them by index.
///
/// Equal length after filtering is taken as proof that the relays were
/// sampled together; timestamps come from relay A. Index positions where
/// the two timestamps disagree are only reported at debug level.
pub fn align_and_filter(relay_a: &Signal, relay_b: &Signal) -> PeriodResult<AlignedRelays> {
    let a = filter_valid(relay_a);
    let b = filter_valid(relay_b);

    if a.len() != b.len() {
        return Err(PeriodError::LengthMismatch {
            a: a.len(),
            b: b.len(),
        });
    }
    if a.is_empty() {
        return Err(PeriodError::InsufficientData);
    }

    let skewed = a
        .iter()
        .zip(b.iter())
        .filter(|(sa, sb)| sa.timestamp != sb.timestamp)
        .count();
    if skewed > 0 {
        tracing::debug!(skewed, total = a.len(), "relay timestamps differ at matching indices");
    }

    let (timestamps, pairs): (Vec<Timestamp>, Vec<RelayPair>) = a
        .iter()
        .zip(b.iter())
        .filter_map(|(sa, sb)| {
            let pair = RelayPair::from_values(sa.valid_value()?, sb.valid_value()?);
            Some((sa.timestamp, pair))
        })
        .unzip();

    Ok(AlignedRelays { timestamps, pairs })
}
