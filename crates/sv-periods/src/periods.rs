//! Reconstructed control periods.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sv_core::{SystemLabel, Timestamp};

/// Start and end columns for one label, always the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodList {
    pub starts: Vec<Timestamp>,
    pub ends: Vec<Timestamp>,
}

impl PeriodList {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, Timestamp)> + '_ {
        self.starts.iter().copied().zip(self.ends.iter().copied())
    }
}

/// A single closed period during which `label` was in control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub label: SystemLabel,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Per-label periods; every label is present, possibly with no periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlPeriods {
    lists: BTreeMap<SystemLabel, PeriodList>,
}

impl Default for ControlPeriods {
    fn default() -> Self {
        Self::empty()
    }
}

impl ControlPeriods {
    /// Result with an empty list for each label.
    pub fn empty() -> Self {
        Self {
            lists: SystemLabel::ALL
                .into_iter()
                .map(|label| (label, PeriodList::default()))
                .collect(),
        }
    }

    /// Append a closed period for `label`.
    pub fn push(&mut self, label: SystemLabel, start: Timestamp, end: Timestamp) {
        let list = self.lists.entry(label).or_default();
        list.starts.push(start);
        list.ends.push(end);
    }

    pub fn get(&self, label: SystemLabel) -> &PeriodList {
        // `empty()` seeds every label and nothing removes one
        static EMPTY: PeriodList = PeriodList {
            starts: Vec::new(),
            ends: Vec::new(),
        };
        self.lists.get(&label).unwrap_or(&EMPTY)
    }

    pub fn starts(&self, label: SystemLabel) -> &[Timestamp] {
        &self.get(label).starts
    }

    pub fn ends(&self, label: SystemLabel) -> &[Timestamp] {
        &self.get(label).ends
    }

    pub fn intervals(&self, label: SystemLabel) -> Vec<Interval> {
        self.get(label)
            .iter()
            .map(|(start, end)| Interval { label, start, end })
            .collect()
    }

    /// All periods of all labels ordered by start.
    pub fn timeline(&self) -> Vec<Interval> {
        let mut all: Vec<Interval> = SystemLabel::ALL
            .into_iter()
            .flat_map(|label| self.intervals(label))
            .collect();
        all.sort_by_key(|iv| iv.start);
        all
    }

    pub fn interval_count(&self) -> usize {
        self.lists.values().map(PeriodList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.interval_count() == 0
    }

    /// Earliest start and latest end, if any period exists.
    pub fn covered_range(&self) -> Option<(Timestamp, Timestamp)> {
        let start = self.lists.values().flat_map(|l| l.starts.iter()).min()?;
        let end = self.lists.values().flat_map(|l| l.ends.iter()).max()?;
        Some((*start, *end))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SystemLabel, &PeriodList)> {
        self.lists.iter().map(|(label, list)| (*label, list))
    }

    /// Re-key the lists by display name, e.g. `system_1` → `lcgw`.
    ///
    /// Labels without a name keep their label string.
    pub fn named(&self, names: &BTreeMap<SystemLabel, String>) -> BTreeMap<String, PeriodList> {
        self.iter()
            .map(|(label, list)| {
                let key = names
                    .get(&label)
                    .cloned()
                    .unwrap_or_else(|| label.as_str().to_string());
                (key, list.clone())
            })
            .collect()
    }
}
