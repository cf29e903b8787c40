//! Sample and signal types.

use serde::{Deserialize, Deserializer, Serialize};
use sv_core::Timestamp;

/// One reading from the time-series store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: Timestamp,
    /// `None` when the store reported null for this instant.
    #[serde(default, deserialize_with = "deserialize_value")]
    pub value: Option<f64>,
}

impl Sample {
    pub fn new(timestamp: Timestamp, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// Value if present and finite.
    pub fn valid_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }

    pub fn is_valid(&self) -> bool {
        self.valid_value().is_some()
    }
}

/// Values come back as numbers, booleans, or numeric strings depending on
/// how the attribute was provisioned.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

fn deserialize_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawValue::Number(v)) => Some(v),
        Some(RawValue::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

/// Time-ordered sequence of samples for a single attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signal {
    samples: Vec<Sample>,
}

impl Signal {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Build from parallel timestamp/value columns, truncating to the shorter.
    pub fn from_columns(timestamps: &[Timestamp], values: &[Option<f64>]) -> Self {
        timestamps
            .iter()
            .zip(values)
            .map(|(t, v)| Sample::new(*t, *v))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    /// Values of the valid samples, in order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.samples.iter().filter_map(Sample::valid_value).collect()
    }

    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.samples.first().map(|s| s.timestamp)
    }

    /// True when timestamps never decrease.
    pub fn is_time_ordered(&self) -> bool {
        self.samples
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    }}

impl FromIterator<Sample> for Signal {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Sample>> for Signal {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn t(s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2021, 1, 2, 8, 0, s).unwrap()
    }

    #[test]
    fn deserializes_mixed_value_kinds() {
        let json = r#"[
            {"timestamp": "2021-01-02T08:00:00Z", "value": 1},
            {"timestamp": "2021-01-02T08:00:01Z", "value": null},
            {"timestamp": "2021-01-02T08:00:02Z", "value": true},
            {"timestamp": "2021-01-02T08:00:03Z", "value": "0"},
            {"timestamp": "2021-01-02T08:00:04Z"}
        ]"#;
        let signal: Signal = serde_json::from_str(json).unwrap();
        let values: Vec<Option<f64>> = signal.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![Some(1.0), None, Some(1.0), Some(0.0), None]);
        assert_eq!(signal.first_timestamp(), Some(t(0)));
    }

    #[test]
    fn nan_is_not_valid() {
        assert!(!Sample::new(t(0), Some(f64::NAN)).is_valid());
        assert!(Sample::new(t(0), Some(0.0)).is_valid());
    }

    #[test]
    fn from_columns_truncates() {
        let signal = Signal::from_columns(&[t(0), t(1), t(2)], &[Some(1.0), None]);
        assert_eq!(signal.len(), 2);
        assert!(signal.is_time_ordered());
        assert_eq!(signal.valid_values(), vec![1.0]);
    }
}
