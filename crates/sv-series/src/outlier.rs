//! Outlier filtering for sensor history.
//!
//! Sensors on the stand occasionally report physically impossible values
//! (e.g. 850 °C). History parameters are screened against open bounds
//! chosen by the parameter's quantity.

use serde::{Deserialize, Serialize};

use crate::filter::filter_valid;
use crate::sample::Signal;

/// Open interval `(min, max)`; values on the bounds are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v > self.min && v < self.max
    }
}

/// Bounds keyed by a substring of the parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlierFilter {
    rules: Vec<(String, Bounds)>,
}

impl OutlierFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `bounds` to every parameter whose name contains `pattern`.
    pub fn with_rule(mut self, pattern: impl Into<String>, bounds: Bounds) -> Self {
        self.rules.push((pattern.into(), bounds));
        self
    }

    /// Bounds that apply to `param`, in rule order.
    pub fn rules_for<'a>(&'a self, param: &'a str) -> impl Iterator<Item = &'a Bounds> + 'a {
        self.rules
            .iter()
            .filter(move |(pattern, _)| param.contains(pattern.as_str()))
            .map(|(_, bounds)| bounds)
    }

    /// Drop invalid samples, then samples outside every matching bound.
    pub fn apply(&self, param: &str, signal: &Signal) -> Signal {
        let valid = filter_valid(signal);
        let bounds: Vec<&Bounds> = self.rules_for(param).collect();
        if bounds.is_empty() {
            return valid;
        }
        valid
            .iter()
            .copied()
            .filter(|s| {
                s.valid_value()
                    .is_some_and(|v| bounds.iter().all(|b| b.contains(v)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sv_core::Timestamp;

    fn t(s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2021, 1, 2, 8, 0, s).unwrap()
    }

    fn stand_filter() -> OutlierFilter {
        OutlierFilter::new()
            .with_rule("Temperature", Bounds::new(0.0, 80.0))
            .with_rule("Humidity", Bounds::new(0.0, 100.0))
    }

    #[test]
    fn temperature_bounds_are_exclusive() {
        let signal = Signal::from_columns(
            &[t(0), t(1), t(2), t(3), t(4)],
            &[Some(0.0), Some(21.5), None, Some(80.0), Some(850.0)],
        );
        let out = stand_filter().apply("Air_Inlet_Temperature", &signal);
        assert_eq!(out.valid_values(), vec![21.5]);
        assert_eq!(out.timestamps(), vec![t(1)]);
    }

    #[test]
    fn unmatched_parameter_only_drops_nulls() {
        let signal = Signal::from_columns(&[t(0), t(1), t(2)], &[Some(-5.0), None, Some(500.0)]);
        let out = stand_filter().apply("Three_Way_Valve", &signal);
        assert_eq!(out.valid_values(), vec![-5.0, 500.0]);
    }

    #[test]
    fn humidity_rule_matches_by_substring() {
        let signal = Signal::from_columns(&[t(0), t(1)], &[Some(55.0), Some(101.0)]);
        let out = stand_filter().apply("Air_Outlet_Humidity", &signal);
        assert_eq!(out.valid_values(), vec![55.0]);
    }
}
