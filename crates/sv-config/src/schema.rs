//! Stand configuration schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sv_core::{CoreResult, NULL_VALUE, SystemLabel, TimeStep};
use sv_series::{Bounds, OutlierFilter};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandConfig {
    /// Placeholder reported for values the broker could not deliver.
    #[serde(default = "default_null_value")]
    pub null_value: f64,
    #[serde(default)]
    pub display: DisplayDef,
    #[serde(default)]
    pub outliers: OutlierDef,
    pub relays: RelayDef,
    #[serde(default)]
    pub systems: BTreeMap<String, SystemDef>,
}

fn default_null_value() -> f64 {
    NULL_VALUE
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayDef {
    /// Decimal digits kept on current values.
    pub digits: u32,
    /// Lock-out after switching control systems.
    pub switch_timeout_s: u64,
    /// Gap between adjacent control periods.
    pub step_s: f64,
}

impl Default for DisplayDef {
    fn default() -> Self {
        Self {
            digits: 1,
            switch_timeout_s: 30,
            step_s: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutlierDef {
    pub temperature: Bounds,
    pub humidity: Bounds,
}

impl Default for OutlierDef {
    fn default() -> Self {
        Self {
            temperature: Bounds::new(0.0, 80.0),
            humidity: Bounds::new(0.0, 100.0),
        }
    }
}

impl OutlierDef {
    pub fn to_filter(&self) -> OutlierFilter {
        OutlierFilter::new()
            .with_rule("Temperature", self.temperature)
            .with_rule("Humidity", self.humidity)
    }
}

/// The relay switch entity that selects the active control system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayDef {
    pub entity_id: String,
    pub entity_type: String,
    #[serde(default = "default_service_path")]
    pub service_path: String,
    pub relay_a_attribute: String,
    pub relay_b_attribute: String,
    /// Attributes reported by the relay readout.
    #[serde(default)]
    pub readout_attributes: Vec<String>,
    /// Control system name for each reconstructed label.
    #[serde(default)]
    pub labels: BTreeMap<SystemLabel, String>,
}

fn default_service_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SystemDef {
    /// Display parameter → broker location.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamDef>,
    /// Parameters plotted in the history view.
    #[serde(default)]
    pub history_parameters: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamDef {
    pub entity: String,
    pub attribute: String,
}

impl StandConfig {
    pub fn system(&self, name: &str) -> Option<&SystemDef> {
        self.systems.get(name)
    }

    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.keys().map(String::as_str)
    }

    /// Broker service path of a system's entities.
    pub fn service_path(system: &str) -> String {
        format!("/{system}")
    }

    pub fn time_step(&self) -> CoreResult<TimeStep> {
        TimeStep::from_secs_f64(self.display.step_s)
    }

    pub fn outlier_filter(&self) -> OutlierFilter {
        self.outliers.to_filter()
    }

    /// Control system driven by `label`, if mapped.
    pub fn system_for_label(&self, label: SystemLabel) -> Option<&str> {
        self.relays.labels.get(&label).map(String::as_str)
    }
}
