//! Per-system view of the broker's entities.
//!
//! The broker returns every entity under a system's service path in one
//! listing. The structure built here tracks only the entity/attribute pairs
//! a system's parameters refer to, so a listing can be folded into it and
//! read back as a flat `parameter → value` table that looks the same for
//! every system.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use sv_core::round_to_digits;

use crate::schema::StandConfig;
use crate::validate::ValidationError;

type AttributeValues = BTreeMap<String, f64>;
type EntityValues = BTreeMap<String, AttributeValues>;

/// system → entity → attribute → last known value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BrokerStructure {
    systems: BTreeMap<String, EntityValues>,
}

impl BrokerStructure {
    /// Build the structure for every system, seeded with the null value.
    pub fn construct(config: &StandConfig) -> Self {
        let systems = config
            .systems
            .iter()
            .map(|(name, system)| {
                let mut entities = EntityValues::new();
                for def in system.parameters.values() {
                    entities
                        .entry(def.entity.clone())
                        .or_default()
                        .insert(def.attribute.clone(), config.null_value);
                }
                (name.clone(), entities)
            })
            .collect();
        Self { systems }
    }

    pub fn entities(&self, system: &str) -> Option<&EntityValues> {
        self.systems.get(system)
    }

    pub fn value(&self, system: &str, entity: &str, attribute: &str) -> Option<f64> {
        self.systems.get(system)?.get(entity)?.get(attribute).copied()
    }

    /// Fold a key-value entity listing into `system`'s entities.
    ///
    /// Entities and attributes the system does not track are ignored, as are
    /// values that are not numeric; those keep their previous value.
    /// Returns the number of attributes updated.
    pub fn apply_entities(
        &mut self,
        system: &str,
        listing: &[Value],
        digits: u32,
    ) -> Result<usize, ValidationError> {
        let entities = self
            .systems
            .get_mut(system)
            .ok_or_else(|| ValidationError::UnknownSystem(system.to_string()))?;

        let mut updated = 0;
        for item in listing {
            let Some(id) = item.get("id").and_then(Value::as_str) else {
                continue;
            };
            let Some(attributes) = entities.get_mut(id) else {
                continue;
            };
            for (attr, slot) in attributes.iter_mut() {
                match item.get(attr).and_then(numeric_value) {
                    Some(v) => {
                        *slot = round_to_digits(v, digits);
                        updated += 1;
                    }
                    None => {
                        tracing::debug!(entity = id, attribute = %attr, "attribute missing or not numeric");
                    }
                }
            }
        }
        Ok(updated)
    }

    /// Flat `parameter → value` table for `system`.
    pub fn current_values(
        &self,
        config: &StandConfig,
        system: &str,
    ) -> Result<BTreeMap<String, f64>, ValidationError> {
        let def = config
            .system(system)
            .ok_or_else(|| ValidationError::UnknownSystem(system.to_string()))?;
        Ok(def
            .parameters
            .iter()
            .map(|(param, loc)| {
                let value = self
                    .value(system, &loc.entity, &loc.attribute)
                    .unwrap_or(config.null_value);
                (param.clone(), value)
            })
            .collect())
    }
}

/// Every parameter of every system mapped to the null value.
pub fn null_values(config: &StandConfig) -> BTreeMap<String, f64> {
    config
        .systems
        .values()
        .flat_map(|system| system.parameters.keys())
        .map(|param| (param.clone(), config.null_value))
        .collect()
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .filter(|v| v.is_finite())
}
