//! Current values from the context broker.

use std::collections::BTreeMap;

use serde_json::Value;
use sv_config::{BrokerStructure, StandConfig, null_values};
use sv_core::SystemLabel;
use sv_periods::RelayPair;

use crate::error::{AppError, AppResult};
use crate::source::EntitySource;

/// Current `parameter → value` table for `system`.
///
/// Broker failures yield the null table for every parameter; the structure
/// keeps whatever values it held before. An unknown `system` is an error
/// whether or not the broker answers.
#[tracing::instrument(skip(source, structure, config))]
pub fn current_values<E>(
    source: &E,
    structure: &mut BrokerStructure,
    config: &StandConfig,
    system: &str,
) -> AppResult<BTreeMap<String, f64>>
where
    E: EntitySource + ?Sized,
{
    if config.system(system).is_none() {
        return Err(AppError::SystemNotFound(system.to_string()));
    }
    let listing = match source.list_entities(&StandConfig::service_path(system)) {
        Ok(listing) => listing,
        Err(err) => {
            tracing::warn!(%err, "entity listing failed");
            return Ok(null_values(config));
        }
    };
    structure.apply_entities(system, &listing, config.display.digits)?;
    Ok(structure.current_values(config, system)?)
}

/// Current state of every relay readout attribute.
///
/// All attributes are reported as the null value if the entity cannot be
/// read or any attribute is missing.
pub fn relay_readout<E>(source: &E, config: &StandConfig) -> BTreeMap<String, f64>
where
    E: EntitySource + ?Sized,
{
    let relays = &config.relays;
    let nulls = || {
        relays
            .readout_attributes
            .iter()
            .map(|attr| (attr.clone(), config.null_value))
            .collect()
    };

    let attributes =
        match source.entity_attributes(&relays.entity_id, &relays.entity_type, &relays.service_path) {
            Ok(attributes) => attributes,
            Err(err) => {
                tracing::warn!(%err, "relay readout failed");
                return nulls();
            }
        };

    let mut readout = BTreeMap::new();
    for attr in &relays.readout_attributes {
        match attributes.get(attr).and_then(attribute_value) {
            Some(v) => {
                readout.insert(attr.clone(), v);
            }
            None => {
                tracing::warn!(attribute = %attr, "relay attribute missing or damaged");
                return nulls();
            }
        }
    }
    readout
}

/// Control system selected by the current relay readout.
///
/// `None` if either relay is unknown.
pub fn active_system(readout: &BTreeMap<String, f64>, config: &StandConfig) -> Option<SystemLabel> {
    let read = |attr: &String| {
        readout
            .get(attr)
            .copied()
            .filter(|v| *v != config.null_value)
    };
    let a = read(&config.relays.relay_a_attribute)?;
    let b = read(&config.relays.relay_b_attribute)?;
    Some(RelayPair::from_values(a, b).label())
}

fn attribute_value(value: &Value) -> Option<f64> {
    let inner = match value {
        Value::Object(map) => map.get("value")?,
        other => other,
    };
    match inner {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
