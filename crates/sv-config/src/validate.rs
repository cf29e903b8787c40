//! Configuration validation logic.

use crate::schema::StandConfig;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown system: {0}")]
    UnknownSystem(String),

    #[error("Unknown parameter '{param}' in system '{system}'")]
    UnknownParameter { system: String, param: String },

    #[error("Empty field: {field} in {context}")]
    EmptyField { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("System '{system}' is mapped to more than one label")]
    DuplicateLabel { system: String },
}

pub fn validate_config(config: &StandConfig) -> Result<(), ValidationError> {
    if !(config.display.step_s.is_finite() && config.display.step_s > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "display.step_s".to_string(),
            value: config.display.step_s.to_string(),
            reason: "must be positive".to_string(),
        });
    }

    for (name, bounds) in [
        ("outliers.temperature", config.outliers.temperature),
        ("outliers.humidity", config.outliers.humidity),
    ] {
        if !(bounds.min < bounds.max) {
            return Err(ValidationError::InvalidValue {
                field: name.to_string(),
                value: format!("{}..{}", bounds.min, bounds.max),
                reason: "min must be below max".to_string(),
            });
        }
    }

    for (field, value) in [
        ("entity_id", &config.relays.entity_id),
        ("relay_a_attribute", &config.relays.relay_a_attribute),
        ("relay_b_attribute", &config.relays.relay_b_attribute),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: field.to_string(),
                context: "relays".to_string(),
            });
        }
    }

    let mut mapped = Vec::new();
    for system in config.relays.labels.values() {
        if !config.systems.contains_key(system) {
            return Err(ValidationError::UnknownSystem(system.clone()));
        }
        if mapped.contains(&system) {
            return Err(ValidationError::DuplicateLabel {
                system: system.clone(),
            });
        }
        mapped.push(system);
    }

    for (system_name, system) in &config.systems {
        for (param, def) in &system.parameters {
            let context = format!("{system_name}.{param}");
            if def.entity.trim().is_empty() {
                return Err(ValidationError::EmptyField {
                    field: "entity".to_string(),
                    context,
                });
            }
            if def.attribute.trim().is_empty() {
                return Err(ValidationError::EmptyField {
                    field: "attribute".to_string(),
                    context,
                });
            }
        }
        for param in &system.history_parameters {
            if !system.parameters.contains_key(param) {
                return Err(ValidationError::UnknownParameter {
                    system: system_name.clone(),
                    param: param.clone(),
                });
            }
        }
    }

    Ok(())
}
