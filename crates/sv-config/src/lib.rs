//! sv-config: stand configuration and broker data layout.

pub mod broker;
pub mod schema;
pub mod validate;

pub use broker::{BrokerStructure, null_values};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid time step: {0}")]
    TimeStep(#[from] sv_core::CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

const REFERENCE_YAML: &str = include_str!("../assets/teststand.yaml");

/// The built-in layout of the three-system air-handling stand.
pub fn reference() -> ConfigResult<StandConfig> {
    from_yaml_str(REFERENCE_YAML)
}

pub fn from_yaml_str(content: &str) -> ConfigResult<StandConfig> {
    let config: StandConfig = serde_yaml::from_str(content)?;
    validate_config(&config)?;
    config.time_step()?;
    Ok(config)
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<StandConfig> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, config: &StandConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
