//! Stand configuration loading and validation.

use std::path::Path;

use sv_config::StandConfig;

use crate::error::{AppError, AppResult};

/// Load and validate a stand configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<StandConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = sv_config::from_yaml_str(&content)?;
    tracing::debug!(path = %path.display(), systems = config.systems.len(), "loaded stand config");
    Ok(config)
}

pub fn validate_config(config: &StandConfig) -> AppResult<()> {
    sv_config::validate_config(config)?;
    config.time_step()?;
    Ok(())
}
