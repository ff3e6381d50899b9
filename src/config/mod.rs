mod types;

pub use types::{CodegenConfig, Config, DatabaseConfig};

use crate::error::{GraphsmithError, Result};
use std::fs;

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|e| {
        GraphsmithError::Config(format!("Failed to read config file '{}': {}", path, e))
    })?;

    let config: Config = toml::from_str(&contents)?;

    config.database.validate().map_err(GraphsmithError::Config)?;

    if config.codegen.out_dir.is_empty() {
        return Err(GraphsmithError::Config(
            "codegen.out_dir must not be empty".to_string(),
        ));
    }

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &str) -> Result<()> {
    config.database.validate().map_err(GraphsmithError::Config)?;

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string).map_err(|e| {
        GraphsmithError::Config(format!("Failed to write config file '{}': {}", path, e))
    })?;

    Ok(())
}
