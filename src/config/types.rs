use serde::{Deserialize, Serialize};

use crate::adapter::ConnectionConfig;

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,

    /// Code generation settings (optional; every field has a default)
    #[serde(default)]
    pub codegen: CodegenConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Schema to introspect
    pub database: String,

    pub username: String,

    /// Falls back to the GRAPHSMITH_DB_PASSWORD environment variable when
    /// omitted, so credentials stay out of checked-in config files
    #[serde(default)]
    pub password: Option<String>,
}

fn default_port() -> u16 {
    3306
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Database host must not be empty".to_string());
        }
        if self.database.is_empty() {
            return Err("Database name must not be empty".to_string());
        }
        if self.username.is_empty() {
            return Err("Database username must not be empty".to_string());
        }
        Ok(())
    }

    pub fn to_connection_config(&self) -> ConnectionConfig {
        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("GRAPHSMITH_DB_PASSWORD").ok())
            .unwrap_or_default();
        ConnectionConfig {
            host: self.host.clone(),
            database: self.database.clone(),
            port: self.port,
            username: self.username.clone(),
            password,
        }
    }
}

/// Code generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Emit sync resolvers (syncTasks queries, conflict-aware templates)
    #[serde(default)]
    pub sync_enabled: bool,

    /// Directory the compiled templates are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_out_dir() -> String {
    "resolvers".to_string()
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            sync_enabled: false,
            out_dir: default_out_dir(),
        }
    }
}
