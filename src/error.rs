use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphsmithError {
    #[error("invalid key on model '{model}': field '{field}' does not exist")]
    InvalidKey { model: String, field: String },

    #[error("invalid directive: {0}")]
    InvalidDirective(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("schema parse error: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for GraphsmithError {
    fn from(err: toml::de::Error) -> Self {
        GraphsmithError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for GraphsmithError {
    fn from(err: toml::ser::Error) -> Self {
        GraphsmithError::Serialization(format!("TOML serialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, GraphsmithError>;
