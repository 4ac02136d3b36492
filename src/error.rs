use std::path::PathBuf;

/// Errors raised by the store when an action cannot be applied.
///
/// Gameplay anomalies such as a full column are not errors; they are
/// recorded in the state flags instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("column {column} is out of range (expected 0..{max})", max = crate::game::COLS)]
    InvalidColumn { column: usize },

    #[error("unrecognized action type")]
    UnknownAction,

    #[error("malformed action: {0}")]
    MalformedAction(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
