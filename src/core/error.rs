use thiserror::Error;

/// Errors raised at the configuration and IO boundary
///
/// Gameplay operations never return these; they degrade to no-ops instead.
#[derive(Error, Debug)]
pub enum SmashError {
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SmashError>;
