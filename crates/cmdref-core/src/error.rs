use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to parse {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported catalog file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Duplicate record id '{0}'")]
    DuplicateId(String),

    #[error("Record '{0}' has an empty category")]
    EmptyCategory(String),

    #[error("No record with id '{0}'")]
    UnknownRecord(String),

    #[error("No collection named '{0}'")]
    UnknownCollection(String),

    #[error("Scenario '{0}' copies one step at a time; pass --step with an existing step number")]
    MissingStep(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
