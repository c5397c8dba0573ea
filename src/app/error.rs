use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream query failed with status {0}")]
    Upstream(u16),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("No data returned from GraphQL API")]
    MissingData,

    #[error("Invalid response payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
