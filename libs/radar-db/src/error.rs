use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing `{0}` environment variable")]
    MissingEnvVar(String),

    #[error("Unknown store backend: `{0}`")]
    UnknownBackend(String),

    #[error("Redis connection error: {0}")]
    RedisConnection(String),

    #[error("Redis command error: {0}")]
    RedisCommand(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
