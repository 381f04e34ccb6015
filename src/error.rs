use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The record could not be encoded as a JSON payload.
    #[error("failed to serialize log record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A redis operation failed (network, auth, or server-side rejection).
    #[error("redis delivery failed: {0}")]
    Delivery(#[from] redis::RedisError),

    /// The global logger could not be installed.
    #[error("failed to install logger: {0}")]
    Init(#[from] log::SetLoggerError),
}
