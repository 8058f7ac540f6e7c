use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("favorites import rejected: {0}")]
    Import(String),

    #[error(transparent)]
    Core(#[from] alchemy_core::AlchemyError),
}
