use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Malformed machine list: {reason}")]
    MalformedArtifact { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
