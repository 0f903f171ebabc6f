use crate::cache::CacheError;
use crate::config::ConfigError;
use crate::inventory::InventoryError;
use crate::maas::MaasError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaasInvError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Maas(#[from] MaasError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, MaasInvError>;
