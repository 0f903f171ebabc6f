pub mod auth;
pub mod client;
pub mod error;

pub use auth::ApiKey;
pub use client::{parse_endpoint, MaasClient, MachineSource};
pub use error::MaasError;
