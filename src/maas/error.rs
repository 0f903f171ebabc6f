use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaasError {
    #[error("Invalid API key: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid MAAS endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status code {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },
}

pub type Result<T> = std::result::Result<T, MaasError>;
