//! OAuth 1.0 PLAINTEXT signing used by the MAAS API

use crate::maas::error::{MaasError, Result};
use std::fmt;
use std::str::FromStr;

/// MAAS API key in its `consumer_key:token_key:token_secret` form
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    consumer_key: String,
    token_key: String,
    token_secret: String,
}

impl ApiKey {
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    /// Build the `Authorization` header value for one request
    pub fn authorization(&self, nonce: &str, timestamp: i64) -> String {
        // PLAINTEXT signature is `consumer_secret&token_secret` with an empty
        // consumer secret, percent-encoded.
        format!(
            "OAuth realm=\"\", oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
             oauth_consumer_key=\"{}\", oauth_token=\"{}\", oauth_signature=\"%26{}\", \
             oauth_nonce=\"{}\", oauth_timestamp=\"{}\"",
            self.consumer_key, self.token_key, self.token_secret, nonce, timestamp
        )
    }

    /// Header value with a fresh nonce and the current time
    pub fn sign(&self) -> String {
        let nonce = uuid::Uuid::new_v4().to_string();
        self.authorization(&nonce, chrono::Utc::now().timestamp())
    }
}

impl FromStr for ApiKey {
    type Err = MaasError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [consumer_key, token_key, token_secret]
                if parts.iter().all(|part| !part.is_empty()) =>
            {
                Ok(Self {
                    consumer_key: consumer_key.to_string(),
                    token_key: token_key.to_string(),
                    token_secret: token_secret.to_string(),
                })
            }
            _ => Err(MaasError::InvalidApiKey {
                reason: format!(
                    "expected consumer_key:token_key:token_secret, got {} part(s)",
                    parts.len()
                ),
            }),
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("consumer_key", &self.consumer_key)
            .field("token_key", &self.token_key)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
