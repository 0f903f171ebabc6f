use crate::config::MaasConfig;
use crate::maas::auth::ApiKey;
use crate::maas::error::{MaasError, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Remote source of serialized machine lists
#[async_trait]
pub trait MachineSource: Send + Sync {
    /// Every machine MAAS knows about
    async fn fetch_nodes(&self) -> Result<String>;

    /// Machines matching a hostname, filtered by the API
    async fn fetch_nodes_matching(&self, hostname: &str) -> Result<String>;
}

/// Authenticated client for the MAAS REST API
pub struct MaasClient {
    client: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl MaasClient {
    pub fn new(endpoint: Url, api_key: ApiKey, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = ClientBuilder::new().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            api_key,
        })
    }

    pub fn from_config(config: &MaasConfig) -> Result<Self> {
        Self::new(config.endpoint()?, config.api_key()?, config.timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve an API path such as `nodes/` against the configured endpoint
    pub fn resource(&self, path: &str) -> Result<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| MaasError::InvalidEndpoint {
                url: format!("{}{}", self.endpoint, path),
                reason: e.to_string(),
            })
    }

    async fn get(&self, url: Url) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, self.api_key.sign())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MaasError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl MachineSource for MaasClient {
    async fn fetch_nodes(&self) -> Result<String> {
        let url = self.resource("nodes/")?;
        self.get(url).await
    }

    async fn fetch_nodes_matching(&self, hostname: &str) -> Result<String> {
        let mut url = self.resource("nodes/")?;
        url.query_pairs_mut().append_pair("hostname", hostname);
        self.get(url).await
    }
}

/// Parse a MAAS API base URL, making sure relative paths resolve beneath it
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let invalid = |reason: String| MaasError::InvalidEndpoint {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> MaasClient {
        MaasClient::new(
            parse_endpoint(endpoint).unwrap(),
            "ck:tk:secret".parse().unwrap(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_endpoint_appends_slash() {
        let url = parse_endpoint("http://maas.local:5240/MAAS/api/2.0").unwrap();
        assert_eq!(url.as_str(), "http://maas.local:5240/MAAS/api/2.0/");
    }

    #[test]
    fn test_parse_endpoint_rejects_bad_urls() {
        assert!(parse_endpoint("maas.local/api").is_err());
        assert!(parse_endpoint("ftp://maas.local/api/").is_err());
    }

    #[test]
    fn test_resource_resolves_below_endpoint() {
        let client = client("http://maas.local:5240/MAAS/api/2.0/");
        assert_eq!(
            client.resource("nodes/").unwrap().as_str(),
            "http://maas.local:5240/MAAS/api/2.0/nodes/"
        );
    }
}
