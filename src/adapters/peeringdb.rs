use crate::core::{ConfigProvider, PeerSource};
use crate::utils::error::{PeerFinderError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.peeringdb.com/api/net";

pub struct PeeringDbClient {
    client: Client,
    endpoint: String,
}

impl PeeringDbClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key() {
            let mut value = HeaderValue::from_str(&format!("Api-Key {}", key)).map_err(|e| {
                PeerFinderError::InvalidConfigValueError {
                    field: "api_key".to_string(),
                    value: "<redacted>".to_string(),
                    reason: e.to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PeerSource for PeeringDbClient {
    async fn fetch_network(&self, asn: u32) -> Result<serde_json::Value> {
        tracing::debug!("Making API request to: {} (asn={})", self.endpoint, asn);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("asn", asn.to_string()), ("depth", "2".to_string())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PeerFinderError::HttpStatus {
                asn,
                status: status.as_u16(),
                body,
            });
        }

        let json_data: serde_json::Value = response.json().await?;
        Ok(json_data)
    }
}
