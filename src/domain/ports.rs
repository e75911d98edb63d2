use crate::utils::error::Result;
use async_trait::async_trait;

/// Where raw network records come from.
#[async_trait]
pub trait PeerSource: Send + Sync {
    /// Fetch the raw `/net` payload for one ASN.
    async fn fetch_network(&self, asn: u32) -> Result<serde_json::Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn api_key(&self) -> Option<&str>;
    fn user_agent(&self) -> &str;
}
