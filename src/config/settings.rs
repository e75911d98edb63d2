use crate::adapters::DEFAULT_ENDPOINT;
use crate::app::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Resolved run configuration handed to the data-source client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("peerfinder/{}", env!("CARGO_PKG_VERSION")),
            format: OutputFormat::Table,
        }
    }
}

impl Settings {
    /// Layer values from a config file over the current ones.
    pub fn apply_file(mut self, file: &TomlConfig) -> Self {
        if let Some(endpoint) = &file.source.endpoint {
            self.api_endpoint = endpoint.clone();
        }
        if let Some(key) = file.api_key() {
            self.api_key = Some(key.to_string());
        }
        if let Some(timeout) = file.source.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(user_agent) = &file.source.user_agent {
            self.user_agent = user_agent.clone();
        }
        if let Some(format) = file.output.format {
            self.format = format;
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
