use crate::app::OutputFormat;
use crate::utils::error::{PeerFinderError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| PeerFinderError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PeerFinderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PEERINGDB_API_KEY})，未設定的變數原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PeerFinderError::ConfigError {
            message: format!("bad substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得 API key；未替換的 ${VAR} 視為未設定
    pub fn api_key(&self) -> Option<&str> {
        match self.source.api_key.as_deref() {
            Some(key) if key.starts_with("${") => {
                tracing::warn!("api_key {} is not set in the environment, ignoring", key);
                None
            }
            Some("") => None,
            other => other,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.source.endpoint {
            validate_url("source.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.source.timeout_seconds {
            validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
