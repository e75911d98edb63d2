use crate::app::OutputFormat;
use crate::config::settings::Settings;
use crate::config::toml_config::TomlConfig;
use crate::utils::error::{PeerFinderError, Result};
use crate::utils::validation::{parse_asn, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "peerfinder")]
#[command(about = "Generate a table of common IX points and private facilities between ASNs")]
pub struct CliConfig {
    #[arg(long, num_args = 1.., required = true, value_parser = parse_asn_arg, help = "List of ASNs (65536 or AS65536)")]
    pub asn: Vec<u32>,

    #[arg(long, help = "Print common IX results")]
    pub ix: bool,

    #[arg(long, help = "Print common private facility results")]
    pub private: bool,

    #[arg(long, help = "Print IXs not shared by every ASN")]
    pub missing: bool,

    #[arg(long, value_enum, help = "Output format [default: table]")]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "PeeringDB net endpoint")]
    pub api_endpoint: Option<String>,

    #[arg(long, env = "PEERINGDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "HTTP request timeout in seconds [default: 30]")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines on stderr")]
    pub log_json: bool,
}

fn parse_asn_arg(value: &str) -> std::result::Result<u32, String> {
    parse_asn(value).map_err(|e| e.to_string())
}

impl CliConfig {
    /// 合併設定：預設值 < 設定檔 < 命令列參數
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file {}", path.display());
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            settings = settings.apply_file(&file);
        }

        if let Some(endpoint) = &self.api_endpoint {
            settings.api_endpoint = endpoint.clone();
        }
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            settings.api_key = Some(key.to_string());
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.asn.is_empty() {
            return Err(PeerFinderError::ConfigError {
                message: "--asn must be specified".to_string(),
            });
        }
        if !(self.ix || self.private || self.missing) {
            return Err(PeerFinderError::ConfigError {
                message: "Must specify --ix, --private or --missing".to_string(),
            });
        }
        Ok(())
    }
}
