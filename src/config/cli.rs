use crate::config::toml_config::TomlConfig;
use crate::config::{ServiceConfig, DEFAULT_SERVICE_BASE_URL};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "measure-client", version)]
#[command(about = "Client for the measurement conversion service")]
pub struct CliConfig {
    #[arg(
        long,
        env = "SERVICE_BASE_URL",
        global = true,
        help = "Base URL of the measurement service [default: http://localhost:8080]"
    )]
    pub service_base_url: Option<String>,

    #[arg(
        long,
        env = "SERVICE_TIMEOUT_SECONDS",
        global = true,
        help = "Request timeout in seconds (no timeout when unset)"
    )]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Convert a measurement string and print the result
    Convert {
        /// Raw input, sent as-is (may be empty)
        #[arg(default_value = "", allow_hyphen_values = true)]
        input: String,
    },
    /// Print the conversion history
    History,
    /// Read `convert <text>`, `history`, `clear` and `quit` commands from stdin
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

impl CliConfig {
    /// 優先順序：命令列 / 環境變數 > TOML 檔案 > 預設值
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let config = ServiceConfig {
            base_url: self
                .service_base_url
                .clone()
                .or_else(|| file.base_url().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_SERVICE_BASE_URL.to_string()),
            timeout_seconds: self.timeout_seconds.or_else(|| file.timeout_seconds()),
            log_level: file.log_level().map(str::to_string),
        };

        config.validate()?;
        Ok(config)
    }
}
