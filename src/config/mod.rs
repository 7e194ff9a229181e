#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REFRESH_SECS: u64 = 30;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "avalia-saude")]
#[command(about = "Municipal health-evaluation dashboard core")]
pub struct CliConfig {
    /// Path to the ';'-delimited municipality source
    #[arg(long, default_value = "data/municipios.csv")]
    pub data_path: String,

    /// Base URL of the user-record API
    #[arg(long, default_value = "http://localhost:3000")]
    pub api_endpoint: String,

    /// Search query to run after loading the store
    #[arg(long)]
    pub query: Option<String>,

    /// Resolve a single map display label instead of searching
    #[arg(long)]
    pub label: Option<String>,

    /// Check whether a CPF is registered with the user-record API
    #[arg(long)]
    pub check_cpf: Option<String>,

    /// Keep running and recompute the dashboard summary periodically
    #[arg(long)]
    pub watch: bool,

    /// Debounce window for interactive search, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Interval between dashboard refresh ticks, in seconds
    #[arg(long, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Log process CPU/memory stats
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON instead of the compact console format
    #[arg(long)]
    pub log_json: bool,

    /// Optional TOML configuration file; overrides the flags above
    #[arg(short, long)]
    pub config: Option<String>,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("data_path", &self.data_path)?;
        validation::validate_file_extension("data_path", &self.data_path, &["csv", "tsv", "txt"])?;
        validation::validate_positive_number("debounce_ms", self.debounce_ms, 1)?;
        validation::validate_range("refresh_secs", self.refresh_secs, 1, 3600)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig::parse_from(["avalia-saude"])
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = base_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let mut config = base_config();
        config.api_endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_data_extension() {
        let mut config = base_config();
        config.data_path = "municipios.xlsx".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_refresh() {
        let mut config = base_config();
        config.refresh_secs = 0;
        assert!(config.validate().is_err());
    }
}
