use crate::config::{DEFAULT_DEBOUNCE_MS, DEFAULT_REFRESH_SECS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SaudeError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub app: AppConfig,
    pub data: DataConfig,
    pub api: ApiConfig,
    pub search: Option<SearchConfig>,
    pub dashboard: Option<DashboardConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub refresh_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SaudeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SaudeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` references with the environment value; unknown
    /// variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.endpoint", &self.api.endpoint)?;
        validation::validate_path("data.path", &self.data.path)?;
        validation::validate_file_extension("data.path", &self.data.path, &["csv", "tsv", "txt"])?;
        validation::validate_non_empty_string("app.name", &self.app.name)?;
        validation::validate_positive_number("search.debounce_ms", self.debounce_ms(), 1)?;
        validation::validate_range("dashboard.refresh_secs", self.refresh_secs(), 1, 3600)?;
        Ok(())
    }

    pub fn debounce_ms(&self) -> u64 {
        self.search
            .as_ref()
            .and_then(|s| s.debounce_ms)
            .unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    pub fn refresh_secs(&self) -> u64 {
        self.dashboard
            .as_ref()
            .and_then(|d| d.refresh_secs)
            .unwrap_or(DEFAULT_REFRESH_SECS)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_path(&self) -> &str {
        &self.data.path
    }

    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms())
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
