//! Configuration management for the form validation layer

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL the validation endpoints are resolved against
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FormsConfig {
    /// Quiet period before a keystroke triggers a duplicate check
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlertsConfig {
    pub auto_dismiss_ms: u64,
    pub fade_out_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub forms: FormsConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // LIBRARY_FORMS_ORACLE__BASE_URL, LIBRARY_FORMS_FORMS__DEBOUNCE_MS, ...
            .add_source(
                Environment::with_prefix("LIBRARY_FORMS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("oracle.base_url", env::var("ORACLE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl FormsConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AlertsConfig {
    pub fn auto_dismiss(&self) -> Duration {
        Duration::from_millis(self.auto_dismiss_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 4000,
            fade_out_ms: 300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize_from_empty_source() {
        let config: AppConfig = Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(config.forms.debounce(), Duration::from_millis(500));
        assert_eq!(config.alerts.auto_dismiss(), Duration::from_secs(4));
        assert_eq!(config.oracle.base_url, "http://localhost:8080/");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("forms.debounce_ms", 250i64)
            .unwrap()
            .set_override("oracle.base_url", "http://catalog.local/")
            .unwrap()
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(config.forms.debounce_ms, 250);
        assert_eq!(config.oracle.base_url, "http://catalog.local/");
        assert_eq!(config.oracle.timeout_ms, 5000);
    }
}
