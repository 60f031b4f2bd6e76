//! Configuration settings for Skape.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub seedance: SeedanceSettings,
    pub agent: AgentSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Settings for the Seedance video generation operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedanceSettings {
    /// Region used when rewriting storage references (tos://) to HTTPS.
    pub region: String,
    /// Operator identifier, reported in logs.
    pub operator_id: String,
    /// Generation model name sent in the task payload.
    pub model: String,
    /// Task creation endpoint.
    pub create_url: String,
    /// Task status endpoint.
    pub status_url: String,
    /// API key for the operator API. Usually supplied via LAS_API_KEY.
    pub api_key: Option<String>,
    /// Overall polling deadline in seconds.
    pub poll_timeout_seconds: u64,
    /// Delay between status checks in seconds.
    pub poll_interval_seconds: f64,
    /// Per-request HTTP timeout in seconds. Kept well below the polling
    /// deadline so one hung socket cannot consume the whole budget.
    pub request_timeout_seconds: u64,
    /// Whether the provider should also return the last generated frame.
    pub return_last_frame: bool,
}

impl Default for SeedanceSettings {
    fn default() -> Self {
        Self {
            region: "cn-beijing".to_string(),
            operator_id: "las_seedance".to_string(),
            model: "doubao-seedance-1.0-lite-i2v".to_string(),
            create_url: "https://operator.las.cn-beijing.volces.com/api/v1/online/video/generate"
                .to_string(),
            status_url: "https://operator.las.cn-beijing.volces.com/api/v1/online/video/task"
                .to_string(),
            api_key: None,
            poll_timeout_seconds: 120,
            poll_interval_seconds: 3.0,
            request_timeout_seconds: 60,
            return_last_frame: false,
        }
    }
}

impl SeedanceSettings {
    /// Get the configured API key, or an error telling the user how to set it.
    pub fn require_api_key(&self) -> crate::error::Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(crate::error::SkapeError::InvalidInput(
                "LAS API key not configured. Set it with: export LAS_API_KEY='...'".to_string(),
            )),
        }
    }
}

/// Agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// LLM model driving the tool-calling loop.
    pub model: String,
    /// Maximum iterations (LLM calls) per agent run.
    pub max_iterations: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_iterations: 15,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Overlay environment variables on top of the loaded configuration.
    ///
    /// This is the only place the environment is consulted; the generation
    /// core itself works purely from the injected settings. Call once at
    /// process entry.
    pub fn apply_env(&mut self) {
        if let Some(region) = env_non_empty("LAS_REGION").or_else(|| env_non_empty("TOS_REGION")) {
            self.seedance.region = region;
        }
        if let Some(operator_id) = env_non_empty("LAS_OPERATOR_ID") {
            self.seedance.operator_id = operator_id;
        }
        if let Some(key) = env_non_empty("LAS_API_KEY") {
            self.seedance.api_key = Some(key);
        }
        if let Some(timeout) = env_non_empty("SEEDANCE_POLL_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.seedance.poll_timeout_seconds = secs,
                Err(_) => tracing::warn!("Ignoring unparseable SEEDANCE_POLL_TIMEOUT: {timeout}"),
            }
        }
        if let Some(interval) = env_non_empty("SEEDANCE_POLL_INTERVAL") {
            match interval.parse::<f64>() {
                Ok(secs) if secs > 0.0 => self.seedance.poll_interval_seconds = secs,
                _ => tracing::warn!("Ignoring unparseable SEEDANCE_POLL_INTERVAL: {interval}"),
            }
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SkapeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skape")
            .join("config.toml")
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.seedance.region, "cn-beijing");
        assert_eq!(settings.seedance.poll_timeout_seconds, 120);
        assert_eq!(settings.seedance.poll_interval_seconds, 3.0);
        assert!(settings.seedance.api_key.is_none());
        assert!(!settings.seedance.return_last_frame);
    }

    #[test]
    fn test_require_api_key_missing() {
        let settings = SeedanceSettings::default();
        assert!(settings.require_api_key().is_err());

        let configured = SeedanceSettings {
            api_key: Some("key-123".to_string()),
            ..SeedanceSettings::default()
        };
        assert_eq!(configured.require_api_key().unwrap(), "key-123");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.seedance.region = "ap-southeast-1".to_string();
        settings.seedance.poll_timeout_seconds = 300;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.seedance.region, "ap-southeast-1");
        assert_eq!(loaded.seedance.poll_timeout_seconds, 300);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/skape/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.seedance.model, "doubao-seedance-1.0-lite-i2v");
    }
}
