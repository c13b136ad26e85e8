use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

/// Default Gemini model used when the config does not pin one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

/// External services that require credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    OpenWeather,
    Gemini,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::OpenWeather => "openweather",
            ServiceId::Gemini => "gemini",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::OpenWeather, ServiceId::Gemini]
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ServiceId::OpenWeather),
            "gemini" => Ok(ServiceId::Gemini),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: openweather, gemini."
            )),
        }
    }
}

/// Configuration for a single service (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [services.openweather]
    /// api_key = "..."
    pub services: HashMap<String, ServiceConfig>,

    /// Gemini model name; `DEFAULT_GEMINI_MODEL` when absent.
    pub gemini_model: Option<String>,

    /// Style applied when `advise` is called without `--style`.
    pub default_style: Option<String>,

    /// Gender applied when `advise` is called without `--gender`.
    pub default_gender: Option<String>,
}

impl Config {
    pub fn has_service(&self, id: ServiceId) -> bool {
        self.services.contains_key(id.as_str())
    }

    pub fn service_config(&self, id: ServiceId) -> Option<&ServiceConfig> {
        self.services.get(id.as_str())
    }

    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "stylecast", "stylecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a service API key.
    pub fn upsert_service_api_key(&mut self, service_id: ServiceId, api_key: String) {
        self.services.insert(service_id.as_str().to_string(), ServiceConfig { api_key });
    }

    /// Returns API key for a service, if present.
    pub fn service_api_key(&self, service_id: ServiceId) -> Option<&str> {
        self.services.get(service_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_service_configured(&self, service_id: ServiceId) -> bool {
        self.service_api_key(service_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_id_as_str_roundtrip() {
        for id in ServiceId::all() {
            let s = id.as_str();
            let parsed = ServiceId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_service_error() {
        let err = ServiceId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[test]
    fn set_api_key_for_service() {
        let mut cfg = Config::default();

        cfg.upsert_service_api_key(ServiceId::OpenWeather, "OPEN_KEY".into());

        let key = cfg.service_api_key(ServiceId::OpenWeather);
        assert_eq!(key, Some("OPEN_KEY"));
        assert!(cfg.is_service_configured(ServiceId::OpenWeather));
        assert!(!cfg.is_service_configured(ServiceId::Gemini));
    }

    #[test]
    fn upsert_replaces_existing_key() {
        let mut cfg = Config::default();

        cfg.upsert_service_api_key(ServiceId::Gemini, "OLD".into());
        cfg.upsert_service_api_key(ServiceId::Gemini, "NEW".into());

        assert_eq!(cfg.service_api_key(ServiceId::Gemini), Some("NEW"));
    }

    #[test]
    fn gemini_model_defaults_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.gemini_model(), DEFAULT_GEMINI_MODEL);

        let cfg = Config { gemini_model: Some("gemini-2.0-pro".into()), ..Config::default() };
        assert_eq!(cfg.gemini_model(), "gemini-2.0-pro");
    }
}
