//! Configuration loading and validation for the guidance chat service.
//!
//! Loads configuration from `~/.wa-guidance/config.toml` with environment
//! variable overrides. The resulting [`ServiceConfig`] is handed to the chat
//! service once at construction and never consulted again per call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable pointing at the guidance root directory.
pub const GUIDANCE_DIR_ENV: &str = "WA_GUIDANCE_DIR";
/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "WA_GUIDANCE_MODEL";

/// Default cap on assembled guidance context, in characters.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 18_000;

/// The root configuration structure.
///
/// Maps directly to `~/.wa-guidance/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model requested for every completion
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature; left to the provider when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum characters of guidance text placed in the prompt
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Root directory holding the guidance text files. When unset, a
    /// placeholder context is used instead of reading files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_max_context_chars() -> usize {
    DEFAULT_MAX_CONTEXT_CHARS
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_context_chars", &self.max_context_chars)
            .field("guidance_dir", &self.guidance_dir)
            .finish()
    }
}

impl ServiceConfig {
    /// Create a config carrying an explicit API key and all other defaults.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Set the guidance root directory.
    pub fn guidance_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.guidance_dir = Some(dir.into());
        self
    }

    /// Set the context size cap.
    pub fn max_context_chars(mut self, max: usize) -> Self {
        self.max_context_chars = max;
        self
    }

    /// Load configuration from the default location, then apply environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the supplied lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(dir) = lookup(GUIDANCE_DIR_ENV).filter(|d| !d.is_empty()) {
            self.guidance_dir = Some(PathBuf::from(dir));
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.is_empty()) {
            self.model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".wa-guidance")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_context_chars == 0 {
            return Err(ConfigError::ValidationError(
                "max_context_chars must be greater than 0".into(),
            ));
        }

        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::ValidationError(
                    "temperature must be between 0.0 and 2.0".into(),
                ));
            }
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("model must not be empty".into()));
        }

        Ok(())
    }

    /// Resolve the API key from the config or, failing that, the process
    /// environment. Empty strings count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|key| std::env::var(key).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with an injectable
    /// environment lookup.
    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()))
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            temperature: None,
            max_context_chars: default_max_context_chars(),
            guidance_dir: None,
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = ServiceConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_context_chars, 18_000);
        assert!(config.guidance_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = ServiceConfig::with_api_key("sk-test").guidance_dir("/srv/guidance");
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ServiceConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api_key.as_deref(), Some("sk-test"));
        assert_eq!(parsed.guidance_dir, Some(PathBuf::from("/srv/guidance")));
    }

    #[test]
    fn zero_context_rejected() {
        let config = ServiceConfig::default().max_context_chars(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = ServiceConfig {
            temperature: Some(5.0),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = ServiceConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn config_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "model = \"gpt-4o-mini\"\nmax_context_chars = 5000\nguidance_dir = \"/data/public\"\n",
        )
        .unwrap();

        let config = ServiceConfig::load_from(&path).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_context_chars, 5000);
        assert_eq!(config.guidance_dir, Some(PathBuf::from("/data/public")));
    }

    #[test]
    fn unparsable_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_context_chars = \"lots\"").unwrap();
        assert!(matches!(
            ServiceConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ServiceConfig::default();
        config.apply_env(env(&[
            (API_KEY_ENV, "sk-env"),
            (GUIDANCE_DIR_ENV, "/env/guidance"),
            (MODEL_ENV, "gpt-4.1"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.guidance_dir, Some(PathBuf::from("/env/guidance")));
        assert_eq!(config.model, "gpt-4.1");
    }

    #[test]
    fn explicit_key_wins_over_env() {
        let config = ServiceConfig::with_api_key("sk-explicit");
        let key = config.resolve_api_key_with(env(&[(API_KEY_ENV, "sk-env")]));
        assert_eq!(key.as_deref(), Some("sk-explicit"));
    }

    #[test]
    fn env_key_used_when_not_configured() {
        let config = ServiceConfig::default();
        let key = config.resolve_api_key_with(env(&[(API_KEY_ENV, "sk-env")]));
        assert_eq!(key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let config = ServiceConfig::with_api_key("");
        assert!(config.resolve_api_key_with(env(&[])).is_none());
        assert!(config
            .resolve_api_key_with(env(&[(API_KEY_ENV, "")]))
            .is_none());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ServiceConfig::with_api_key("sk-very-secret");
        let out = format!("{config:?}");
        assert!(!out.contains("sk-very-secret"));
        assert!(out.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = ServiceConfig::default_toml();
        assert!(toml_str.contains("gpt-4o"));
        assert!(toml_str.contains("18000"));
    }
}
