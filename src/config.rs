//! Classmate configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main Classmate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassmateConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Upstream text-generation configuration
    pub upstream: UpstreamConfig,

    /// Rule engine configuration
    pub engine: EngineConfig,
}

impl ClassmateConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Default config file location (`<config dir>/classmate/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("classmate").join("config.toml"))
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

/// Upstream text-generation configuration
///
/// The upstream path is only attempted when the environment variable named by
/// `api_key_env` holds a non-empty value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Environment variable holding the API credential
    pub api_key_env: String,

    /// Inference API base URL
    pub base_url: String,

    /// Model identifier appended to `/models/`
    pub model: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Maximum number of generated tokens
    pub max_new_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl UpstreamConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Read the credential from the environment, ignoring blank values
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key_env: "HUGGINGFACE_API_KEY".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: "gpt2".to_string(),
            timeout_ms: 5000,
            max_new_tokens: 150,
            temperature: 0.8,
        }
    }
}

/// Rule engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulated warm-up delay in milliseconds, paid once per process
    pub warmup_delay_ms: u64,

    /// Seed for the fallback response generator (None = seeded from entropy)
    pub fallback_seed: Option<u64>,
}

impl EngineConfig {
    /// Warm-up delay as a `Duration`
    pub fn warmup_delay(&self) -> Duration {
        Duration::from_millis(self.warmup_delay_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            warmup_delay_ms: 500,
            fallback_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClassmateConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.api_key_env, "HUGGINGFACE_API_KEY");
        assert_eq!(config.upstream.timeout(), Duration::from_secs(5));
        assert_eq!(config.engine.warmup_delay(), Duration::from_millis(500));
        assert!(config.engine.fallback_seed.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 8088\n\n[engine]\nfallback_seed = 7\n"
        )
        .unwrap();

        let config = ClassmateConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.engine.fallback_seed, Some(7));
        assert_eq!(config.engine.warmup_delay_ms, 500);
        assert_eq!(config.upstream.model, "gpt2");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = ClassmateConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut config = ClassmateConfig::default();
        config.server.cors_origins = vec!["http://localhost:3001".to_string()];
        let rendered = config.to_toml().unwrap();
        let parsed: ClassmateConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.server.cors_origins, config.server.cors_origins);
    }

    #[test]
    fn test_api_key_missing_env() {
        let config = UpstreamConfig {
            api_key_env: "CLASSMATE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}
