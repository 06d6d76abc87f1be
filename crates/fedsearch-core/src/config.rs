//! Configuration for a fedsearch node.
//!
//! Supports layered sources: hardcoded defaults, an optional config file,
//! and `FEDSEARCH`-prefixed environment variable overrides, plus a
//! validation pass.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Root configuration structure for a fedsearch node.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FedsearchConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

impl FedsearchConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file specified by FEDSEARCH_CONFIG env var
    /// 3. ./config/fedsearch.{toml,yaml,json}
    /// 4. Hardcoded defaults (lowest priority)
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = Self::set_defaults(builder)?;

        if let Ok(config_path) = std::env::var("FEDSEARCH_CONFIG") {
            builder = builder.add_source(File::with_name(&config_path).required(false));
        }

        builder = builder.add_source(File::with_name("./config/fedsearch").required(false));

        // Example: FEDSEARCH_POLICY__STALE_THRESHOLD_SECS=3600
        builder = builder.add_source(
            Environment::with_prefix("FEDSEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let config: FedsearchConfig = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Set default values for all configuration options
    fn set_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Server
            .set_default("server.bind_address", "0.0.0.0:16842")?
            // Node identity
            .set_default("node.id", "local")?
            // Policy
            .set_default("policy.stale_threshold_secs", 7200)?
            .set_default("policy.share_resources", true)?
            // Result cache
            .set_default("cache.max_entries", 10_000)?
            .set_default("cache.ttl_seconds", 3600)?
            // Remote calls
            .set_default("remote.timeout_ms", 5000)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node.id.trim().is_empty() {
            return Err(ConfigError::Message("node.id must not be empty".to_string()));
        }

        if self.node.mother_id.is_some() != self.node.mother_template.is_some() {
            return Err(ConfigError::Message(
                "node.mother_id and node.mother_template must be set together".to_string(),
            ));
        }

        if self.policy.stale_threshold_secs == 0 {
            return Err(ConfigError::Message(
                "policy.stale_threshold_secs must be > 0".to_string(),
            ));
        }

        if self.cache.max_entries == 0 {
            return Err(ConfigError::Message(
                "cache.max_entries must be > 0".to_string(),
            ));
        }

        if self.remote.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "remote.timeout_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from a specific file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: FedsearchConfig = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the API binds to
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:16842".to_string(),
        }
    }
}

/// Identity of the local node and of its optional mother.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Resource id of the local node
    pub id: String,

    /// Human-readable name of the local node
    #[serde(default)]
    pub name: Option<String>,

    /// API template advertised for this node; absent means the node's
    /// endpoint is never shared
    #[serde(default)]
    pub api_template: Option<String>,

    /// Favicon URL advertised for this node
    #[serde(default)]
    pub favicon: Option<String>,

    /// Resource id of the mother node
    #[serde(default)]
    pub mother_id: Option<String>,

    /// API template used to reach the mother node
    #[serde(default)]
    pub mother_template: Option<String>,

    /// JSON file of documents to ingest into the local corpus at startup
    #[serde(default)]
    pub corpus_path: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            id: "local".to_string(),
            name: None,
            api_template: None,
            favicon: None,
            mother_id: None,
            mother_template: None,
            corpus_path: None,
        }
    }
}

/// Resolution policy knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Descriptors older than this are re-resolved via mother
    pub stale_threshold_secs: u64,

    /// When false, API templates and per-resource health are withheld
    /// from child descriptor responses
    pub share_resources: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            stale_threshold_secs: 7200,
            share_resources: true,
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of cached results
    pub max_entries: u64,

    /// Time-to-live for cached results in seconds
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl_seconds: 3600,
        }
    }
}

impl CacheConfig {
    /// Convert TTL to Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// Remote call configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Per-request timeout for peer calls in milliseconds
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

impl RemoteConfig {
    /// Convert timeout to Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = FedsearchConfig::default();

        assert_eq!(config.server.bind_address, "0.0.0.0:16842");
        assert_eq!(config.node.id, "local");
        assert_eq!(config.policy.stale_threshold_secs, 7200);
        assert!(config.policy.share_resources);
        assert_eq!(config.cache.max_entries, 10_000);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.remote.timeout_ms, 5000);
    }

    #[test]
    fn test_duration_helpers() {
        let config = FedsearchConfig::default();
        assert_eq!(config.cache.ttl().as_secs(), 3600);
        assert_eq!(config.remote.timeout().as_millis(), 5000);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = FedsearchConfig::default();

        config.node.id = "  ".to_string();
        assert!(config.validate().is_err());

        config.node.id = "wiki".to_string();
        assert!(config.validate().is_ok());

        config.node.mother_id = Some("mother".to_string());
        assert!(config.validate().is_err());

        config.node.mother_template = Some("http://mother.org/{r}?q={q}".to_string());
        assert!(config.validate().is_ok());

        config.policy.stale_threshold_secs = 0;
        assert!(config.validate().is_err());
    }
}
