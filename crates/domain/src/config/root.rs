use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::{parse_nameserver, ResolverConfig};
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "pod-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/pod-dns/config.toml";

/// Main configuration structure for pod-dns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution configuration
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. pod-dns.toml in current directory
    /// 3. /etc/pod-dns/config.toml
    /// 4. Default configuration
    ///
    /// Command-line (and environment) overrides are applied on top.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(nameserver) = overrides.tunnel_nameserver {
            self.resolver.tunnel_nameserver = Some(nameserver);
        }
        if let Some(namespace) = overrides.namespace {
            self.resolver.namespace = Some(namespace);
        }
        if let Some(local_names) = overrides.local_names {
            self.resolver.local_names = local_names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address: {}",
                self.server.bind_address
            )));
        }

        let resolver = &self.resolver;
        if resolver.query_timeout_ms == 0
            || resolver.cluster_timeout_ms == 0
            || resolver.stripped_retry_timeout_ms == 0
        {
            return Err(ConfigError::Validation(
                "Resolver timeouts must be greater than 0".to_string(),
            ));
        }

        if resolver.fallback_attempts == 0 {
            return Err(ConfigError::Validation(
                "fallback_attempts must be at least 1".to_string(),
            ));
        }

        if resolver.native_concurrency == 0 {
            return Err(ConfigError::Validation(
                "native_concurrency must be at least 1".to_string(),
            ));
        }

        if let Some(nameserver) = &resolver.tunnel_nameserver {
            parse_nameserver(nameserver).map_err(ConfigError::Validation)?;
        }

        if resolver
            .namespace
            .as_deref()
            .is_some_and(|ns| ns.trim().is_empty() || ns.contains('.'))
        {
            return Err(ConfigError::Validation(
                "namespace must be a single non-empty label".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub tunnel_nameserver: Option<String>,
    pub namespace: Option<String>,
    /// Comma-separated list
    pub local_names: Option<String>,
    pub log_level: Option<String>,
}
