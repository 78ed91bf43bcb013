//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Root configuration for the diagram server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Project root and YAML directory.
    pub paths: PathsConfig,

    /// YAML gateway policy.
    pub gateway: GatewayConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServerConfig {
    /// Configuration serving `project_root` with every other setting at its default.
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.paths.project_root = project_root.into();
        config
    }

    /// Directory static assets are served from.
    pub fn project_root(&self) -> &Path {
        &self.paths.project_root
    }

    /// The YAML directory, anchored at the project root when relative.
    pub fn yaml_directory(&self) -> PathBuf {
        if self.paths.yaml_dir.is_absolute() {
            self.paths.yaml_dir.clone()
        } else {
            self.paths.project_root.join(&self.paths.yaml_dir)
        }
    }

    /// Socket address string to bind (e.g. "0.0.0.0:8080").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }

    /// URL of the viewer page opened at startup.
    pub fn viewer_url(&self) -> String {
        format!("http://localhost:{}/viewer/", self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port, 1..=65535.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Filesystem layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory served over HTTP. Made absolute by the loader.
    pub project_root: PathBuf,

    /// The only directory the gateway may list or write.
    /// Relative values are anchored at `project_root`.
    pub yaml_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            yaml_dir: PathBuf::from("YAML"),
        }
    }
}

/// Gateway path policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Reject `..` segments outright instead of stripping leading ones.
    pub strict_paths: bool,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum save body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 16 * 1024 * 1024, // 16MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_directory_is_anchored_at_root() {
        let config = ServerConfig::for_project("/srv/diagrams");
        assert_eq!(config.yaml_directory(), PathBuf::from("/srv/diagrams/YAML"));
    }

    #[test]
    fn test_absolute_yaml_dir_is_kept() {
        let mut config = ServerConfig::for_project("/srv/diagrams");
        config.paths.yaml_dir = PathBuf::from("/data/yaml");
        assert_eq!(config.yaml_directory(), PathBuf::from("/data/yaml"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ServerConfig = toml::from_str("[listener]\nport = 9000\n").unwrap();
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.paths.yaml_dir, PathBuf::from("YAML"));
        assert!(!config.gateway.strict_paths);
        assert_eq!(config.viewer_url(), "http://localhost:9000/viewer/");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
