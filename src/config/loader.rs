//! Configuration loading: defaults, then an optional TOML file, then
//! command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// File picked up from the project root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "diagram-server.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line. `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub project_root: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Load and validate a configuration from a TOML file.
pub fn load_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the startup configuration.
///
/// The project root defaults to the current directory. Once validated, the
/// root is canonicalized so every later path comparison works on absolute
/// paths.
pub fn load_config(overrides: ConfigOverrides) -> Result<ServerConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    let search_root = overrides
        .project_root
        .as_deref()
        .map(|root| cwd.join(root))
        .unwrap_or_else(|| cwd.clone());

    let config_file = overrides.config_file.clone().or_else(|| {
        let candidate = search_root.join(DEFAULT_CONFIG_FILE);
        candidate.is_file().then_some(candidate)
    });

    let mut config = match &config_file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            load_file(path)?
        }
        None => ServerConfig::default(),
    };

    if let Some(root) = overrides.project_root {
        config.paths.project_root = root;
    }
    if let Some(port) = overrides.port {
        config.listener.port = port;
    }
    config.paths.project_root = cwd.join(&config.paths.project_root);

    validate_config(&config).map_err(ConfigError::Validation)?;

    config.paths.project_root = config
        .paths
        .project_root
        .canonicalize()
        .map_err(|source| ConfigError::Io {
            path: config.paths.project_root.clone(),
            source,
        })?;

    Ok(config)
}
