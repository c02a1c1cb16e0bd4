//! Configuration file for playbill
//!
//! Read from `~/.playbill/config.toml` unless a path is given. A missing
//! default file means defaults; environment variables override the file:
//!
//!   DATABASE_URL      # [database].url
//!   PLAYBILL_BIND     # [server].bind

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Environment override has the wrong shape
    #[error("invalid value for {key}: {reason}")]
    Env { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlaybillConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind to
    pub bind: SocketAddr,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl PlaybillConfig {
    /// Config file path: ~/.playbill/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".playbill/config.toml")
    }

    /// Load the default file (if present) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load an explicit file; a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (normally the process env).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(bind) = lookup("PLAYBILL_BIND").filter(|b| !b.is_empty()) {
            self.server.bind = bind.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Env {
                    key: "PLAYBILL_BIND",
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = PlaybillConfig::default();
        assert_eq!(config.server.bind.port(), 5000);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.database.url, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"postgres://localhost/trivia\"\n\n[server]\ncors_origins = [\"http://localhost:3000\"]"
        )
        .unwrap();

        let config = PlaybillConfig::load_from(file.path()).unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/trivia"));
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.server.bind.port(), 5000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = PlaybillConfig::load_from(Path::new("/nonexistent/playbill.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = 12").unwrap();
        let err = PlaybillConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_file() {
        let mut config = PlaybillConfig::default();
        config
            .apply_env(|key| match key {
                "DATABASE_URL" => Some("postgres://db/bookings".into()),
                "PLAYBILL_BIND" => Some("0.0.0.0:8080".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://db/bookings"));
        assert_eq!(config.server.bind.port(), 8080);

        let err = config
            .apply_env(|key| (key == "PLAYBILL_BIND").then(|| "nope".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: "PLAYBILL_BIND", .. }));
    }
}
