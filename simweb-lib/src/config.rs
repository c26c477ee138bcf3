//! Client configuration.
//!
//! Read from `config.json` in the platform config directory (XDG on Linux)
//! unless an explicit path is given. Every key is optional.
//!
//! ```json
//! {
//!     "base_url": "http://127.0.0.1:5000",
//!     "templates_path": "/forms",
//!     "simulation_path": "/simulation",
//!     "timeout_secs": 30,
//!     "connect_timeout_secs": 5
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::Api;
use crate::error::{ConfigError, Error};

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "simweb";
const APPLICATION: &str = "simweb";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend root, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Path the form templates are served under.
    pub templates_path: String,
    /// Path simulation requests are posted to.
    pub simulation_path: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Time allowed to establish a connection. `None` leaves it to the OS.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            templates_path: "/forms".to_string(),
            simulation_path: "/simulation".to_string(),
            timeout_secs: Some(30),
            connect_timeout_secs: Some(5),
        }
    }
}

impl Config {
    /// Default location of the config file, or `None` if no home directory
    /// can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("loaded config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "base_url",
                message: "must not be empty".to_string(),
            });
        }
        for (key, secs) in [
            ("timeout_secs", self.timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
        ] {
            if secs == Some(0) {
                return Err(ConfigError::Invalid {
                    key,
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// Build an [`Api`] for the configured backend.
    pub fn api(&self) -> Result<Api, Error> {
        self.validate()?;
        let mut builder = Api::builder().url(self.base_url.as_str());
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
