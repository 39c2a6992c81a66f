//! Connection configuration for the member database.
//!
//! Non-secret settings live in a JSON settings file; the password is expected
//! from the environment. Every setting can be overridden by an environment
//! variable:
//!
//! | setting    | variable               |
//! |------------|------------------------|
//! | endpoint   | `MEMBER_DB_ENDPOINT`   |
//! | username   | `MEMBER_DB_USERNAME`   |
//! | password   | `MEMBER_DB_PASSWORD`   |
//! | database   | `MEMBER_DB_DATABASE`   |
//! | collection | `MEMBER_DB_COLLECTION` |

use std::{fmt, path::Path, str::FromStr};

use members::repository::is_valid_collection_name;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

/// Environment variable naming the settings file.
pub const SETTINGS_PATH_VAR: &str = "SEED_SETTINGS";

/// Settings file read when [`SETTINGS_PATH_VAR`] is not set.
pub const DEFAULT_SETTINGS_PATH: &str = "seed-settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
    #[error("Configuration value is empty: {0}")]
    Empty(&'static str),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Partially filled settings, as read from a file or the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
}

impl StoreSettings {
    /// Reads settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads settings from `MEMBER_DB_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup("MEMBER_DB_ENDPOINT"),
            username: lookup("MEMBER_DB_USERNAME"),
            password: lookup("MEMBER_DB_PASSWORD"),
            database: lookup("MEMBER_DB_DATABASE"),
            collection: lookup("MEMBER_DB_COLLECTION"),
        }
    }

    /// Values present in `other` replace values in `self`.
    pub fn merge(self, other: StoreSettings) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            database: other.database.or(self.database),
            collection: other.collection.or(self.collection),
        }
    }

    /// Fills a [`StoreConfig`], failing on the first missing value.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let config = StoreConfig {
            endpoint: self.endpoint.ok_or(ConfigError::Missing("endpoint"))?,
            username: self.username.ok_or(ConfigError::Missing("username"))?,
            password: self.password.ok_or(ConfigError::Missing("password"))?,
            database: self.database.ok_or(ConfigError::Missing("database"))?,
            collection: self.collection.ok_or(ConfigError::Missing("collection"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Where the user collection lives and how to reach it.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// PostgreSQL URL of the server, e.g. `postgres://localhost:5432`.
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub collection: String,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field(
                "endpoint",
                &self
                    .server_address()
                    .unwrap_or_else(|_| "<invalid>".to_string()),
            )
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .finish()
    }
}

impl StoreConfig {
    /// Loads configuration from the settings file and the environment.
    ///
    /// A missing default settings file is not an error, as long as the
    /// environment supplies every value.
    pub fn load() -> Result<Self, ConfigError> {
        let settings_path = std::env::var(SETTINGS_PATH_VAR).ok();
        Self::load_from(
            settings_path.as_deref().map(Path::new),
            StoreSettings::from_env(),
        )
    }

    /// Reads `settings_path` (or the default settings file, if present) and
    /// applies `overrides` on top.
    pub fn load_from(
        settings_path: Option<&Path>,
        overrides: StoreSettings,
    ) -> Result<Self, ConfigError> {
        let file_settings = match settings_path {
            Some(path) => StoreSettings::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_SETTINGS_PATH);
                if path.exists() {
                    StoreSettings::from_file(path)?
                } else {
                    tracing::debug!("No settings file at {}, using environment only", path.display());
                    StoreSettings::default()
                }
            }
        };

        file_settings.merge(overrides).build()
    }

    /// `host:port` of the server, without any credentials from the endpoint URL.
    pub fn server_address(&self) -> Result<String, ConfigError> {
        let options = self.connect_options()?;
        Ok(format!("{}:{}", options.get_host(), options.get_port()))
    }

    /// Checks every value before any connection is attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("endpoint", &self.endpoint),
            ("username", &self.username),
            ("password", &self.password),
            ("database", &self.database),
            ("collection", &self.collection),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }

        if !self.endpoint.starts_with("postgres://") && !self.endpoint.starts_with("postgresql://")
        {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        PgConnectOptions::from_str(&self.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {e}", self.endpoint)))?;

        if !is_valid_collection_name(&self.collection) {
            return Err(ConfigError::InvalidCollection(self.collection.clone()));
        }

        Ok(())
    }

    /// Connection options for the configured server and database.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        self.validate()?;
        let options = PgConnectOptions::from_str(&self.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {e}", self.endpoint)))?
            .username(&self.username)
            .password(&self.password)
            .database(&self.database);
        Ok(options)
    }
}
