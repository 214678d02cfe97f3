//! Data source configuration.
//!
//! # Responsibility
//! - Carry the connection triple (url, username, password) handed to the
//!   persistence layer at startup.
//! - Resolve the url into an openable SQLite target.
//!
//! # Invariants
//! - `password` never appears in `Debug` output or log events.

use crate::db::DbError;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

pub const ENV_URL: &str = "CRM_DATASOURCE_URL";
pub const ENV_USERNAME: &str = "CRM_DATASOURCE_USERNAME";
pub const ENV_PASSWORD: &str = "CRM_DATASOURCE_PASSWORD";

pub const MEMORY_URL: &str = "sqlite::memory:";

/// Connection parameters for the CRM database.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DataSourceConfig {
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Where a data source url points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceTarget {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is not set"),
        }
    }
}

impl Error for ConfigError {}

impl DataSourceConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Private, throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self::new(MEMORY_URL, "", "")
    }

    /// Loads the triple from `CRM_DATASOURCE_*` environment variables.
    ///
    /// The url is required; username and password default to empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(ENV_URL)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(ENV_URL))?;
        Ok(Self {
            url,
            username: lookup(ENV_USERNAME).unwrap_or_default(),
            password: lookup(ENV_PASSWORD).unwrap_or_default(),
        })
    }

    /// Resolves the url into an openable target.
    pub fn target(&self) -> Result<DataSourceTarget, DbError> {
        let url = self.url.trim();
        if url == MEMORY_URL || url == ":memory:" {
            return Ok(DataSourceTarget::Memory);
        }

        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .filter(|path| !path.is_empty())
            .ok_or_else(|| DbError::UnsupportedUrl(self.url.clone()))?;
        Ok(DataSourceTarget::File(PathBuf::from(path)))
    }
}

impl Debug for DataSourceConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DataSourceConfig, DataSourceTarget, ENV_PASSWORD, ENV_URL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn memory_urls_resolve_to_memory_target() {
        assert_eq!(
            DataSourceConfig::in_memory().target().unwrap(),
            DataSourceTarget::Memory
        );
        assert_eq!(
            DataSourceConfig::new(":memory:", "", "").target().unwrap(),
            DataSourceTarget::Memory
        );
    }

    #[test]
    fn sqlite_urls_resolve_to_file_paths() {
        let config = DataSourceConfig::new("sqlite:///tmp/crm.db", "sa", "secret");
        assert_eq!(
            config.target().unwrap(),
            DataSourceTarget::File(PathBuf::from("/tmp/crm.db"))
        );

        let relative = DataSourceConfig::new("sqlite:data/crm.db", "", "");
        assert_eq!(
            relative.target().unwrap(),
            DataSourceTarget::File(PathBuf::from("data/crm.db"))
        );
    }

    #[test]
    fn foreign_schemes_are_rejected() {
        let config = DataSourceConfig::new("postgres://localhost/crm", "sa", "secret");
        assert!(config.target().is_err());
        assert!(DataSourceConfig::new("sqlite://", "", "").target().is_err());
    }

    #[test]
    fn from_lookup_requires_url_and_defaults_credentials() {
        let missing = DataSourceConfig::from_lookup(lookup_from(&[(ENV_PASSWORD, "x")]));
        assert_eq!(missing.unwrap_err(), ConfigError::MissingVar(ENV_URL));

        let lookup = lookup_from(&[(ENV_URL, "sqlite::memory:")]);
        let config = DataSourceConfig::from_lookup(lookup).unwrap();
        assert_eq!(config, DataSourceConfig::in_memory());
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = DataSourceConfig::new("sqlite::memory:", "sa", "hunter2");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("sa"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn deserializes_with_optional_credentials() {
        let config: DataSourceConfig =
            serde_json::from_str(r#"{"url":"sqlite:///var/lib/crm.db","username":"crm"}"#)
                .unwrap();
        assert_eq!(config.username, "crm");
        assert!(config.password.is_empty());
    }
}
