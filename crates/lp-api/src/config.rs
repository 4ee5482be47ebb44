use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

/// Deployment environment, read from `APP_ENV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Server configuration, deserialized from environment variables by `envy`.
///
/// Every field has a default so the server starts with no environment at all.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, rename = "app_env")]
    pub env: Environment,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Comma separated list of origins; CORS is permissive when unset
    #[serde(default)]
    pub allowed_origins: Option<String>,
    /// Directory of `<table>.json` seed files loaded at startup
    #[serde(default)]
    pub seed_dir: Option<PathBuf>,
}

fn default_database_url() -> String {
    "sqlite://words.db".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_db_max_connections() -> u32 {
    5
}

const fn default_request_timeout_secs() -> u64 {
    10
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `None` when no origins are configured.
    pub fn parsed_allowed_origins(&self) -> Option<Vec<String>> {
        let origins = self
            .allowed_origins
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        (!origins.is_empty()).then_some(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ApiConfig {
        envy::from_iter(
            vars.iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, "sqlite://words.db");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.parsed_allowed_origins().is_none());
        assert!(config.seed_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "9000"),
            ("APP_ENV", "production"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("SEED_DIR", "seeds"),
        ]);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 9000);
        assert!(!config.env.is_development());
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.seed_dir, Some(PathBuf::from("seeds")));
    }

    #[test]
    fn test_parsed_allowed_origins() {
        let config = config_from(&[(
            "ALLOWED_ORIGINS",
            "http://localhost:5173, https://app.example.com,,",
        )]);
        assert_eq!(
            config.parsed_allowed_origins(),
            Some(vec![
                "http://localhost:5173".to_string(),
                "https://app.example.com".to_string(),
            ])
        );

        let blank = config_from(&[("ALLOWED_ORIGINS", " , ")]);
        assert!(blank.parsed_allowed_origins().is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result: Result<ApiConfig, _> =
            envy::from_iter([("PORT".to_string(), "eighty".to_string())]);
        assert!(result.is_err());
    }
}
