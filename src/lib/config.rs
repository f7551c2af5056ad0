//! Runtime settings, read from the environment.
//!
//! | variable             | default                  |
//! |----------------------|--------------------------|
//! | `DATABASE_URL`       | `sqlite://todos.db`      |
//! | `HOST`               | `0.0.0.0`                |
//! | `PORT`               | `8000`                   |
//! | `CORS_ORIGINS`       | `http://localhost:5173`  |
//! | `DB_MAX_CONNECTIONS` | `5`                      |
//! | `TODO_SEED`          | `true`                   |
//!
//! `CORS_ORIGINS` is comma separated. A `.env` file is honoured when the
//! binary loads it with `dotenvy` before calling [`AppConfig::from_env`].

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::anyhow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_connections: u32,
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://todos.db".to_string(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            max_connections: 5,
            seed: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source, falling back to the defaults
    /// for unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let cors_origins = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            host: parse_or("HOST", get("HOST"), defaults.host)?,
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            cors_origins,
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            seed: parse_or("TODO_SEED", get("TODO_SEED"), defaults.seed)?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid {name}={raw:?}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("TODO_SEED", "false"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.addr().to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!cfg.seed);
    }

    #[test]
    fn bad_port_names_the_variable() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[("PORT", "  "), ("DATABASE_URL", "")]).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.database_url, "sqlite://todos.db");
    }
}
