//! Process configuration read from the environment.

use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_FILE: &str = "database/todo.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("TODO_STORE must be \"sqlite\" or \"memory\", got {0:?}")]
    UnknownStore(String),

    #[error("{name} must be a boolean, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}

/// Which [`TodoStore`](crate::TodoStore) backs the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreKind {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::UnknownStore(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite database path, or `:memory:`. Ignored by the memory store.
    pub db_file: String,
    pub store: StoreKind,
    /// Answer every origin's CORS preflight.
    pub cors_allow_all: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_file: DEFAULT_DB_FILE.to_string(),
            store: StoreKind::default(),
            cors_allow_all: true,
        }
    }
}

impl Config {
    /// Reads `HOST`, `PORT`, `DB_FILE`, `TODO_STORE` and `CORS_ALLOW_ALL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`] but reading variables through `lookup`.
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(db_file) = get("DB_FILE") {
            config.db_file = db_file;
        }
        if let Some(store) = get("TODO_STORE") {
            config.store = store.parse()?;
        }
        if let Some(flag) = get("CORS_ALLOW_ALL") {
            config.cors_allow_all = parse_flag("CORS_ALLOW_ALL", &flag)?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.db_file, "database/todo.db");
        assert_eq!(config.store, StoreKind::Sqlite);
        assert!(config.cors_allow_all);
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DB_FILE", "/tmp/todos.db"),
            ("TODO_STORE", "memory"),
            ("CORS_ALLOW_ALL", "false"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
        assert_eq!(config.db_file, "/tmp/todos.db");
        assert_eq!(config.store, StoreKind::Memory);
        assert!(!config.cors_allow_all);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", ""), ("DB_FILE", "  ")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.db_file, DEFAULT_DB_FILE);
    }

    #[rstest]
    #[case("http")]
    #[case("70000")]
    #[case("-1")]
    fn rejects_bad_port(#[case] port: &str) {
        assert_eq!(
            config_from(&[("PORT", port)]),
            Err(ConfigError::InvalidPort(port.to_string()))
        );
    }

    #[test]
    fn rejects_unknown_store() {
        assert_eq!(
            config_from(&[("TODO_STORE", "postgres")]),
            Err(ConfigError::UnknownStore("postgres".to_string()))
        );
    }

    #[rstest]
    #[case("yes", true)]
    #[case("ON", true)]
    #[case("0", false)]
    #[case("off", false)]
    fn parses_flags(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(parse_flag("CORS_ALLOW_ALL", value), Ok(expected));
    }

    #[test]
    fn rejects_bad_flag() {
        assert!(matches!(
            config_from(&[("CORS_ALLOW_ALL", "maybe")]),
            Err(ConfigError::InvalidFlag { name: "CORS_ALLOW_ALL", .. })
        ));
    }
}
