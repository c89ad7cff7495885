use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;

/// Settings shared by every service: where the HTTP listener binds.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load from an optional `configuration` file overlaid with the
    /// process environment (`HOST`, `PORT`). `.env` loading is left to the
    /// binary.
    pub fn load() -> Result<Self, AppError> {
        Self::from_env(Environment::default().try_parsing(true))
    }

    /// Load using the given environment source. Tests pass an in-memory map.
    pub fn from_env(environment: Environment) -> Result<Self, AppError> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().try_parsing(true).source(Some(map))
    }

    #[test]
    fn defaults_to_port_5000_on_all_interfaces() {
        let config = Config::from_env(env_from(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.address(), "0.0.0.0:5000");
    }

    #[test]
    fn port_and_host_come_from_environment() {
        let config = Config::from_env(env_from(&[("PORT", "8081"), ("HOST", "127.0.0.1")])).unwrap();
        assert_eq!(config.address(), "127.0.0.1:8081");
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = Config::from_env(env_from(&[("PORT", "not-a-port")]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
