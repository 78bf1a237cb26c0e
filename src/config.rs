use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const BIND_ADDR_VAR: &str = "CHESS_BIND_ADDR";
pub const PORT_VAR: &str = "CHESS_PORT";
pub const STATIC_DIR_VAR: &str = "CHESS_STATIC_DIR";

/// Where the server listens and what it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("./static"),
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from any variable source; unset variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            if addr.trim().is_empty() {
                return Err(ConfigError::Empty { var: BIND_ADDR_VAR });
            }
            config.bind_addr = addr.trim().to_string();
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: PORT_VAR,
                value: port.clone(),
            })?;
        }
        if let Some(dir) = lookup(STATIC_DIR_VAR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::Empty { var: STATIC_DIR_VAR });
            }
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup("RUST_LOG") {
            config.log_filter = filter;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[])).unwrap(), ServerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (PORT_VAR, "9000"),
            (STATIC_DIR_VAR, "/srv/chess"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.static_dir, PathBuf::from("/srv/chess"));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.bind_addr, "127.0.0.1");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[(PORT_VAR, "eighty")])),
            Err(ConfigError::InvalidPort {
                var: PORT_VAR,
                value: "eighty".to_string()
            })
        );
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, " ")])),
            Err(ConfigError::Empty { var: BIND_ADDR_VAR })
        );
    }
}
