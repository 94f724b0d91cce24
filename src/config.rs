use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_FILTER: &str = "rustyexercise=debug,tower_http=debug,info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address {value:?}: {reason}")]
    InvalidAddress { value: String, reason: String },
}

/// Settings for the HTTP service.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `get` so tests need not touch the
    /// process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let raw_addr = get("RUSTYEXERCISE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidAddress {
                value: raw_addr.clone(),
                reason: err.to_string(),
            })?;
        let log_filter = get("RUSTYEXERCISE_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Ok(Self { addr, log_filter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ServerConfig::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.addr.port(), 3000);
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn reads_values() {
        let get = |k: &str| match k {
            "RUSTYEXERCISE_ADDR" => Some("127.0.0.1:8080".into()),
            "RUSTYEXERCISE_LOG" => Some("warn".into()),
            _ => None,
        };
        let cfg = ServerConfig::from_env_with(get).expect("cfg");
        assert_eq!(cfg.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn rejects_invalid_address() {
        let get = |k: &str| match k {
            "RUSTYEXERCISE_ADDR" => Some("not-an-address".into()),
            _ => None,
        };
        let res = ServerConfig::from_env_with(get);
        assert!(matches!(res, Err(ConfigError::InvalidAddress { .. })));
    }
}
