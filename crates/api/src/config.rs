//! Process configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Signing secret for session tokens (required).
pub const JWT_SECRET_ENV: &str = "JWT_TOKEN";
pub const PORT_ENV: &str = "PORT";
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";

pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup(JWT_SECRET_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let bind_addr = match lookup(BIND_ADDR_ENV) {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                name: BIND_ADDR_ENV,
                reason: e.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            port,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing(JWT_SECRET_ENV))
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "  ")])),
            Err(ConfigError::Missing(JWT_SECRET_ENV))
        );
    }

    #[test]
    fn defaults_apply() {
        let cfg = AppConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:4000");
        assert!(!format!("{cfg:?}").contains("s3cret"));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s3cret"),
            (PORT_ENV, "8080"),
            (BIND_ADDR_ENV, "127.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");

        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "x"), (PORT_ENV, "http")])),
            Err(ConfigError::Invalid { name: PORT_ENV, .. })
        ));
    }
}
