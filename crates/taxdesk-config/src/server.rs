use std::env;
use std::net::SocketAddr;

use crate::error::ConfigError;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Prometheus listener; no metrics endpoint when unset.
    pub metrics_addr: Option<SocketAddr>,
    /// In-memory repositories are used when unset.
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = parse_addr("SERVER_ADDR", &addr)?;

        let metrics_addr = match env::var("METRICS_ADDR") {
            Ok(value) if !value.trim().is_empty() => Some(parse_addr("METRICS_ADDR", &value)?),
            _ => None,
        };

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            addr,
            metrics_addr,
            database_url,
        })
    }
}

fn parse_addr(var: &'static str, value: &str) -> Result<SocketAddr, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}
