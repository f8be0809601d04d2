//! # Taxdesk Config
//!
//! Configuration structures loaded from environment variables once at
//! startup:
//!
//! - [`jwt`]: signing key and token validity
//! - [`cors`]: allowed CORS origins
//! - [`server`]: listen addresses and optional database URL
//!
//! A missing signing key is a [`ConfigError`]; the binary refuses to start
//! rather than serve traffic without one.
//!
//! # Example
//!
//! ```ignore
//! use taxdesk_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.addr);
//! ```

pub mod cors;
pub mod error;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::{JwtConfig, SigningKey, TOKEN_VALIDITY_SECS};
pub use server::ServerConfig;

/// Everything the binary needs to boot.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            cors: CorsConfig::from_env(),
            server: ServerConfig::from_env()?,
        })
    }
}
