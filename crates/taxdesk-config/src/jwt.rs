use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Environment variable holding the HMAC secret.
pub const SIGNING_KEY_VAR: &str = "JWT_SECRET_KEY";

/// Lifetime of an issued token, in seconds.
pub const TOKEN_VALIDITY_SECS: i64 = 3600;

/// Process-wide token signing secret. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingSigningKey {
                var: SIGNING_KEY_VAR,
            });
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub signing_key: SigningKey,
    pub token_validity_secs: i64,
}

impl JwtConfig {
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            token_validity_secs: TOKEN_VALIDITY_SECS,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var(SIGNING_KEY_VAR).map_err(|_| ConfigError::MissingSigningKey {
            var: SIGNING_KEY_VAR,
        })?;

        Ok(Self::new(SigningKey::new(secret)?))
    }
}
